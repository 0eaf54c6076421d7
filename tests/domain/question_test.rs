use question_bank::domain::{
    ModuleQuestions, Question, QuestionCounts, QuestionKind, SyllabusModule,
};

fn questions(kind: QuestionKind, n: usize) -> Vec<Question> {
    (1..=n).map(|i| Question::new(kind, format!("{} {}", kind, i))).collect()
}

#[test]
fn given_more_questions_than_requested_when_truncating_then_keeps_first_per_kind() {
    let mut all = questions(QuestionKind::MultipleChoice, 7);
    all.extend(questions(QuestionKind::ShortAnswer, 2));
    all.extend(questions(QuestionKind::LongAnswer, 4));
    let mut set = ModuleQuestions::new(SyllabusModule::whole_syllabus(), all);

    set.truncate_to(QuestionCounts::new(5, 3, 2));

    assert_eq!(set.count_of(QuestionKind::MultipleChoice), 5);
    assert_eq!(set.count_of(QuestionKind::ShortAnswer), 2);
    assert_eq!(set.count_of(QuestionKind::LongAnswer), 2);
    assert_eq!(set.questions[4].text, "MCQ 5");
    assert_eq!(set.questions.last().unwrap().text, "Long Answer 2");
}

#[test]
fn given_default_counts_when_totalling_then_ten_questions() {
    let counts = QuestionCounts::default();

    assert_eq!((counts.mcq, counts.short, counts.long), (5, 3, 2));
    assert_eq!(counts.total(), 10);
}

#[test]
fn given_whole_syllabus_module_when_built_then_matches_fallback_values() {
    let module = SyllabusModule::whole_syllabus();

    assert_eq!(module.module_id, "Module 1");
    assert_eq!(module.title, "Complete Syllabus");
    assert_eq!(module.description, "All syllabus content");
    assert_eq!(module.topics, vec!["General topics"]);
}
