use question_bank::application::services::parse_questions;
use question_bank::domain::QuestionKind;

const REPLY: &str = "MULTIPLE CHOICE QUESTIONS - Module 1:
Q1. What does quicksort use to split the array?
A) A pivot
B) A heap
C) A hash
D) A stack
Answer: A

Q2. Which sort is stable?
A. Heapsort
B. Mergesort
C. Quicksort
D. Selection sort
Correct: B

SHORT ANSWER QUESTIONS - Module 1:
1. Define a stable sort.
2) Name one in-place sorting algorithm.

LONG ANSWER QUESTIONS - Module 1:
Question 1: Compare mergesort and quicksort
in terms of memory and worst-case time.
";

#[test]
fn given_formatted_reply_when_parsing_then_questions_are_grouped_by_section() {
    let questions = parse_questions(REPLY);

    let kinds: Vec<QuestionKind> = questions.iter().map(|q| q.kind).collect();
    assert_eq!(
        kinds,
        vec![
            QuestionKind::MultipleChoice,
            QuestionKind::MultipleChoice,
            QuestionKind::ShortAnswer,
            QuestionKind::ShortAnswer,
            QuestionKind::LongAnswer,
        ]
    );
}

#[test]
fn given_mcq_when_parsing_then_options_and_answer_are_captured() {
    let questions = parse_questions(REPLY);

    assert_eq!(questions[0].text, "What does quicksort use to split the array?");
    assert_eq!(questions[0].options.len(), 4);
    assert_eq!(questions[0].options[0], "A) A pivot");
    assert_eq!(questions[0].answer.as_deref(), Some("A"));
    assert_eq!(questions[1].answer.as_deref(), Some("B"));
}

#[test]
fn given_wrapped_question_when_parsing_then_lines_are_joined() {
    let questions = parse_questions(REPLY);

    assert_eq!(
        questions[4].text,
        "Compare mergesort and quicksort in terms of memory and worst-case time."
    );
}

#[test]
fn given_question_outside_any_section_when_parsing_then_it_is_ignored() {
    let questions = parse_questions("Q1. Orphan question?\nSHORT ANSWER QUESTIONS:\nQ1. Kept?");

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].text, "Kept?");
}

#[test]
fn given_lettered_line_in_short_section_when_parsing_then_it_is_not_an_option() {
    let questions = parse_questions("SHORT ANSWER QUESTIONS:\nQ1. Explain recursion.\nA) stray");

    assert!(questions[0].options.is_empty());
}

#[test]
fn given_empty_reply_when_parsing_then_returns_no_questions() {
    assert!(parse_questions("").is_empty());
}

#[test]
fn given_mcq_option_mentioning_another_section_when_parsing_then_section_is_kept() {
    let reply = "MULTIPLE CHOICE QUESTIONS - Module 1:
Q1. Which format suits a one-line definition?
A) Essay
B) Short answer
C) Long answer
D) Multiple choice grid
Answer: B) Short answer
Q2. Which is a sort?
A) Quick
B) Hash
C) Tree
D) Heap
Answer: A
";

    let questions = parse_questions(reply);

    assert_eq!(questions.len(), 2);
    assert!(questions.iter().all(|q| q.kind == QuestionKind::MultipleChoice));
    assert_eq!(questions[0].options.len(), 4);
    assert_eq!(questions[0].answer.as_deref(), Some("B) Short answer"));
    assert_eq!(questions[1].text, "Which is a sort?");
    assert_eq!(questions[1].options.len(), 4);
    assert_eq!(questions[1].answer.as_deref(), Some("A"));
}
