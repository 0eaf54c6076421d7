use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Question, QuestionKind};

static QUESTION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:q(?:uestion)?\s*\d+|\d+)\s*[.):\-]\s*").unwrap()
});

static OPTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(?[A-Da-d][).]\s*").unwrap());

static ANSWER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:correct\s+)?(?:answer|correct)\s*:\s*").unwrap());

pub fn parse_questions(content: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut section: Option<QuestionKind> = None;
    let mut current: Option<Question> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim().trim_matches('*').trim();
        if line.is_empty() {
            continue;
        }

        let starts_question = QUESTION_LABEL.is_match(line);
        let labelled = starts_question || OPTION_LABEL.is_match(line) || ANSWER_LABEL.is_match(line);

        if !labelled {
            if let Some(kind) = section_header(line) {
                questions.extend(current.take());
                section = Some(kind);
                continue;
            }
        }

        let Some(kind) = section else {
            continue;
        };

        if starts_question {
            questions.extend(current.take());
            let text = QUESTION_LABEL.replace(line, "").trim().to_string();
            current = Some(Question::new(kind, text));
            continue;
        }

        let Some(question) = current.as_mut() else {
            continue;
        };

        if let Some(found) = ANSWER_LABEL.find(line) {
            question.answer = Some(line[found.end()..].trim().to_string());
        } else if kind == QuestionKind::MultipleChoice && OPTION_LABEL.is_match(line) {
            question.options.push(line.to_string());
        } else if question.options.is_empty() && question.answer.is_none() {
            // wrapped question text
            question.text.push(' ');
            question.text.push_str(line);
        }
    }

    questions.extend(current);
    questions
}

fn section_header(line: &str) -> Option<QuestionKind> {
    let upper = line.to_uppercase();
    if upper.contains("MULTIPLE CHOICE") || upper.starts_with("MCQ") {
        Some(QuestionKind::MultipleChoice)
    } else if upper.contains("SHORT ANSWER") {
        Some(QuestionKind::ShortAnswer)
    } else if upper.contains("LONG ANSWER") {
        Some(QuestionKind::LongAnswer)
    } else {
        None
    }
}
