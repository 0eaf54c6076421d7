use std::fmt;

use super::SyllabusModule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    MultipleChoice,
    ShortAnswer,
    LongAnswer,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::MultipleChoice,
        QuestionKind::ShortAnswer,
        QuestionKind::LongAnswer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "MCQ",
            QuestionKind::ShortAnswer => "Short Answer",
            QuestionKind::LongAnswer => "Long Answer",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub kind: QuestionKind,
    pub text: String,
    pub options: Vec<String>,
    pub answer: Option<String>,
}

impl Question {
    pub fn new(kind: QuestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            options: Vec::new(),
            answer: None,
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounts {
    pub mcq: usize,
    pub short: usize,
    pub long: usize,
}

impl QuestionCounts {
    pub fn new(mcq: usize, short: usize, long: usize) -> Self {
        Self { mcq, short, long }
    }

    pub fn for_kind(&self, kind: QuestionKind) -> usize {
        match kind {
            QuestionKind::MultipleChoice => self.mcq,
            QuestionKind::ShortAnswer => self.short,
            QuestionKind::LongAnswer => self.long,
        }
    }

    pub fn total(&self) -> usize {
        self.mcq + self.short + self.long
    }
}

impl Default for QuestionCounts {
    fn default() -> Self {
        Self::new(5, 3, 2)
    }
}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleQuestions {
    pub module: SyllabusModule,
    pub questions: Vec<Question>,
}

impl ModuleQuestions {
    pub fn new(module: SyllabusModule, questions: Vec<Question>) -> Self {
        Self { module, questions }
    }

    pub fn of_kind(&self, kind: QuestionKind) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(move |q| q.kind == kind)
    }

    pub fn count_of(&self, kind: QuestionKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
    pub fn truncate_to(&mut self, counts: QuestionCounts) {
        let mut seen = [0usize; 3];
        self.questions.retain(|q| {
            let slot = match q.kind {
                QuestionKind::MultipleChoice => 0,
                QuestionKind::ShortAnswer => 1,
                QuestionKind::LongAnswer => 2,
            };
            seen[slot] += 1;
            seen[slot] <= counts.for_kind(q.kind)
        });
    }
}
