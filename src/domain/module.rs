use serde::Serialize;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllabusModule {
    pub module_id: String,
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
}

impl SyllabusModule {
    pub fn new(
        module_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        topics: Vec<String>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            title: title.into(),
            description: description.into(),
            topics,
        }
    }

    // used when detection finds nothing
    pub fn whole_syllabus() -> Self {
        Self::new(
            "Module 1",
            "Complete Syllabus",
            "All syllabus content",
            vec!["General topics".to_string()],
        )
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleProgress {
    pub module_id: String,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<usize>,
}

impl ModuleProgress {
    pub fn mark_completed(&mut self, question_count: usize) {
        self.completed = true;
        self.question_count = Some(question_count);
    }
}

impl From<&SyllabusModule> for ModuleProgress {
    fn from(module: &SyllabusModule) -> Self {
        Self {
            module_id: module.module_id.clone(),
            title: module.title.clone(),
            completed: false,
            question_count: None,
        }
    }
}
