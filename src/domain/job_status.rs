use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Queued,
    Processing,
    DetectingModules,
    GeneratingQuestions,
    CreatingExcel,
    Completed,
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Processing => "processing",
            JobStatus::DetectingModules => "detecting_modules",
            JobStatus::GeneratingQuestions => "generating_questions",
            JobStatus::CreatingExcel => "creating_excel",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    pub fn stage(&self) -> Option<u8> {
        match self {
            JobStatus::Queued => Some(0),
            JobStatus::Processing => Some(1),
            JobStatus::DetectingModules => Some(2),
            JobStatus::GeneratingQuestions => Some(3),
            JobStatus::CreatingExcel => Some(4),
            JobStatus::Completed => Some(5),
            JobStatus::Error => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// A running job may stay on its stage, advance exactly one stage, or fail.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.stage(), next.stage()) {
            (_, None) => true,
            (Some(current), Some(target)) => target == current || target == current + 1,
            (None, Some(_)) => false,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
