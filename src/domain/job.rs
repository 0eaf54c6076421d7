use chrono::{DateTime, Utc};

use super::{JobId, JobStatus, ModuleProgress, StoragePath};

#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    pub current_step: Option<String>,
    pub modules: Vec<ModuleProgress>,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub current_module: Option<String>,
    pub error: Option<String>,
    pub result_path: Option<StoragePath>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new() -> Self {
        Self::with_id(JobId::new())
    }

    pub fn with_id(id: JobId) -> Self {
        let now = Utc::now();
        Self {
            id,
            status: JobStatus::Queued,
            current_step: None,
            modules: Vec::new(),
            total_modules: 0,
            completed_modules: 0,
            current_module: None,
            error: None,
            result_path: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    // Validated against a scratch copy; a rejected update leaves the job untouched.
    pub fn apply(&mut self, update: JobUpdate) -> Result<(), JobTransitionError> {
        if self.is_terminal() {
            return Err(JobTransitionError::Terminal(self.status));
        }

        let mut next = self.clone();

        if let Some(status) = update.status {
            if !self.status.can_transition_to(status) {
                return Err(JobTransitionError::OutOfOrder {
                    from: self.status,
                    to: status,
                });
            }
            next.status = status;
        }

        if let Some(step) = update.current_step {
            next.current_step = step;
        }
        if let Some(modules) = update.modules {
            next.modules = modules;
        }
        if let Some(total) = update.total_modules {
            next.total_modules = total;
        }
        if let Some(completed) = update.completed_modules {
            if completed < next.completed_modules {
                return Err(JobTransitionError::ProgressRegressed {
                    from: next.completed_modules,
                    to: completed,
                });
            }
            next.completed_modules = completed;
        }
        if let Some(module) = update.current_module {
            next.current_module = module;
        }

        match (update.error, next.status) {
            (Some(message), JobStatus::Error) if !message.trim().is_empty() => {
                next.error = Some(message);
            }
            (_, JobStatus::Error) => return Err(JobTransitionError::MissingErrorMessage),
            (Some(_), _) => return Err(JobTransitionError::UnexpectedErrorMessage(next.status)),
            (None, _) => {}
        }

        match (update.result_path, next.status) {
            (Some(path), JobStatus::Completed) => next.result_path = Some(path),
            (None, JobStatus::Completed) => return Err(JobTransitionError::MissingResultPath),
            (Some(_), status) => return Err(JobTransitionError::UnexpectedResultPath(status)),
            (None, _) => {}
        }

        if next.completed_modules > next.total_modules {
            return Err(JobTransitionError::ProgressOverflow {
                completed: next.completed_modules,
                total: next.total_modules,
            });
        }

        if next.status == JobStatus::Completed && next.total_modules == 0 {
            return Err(JobTransitionError::NoModules);
        }

        if next.status == JobStatus::Completed && next.completed_modules != next.total_modules {
            return Err(JobTransitionError::IncompleteModules {
                completed: next.completed_modules,
                total: next.total_modules,
            });
        }

        next.updated_at = Utc::now();
        *self = next;
        Ok(())
    }
}

impl Default for Job {
    fn default() -> Self {
        Self::new()
    }
}

// `Some(None)` on an optional field clears it.
#[derive(Debug, Clone, Default)]
pub struct JobUpdate {
    pub status: Option<JobStatus>,
    pub current_step: Option<Option<String>>,
    pub modules: Option<Vec<ModuleProgress>>,
    pub total_modules: Option<usize>,
    pub completed_modules: Option<usize>,
    pub current_module: Option<Option<String>>,
    pub error: Option<String>,
    pub result_path: Option<StoragePath>,
}

impl JobUpdate {
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn step(step: impl Into<String>) -> Self {
        Self::default().with_step(step)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Some(JobStatus::Error),
            error: Some(message.into()),
            current_step: Some(None),
            ..Self::default()
        }
    }

    pub fn completed(result_path: StoragePath) -> Self {
        Self {
            status: Some(JobStatus::Completed),
            result_path: Some(result_path),
            current_step: Some(None),
            current_module: Some(None),
            ..Self::default()
        }
    }

    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.current_step = Some(Some(step.into()));
        self
    }

    pub fn with_modules(mut self, modules: Vec<ModuleProgress>) -> Self {
        self.modules = Some(modules);
        self
    }

    pub fn with_total_modules(mut self, total: usize) -> Self {
        self.total_modules = Some(total);
        self
    }

    pub fn with_completed_modules(mut self, completed: usize) -> Self {
        self.completed_modules = Some(completed);
        self
    }

    pub fn with_current_module(mut self, module: impl Into<String>) -> Self {
        self.current_module = Some(Some(module.into()));
        self
    }

    pub fn clear_current_module(mut self) -> Self {
        self.current_module = Some(None);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobTransitionError {
    #[error("job is already {0}")]
    Terminal(JobStatus),
    #[error("cannot move job from {from} to {to}")]
    OutOfOrder { from: JobStatus, to: JobStatus },
    #[error("completed module count cannot go from {from} to {to}")]
    ProgressRegressed { from: usize, to: usize },
    #[error("completed modules ({completed}) exceed total modules ({total})")]
    ProgressOverflow { completed: usize, total: usize },
    #[error("job cannot complete without any modules")]
    NoModules,
    #[error("job cannot complete with {completed} of {total} modules done")]
    IncompleteModules { completed: usize, total: usize },
    #[error("error status requires a non-empty message")]
    MissingErrorMessage,
    #[error("error message given for non-error status {0}")]
    UnexpectedErrorMessage(JobStatus),
    #[error("completed status requires a result path")]
    MissingResultPath,
    #[error("result path given for non-completed status {0}")]
    UnexpectedResultPath(JobStatus),
}
