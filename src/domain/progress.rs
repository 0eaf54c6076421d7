use super::{Job, JobStatus};

pub const GENERATION_START_PERCENT: f64 = 30.0;
pub const GENERATION_SPAN_PERCENT: f64 = 60.0;
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressProjection {
    pub percentage: Option<u8>,
    pub message: String,
}

impl ProgressProjection {
    pub fn from_job(job: &Job) -> Self {
        let step = job.current_step.as_deref().filter(|s| !s.trim().is_empty());

        match job.status {
            JobStatus::Queued => Self::at(5, "Job queued..."),
            JobStatus::Processing => {
                Self::at(15, step.unwrap_or("Extracting text from PDFs..."))
            }
            JobStatus::DetectingModules => Self::at(
                25,
                step.unwrap_or("Analyzing syllabus to detect modules..."),
            ),
            JobStatus::GeneratingQuestions => Self {
                percentage: Some(generation_percentage(
                    job.completed_modules,
                    job.total_modules,
                )),
                message: generation_message(job),
            },
            JobStatus::CreatingExcel => Self::at(95, step.unwrap_or("Creating Excel file...")),
            JobStatus::Completed => Self::at(100, "Complete!"),
            JobStatus::Error => Self {
                percentage: None,
                message: job
                    .error
                    .clone()
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| "An error occurred during processing".to_string()),
            },
        }
    }

    fn at(percentage: u8, message: &str) -> Self {
        Self {
            percentage: Some(percentage),
            message: message.to_string(),
        }
    }
}

// 30 + (completed / total) * 60, rounded and clamped to [30, 90].
pub fn generation_percentage(completed_modules: usize, total_modules: usize) -> u8 {
    if total_modules == 0 {
        return GENERATION_START_PERCENT as u8;
    }
    let ratio = (completed_modules.min(total_modules) as f64) / (total_modules as f64);
    (GENERATION_START_PERCENT + ratio * GENERATION_SPAN_PERCENT).round() as u8
}

fn generation_message(job: &Job) -> String {
    match job.current_module.as_deref() {
        Some(module) => format!(
            "Generating questions for {} ({}/{} modules completed)",
            module, job.completed_modules, job.total_modules
        ),
        None => format!(
            "Generating questions... ({}/{} modules completed)",
            job.completed_modules, job.total_modules
        ),
    }
}
