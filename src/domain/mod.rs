mod document;
mod job;
mod job_id;
mod job_status;
mod module;
mod progress;
mod question;
mod storage_path;

pub use document::{Document, DocumentRole, PDF_MIME, StagedDocument, is_pdf_upload};
pub use job::{Job, JobTransitionError, JobUpdate};
pub use job_id::JobId;
pub use job_status::JobStatus;
pub use module::{ModuleProgress, SyllabusModule};
pub use progress::{ProgressProjection, generation_percentage};
pub use question::{ModuleQuestions, Question, QuestionCounts, QuestionKind};
pub use storage_path::StoragePath;
