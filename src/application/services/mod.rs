mod generation_worker;
mod job_pipeline;
mod module_context;
mod module_parser;
mod question_parser;
mod question_service;

pub use generation_worker::GenerationWorker;
pub use job_pipeline::{GenerationRequest, JobPipeline, PipelineError};
pub use module_context::{select_module_context, truncate_chars};
pub use module_parser::parse_modules;
pub use question_parser::parse_questions;
pub use question_service::{GenerationOptions, QuestionService, QuestionServiceError};
