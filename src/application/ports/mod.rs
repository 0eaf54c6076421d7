mod artifact_store;
mod file_loader;
mod job_repository;
mod llm_client;
mod repository_error;
mod workbook_writer;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use job_repository::JobRepository;
pub use llm_client::{
    ChatMessage, ChatRole, CompletionPurpose, CompletionRequest, LlmClient, LlmClientError,
};
pub use repository_error::RepositoryError;
pub use workbook_writer::{WorkbookWriter, WorkbookWriterError};
