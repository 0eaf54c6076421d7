mod download;
mod error;
mod health;
mod job_status;
mod upload;

pub use download::{DOWNLOAD_FILENAME, XLSX_MIME, download_handler};
pub use error::{ErrorResponse, error_response};
pub use health::{HealthResponse, health_handler};
pub use job_status::{JobStatusResponse, job_status_handler};
pub use upload::{UploadResponse, UploadValidationError, upload_handler};
