use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use crate::application::ports::ArtifactStoreError;
use crate::domain::{JobId, JobStatus};
use crate::presentation::state::AppState;

use super::error::error_response;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const DOWNLOAD_FILENAME: &str = "question_bank.xlsx";

const NOT_READY: &str = "File not ready or job not found";

#[tracing::instrument(skip(state))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Ok(uuid) = Uuid::parse_str(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, NOT_READY);
    };

    let job = match state.job_repository.get_by_id(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => job,
        Ok(None) => return error_response(StatusCode::NOT_FOUND, NOT_READY),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job for download");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch job: {}", e),
            );
        }
    };

    let Some(path) = job.result_path.filter(|_| job.status == JobStatus::Completed) else {
        return error_response(StatusCode::NOT_FOUND, NOT_READY);
    };

    match state.artifact_store.fetch(&path).await {
        Ok(bytes) => {
            tracing::info!(bytes = bytes.len(), "Serving question bank");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_MIME.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", DOWNLOAD_FILENAME),
                    ),
                ],
                bytes,
            )
                .into_response()
        }
        Err(ArtifactStoreError::NotFound(_)) => {
            tracing::warn!(path = %path, "Workbook missing from storage");
            error_response(StatusCode::NOT_FOUND, NOT_READY)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read workbook");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read file: {}", e),
            )
        }
    }
}
