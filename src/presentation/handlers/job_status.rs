use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Job, JobId, JobStatus, ModuleProgress, ProgressProjection};
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub current_step: Option<String>,
    pub total_modules: usize,
    pub completed_modules: usize,
    pub current_module: Option<String>,
    pub modules: Vec<ModuleProgress>,
    pub error: Option<String>,
    pub progress: Option<u8>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Job> for JobStatusResponse {
    fn from(job: Job) -> Self {
        let projection = ProgressProjection::from_job(&job);
        let download_url = (job.status == JobStatus::Completed)
            .then(|| format!("/api/download/{}", job.id));

        Self {
            job_id: job.id.to_string(),
            status: job.status,
            current_step: job.current_step,
            total_modules: job.total_modules,
            completed_modules: job.completed_modules,
            current_module: job.current_module,
            modules: job.modules,
            error: job.error,
            progress: projection.percentage,
            message: projection.message,
            download_url,
            created_at: job.created_at.to_rfc3339(),
            updated_at: job.updated_at.to_rfc3339(),
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let uuid = match Uuid::parse_str(&job_id) {
        Ok(u) => u,
        Err(_) => {
            return error_response(StatusCode::BAD_REQUEST, format!("Invalid job ID: {}", job_id));
        }
    };

    match state.job_repository.get_by_id(JobId::from_uuid(uuid)).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobStatusResponse::from(job))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Job not found"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch job status");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to fetch job: {}", e),
            )
        }
    }
}
