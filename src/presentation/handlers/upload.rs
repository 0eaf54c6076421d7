use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::services::GenerationRequest;
use crate::domain::{
    Document, DocumentRole, Job, JobId, JobUpdate, PDF_MIME, QuestionCounts, StagedDocument,
    StoragePath, is_pdf_upload,
};
use crate::presentation::config::GenerationSettings;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Serialize)]
pub struct UploadResponse {
    pub job_id: String,
}

struct UploadedFile {
    filename: String,
    content_type: Option<String>,
    data: Bytes,
}

#[derive(Default)]
struct UploadForm {
    reference: Option<UploadedFile>,
    syllabus: Option<UploadedFile>,
    mcq_count: Option<String>,
    short_count: Option<String>,
    long_count: Option<String>,
    custom_instructions: Option<String>,
}
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadValidationError {
    #[error("Missing required files")]
    MissingFiles,
    #[error("No selected file")]
    EmptyFilename,
    #[error("Invalid file type. Only PDF files are allowed")]
    NotPdf,
    #[error("{field} must be a whole number between 0 and {max}")]
    InvalidCount { field: &'static str, max: usize },
    #[error("At least one question must be requested")]
    NoQuestionsRequested,
    #[error("Failed to read upload: {0}")]
    Malformed(String),
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, UploadValidationError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadValidationError::Malformed(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == DocumentRole::Reference.form_field() || name == DocumentRole::Syllabus.form_field()
        {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(String::from);
            let data = field
                .bytes()
                .await
                .map_err(|e| UploadValidationError::Malformed(e.to_string()))?;
            let file = UploadedFile {
                filename,
                content_type,
                data,
            };
            if name == DocumentRole::Reference.form_field() {
                form.reference = Some(file);
            } else {
                form.syllabus = Some(file);
            }
            continue;
        }

        let slot = match name.as_str() {
            "mcq_count" => &mut form.mcq_count,
            "short_count" => &mut form.short_count,
            "long_count" => &mut form.long_count,
            "custom_instructions" => &mut form.custom_instructions,
            other => {
                tracing::debug!(field = %other, "Ignoring unknown form field");
                continue;
            }
        };
        *slot = Some(
            field
                .text()
                .await
                .map_err(|e| UploadValidationError::Malformed(e.to_string()))?,
        );
    }

    Ok(form)
}

fn validate_file(file: &UploadedFile) -> Result<(), UploadValidationError> {
    if file.filename.trim().is_empty() {
        return Err(UploadValidationError::EmptyFilename);
    }
    if !is_pdf_upload(&file.filename, file.content_type.as_deref()) {
        return Err(UploadValidationError::NotPdf);
    }
    Ok(())
}

fn parse_count(
    raw: Option<&str>,
    field: &'static str,
    default: usize,
    max: usize,
) -> Result<usize, UploadValidationError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };
    match raw.parse::<usize>() {
        Ok(n) if n <= max => Ok(n),
        _ => Err(UploadValidationError::InvalidCount { field, max }),
    }
}
fn validate_form(
    form: UploadForm,
    generation: &GenerationSettings,
) -> Result<(UploadedFile, UploadedFile, QuestionCounts, Option<String>), UploadValidationError> {
    let (Some(reference), Some(syllabus)) = (form.reference, form.syllabus) else {
        return Err(UploadValidationError::MissingFiles);
    };
    validate_file(&reference)?;
    validate_file(&syllabus)?;

    let max = generation.max_questions_per_type;
    let counts = QuestionCounts::new(
        parse_count(form.mcq_count.as_deref(), "mcq_count", generation.default_mcq_count, max)?,
        parse_count(
            form.short_count.as_deref(),
            "short_count",
            generation.default_short_count,
            max,
        )?,
        parse_count(form.long_count.as_deref(), "long_count", generation.default_long_count, max)?,
    );
    if counts.total() == 0 {
        return Err(UploadValidationError::NoQuestionsRequested);
    }

    let custom_instructions = form
        .custom_instructions
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok((reference, syllabus, counts, custom_instructions))
}

async fn stage(
    state: &AppState,
    job_id: JobId,
    role: DocumentRole,
    file: UploadedFile,
) -> Result<StagedDocument, Response> {
    let storage_path = StoragePath::upload(job_id, role);
    let size_bytes = state
        .artifact_store
        .put(&storage_path, file.data)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %role, "Failed to stage upload");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to store upload: {}", e),
            )
        })?;

    let document = Document::new(
        role,
        file.filename,
        file.content_type.unwrap_or_else(|| PDF_MIME.to_string()),
        size_bytes,
    );
    Ok(StagedDocument {
        document,
        storage_path,
    })
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let validated = match read_form(&mut multipart).await {
        Ok(form) => validate_form(form, &state.settings.generation),
        Err(e) => Err(e),
    };
    let (reference, syllabus, counts, custom_instructions) = match validated {
        Ok(parts) => parts,
        Err(e) => {
            tracing::warn!(error = %e, "Upload rejected");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let job = Job::new();
    let job_id = job.id;

    let reference = match stage(&state, job_id, DocumentRole::Reference, reference).await {
        Ok(staged) => staged,
        Err(response) => return response,
    };
    let syllabus = match stage(&state, job_id, DocumentRole::Syllabus, syllabus).await {
        Ok(staged) => staged,
        Err(response) => {
            let _ = state.artifact_store.delete(&reference.storage_path).await;
            return response;
        }
    };

    if let Err(e) = state.job_repository.create(&job).await {
        tracing::error!(error = %e, "Failed to create job record");
        for staged in [&reference, &syllabus] {
            let _ = state.artifact_store.delete(&staged.storage_path).await;
        }
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to create job: {}", e),
        );
    }

    let request = GenerationRequest {
        job_id,
        reference,
        syllabus,
        counts,
        custom_instructions,
    };

    if let Err(e) = state.job_sender.try_send(request) {
        let (reason, request) = match e {
            TrySendError::Full(r) => ("Job queue is full, please try again later", r),
            TrySendError::Closed(r) => ("Job worker is not running", r),
        };
        tracing::error!(job_id = %job_id, reason, "Failed to enqueue generation job");

        if let Err(e) = state
            .job_repository
            .update(job_id, JobUpdate::failed(reason))
            .await
        {
            tracing::error!(error = %e, "Failed to mark rejected job as errored");
        }
        for staged in [&request.reference, &request.syllabus] {
            let _ = state.artifact_store.delete(&staged.storage_path).await;
        }
        return error_response(StatusCode::SERVICE_UNAVAILABLE, reason);
    }

    tracing::info!(
        job_id = %job_id,
        mcq = counts.mcq,
        short = counts.short,
        long = counts.long,
        "Question generation job enqueued"
    );

    (
        StatusCode::OK,
        Json(UploadResponse {
            job_id: job_id.to_string(),
        }),
    )
        .into_response()
}
