use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, FileLoader, FileLoaderError, JobRepository, LlmClient,
    LlmClientError, RepositoryError, WorkbookWriter, WorkbookWriterError,
};
use crate::domain::{
    DocumentRole, JobId, JobStatus, JobUpdate, ModuleProgress, QuestionCounts, StagedDocument,
    StoragePath, SyllabusModule,
};

use super::question_service::{QuestionService, QuestionServiceError};
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub job_id: JobId,
    pub reference: StagedDocument,
    pub syllabus: StagedDocument,
    pub counts: QuestionCounts,
    pub custom_instructions: Option<String>,
}
pub struct JobPipeline<F: ?Sized, L: ?Sized> {
    file_loader: Arc<F>,
    question_service: QuestionService<L>,
    workbook_writer: Arc<dyn WorkbookWriter>,
    job_repository: Arc<dyn JobRepository>,
    artifact_store: Arc<dyn ArtifactStore>,
    keep_uploads: bool,
}

impl<F, L> JobPipeline<F, L>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    pub fn new(
        file_loader: Arc<F>,
        question_service: QuestionService<L>,
        workbook_writer: Arc<dyn WorkbookWriter>,
        job_repository: Arc<dyn JobRepository>,
        artifact_store: Arc<dyn ArtifactStore>,
        keep_uploads: bool,
    ) -> Self {
        Self {
            file_loader,
            question_service,
            workbook_writer,
            job_repository,
            artifact_store,
            keep_uploads,
        }
    }

    pub async fn process_job(&self, request: GenerationRequest) -> Result<(), PipelineError> {
        let job_id = request.job_id;

        let result = self.run_pipeline(&request).await;

        if !self.keep_uploads {
            for staged in [&request.reference, &request.syllabus] {
                if let Err(e) = self.artifact_store.delete(&staged.storage_path).await {
                    tracing::warn!(
                        error = %e,
                        path = %staged.storage_path,
                        "Failed to delete staged upload"
                    );
                }
            }
        }

        match &result {
            Ok(path) => {
                tracing::info!(result_path = %path, "Question bank generated");
            }
            Err(e) => {
                tracing::error!(error = %e, "Generation pipeline failed");
                self.update(job_id, JobUpdate::failed(e.user_message()))
                    .await?;
            }
        }

        result.map(|_| ())
    }

    async fn run_pipeline(
        &self,
        request: &GenerationRequest,
    ) -> Result<StoragePath, PipelineError> {
        let job_id = request.job_id;

        self.update(
            job_id,
            JobUpdate::status(JobStatus::Processing)
                .with_step("Extracting text from reference book..."),
        )
        .await?;
        let reference_text = self.extract(&request.reference).await?;

        self.update(job_id, JobUpdate::step("Extracting text from syllabus..."))
            .await?;
        let syllabus_text = self.extract(&request.syllabus).await?;

        self.update(
            job_id,
            JobUpdate::status(JobStatus::DetectingModules)
                .with_step("Analyzing syllabus to detect modules..."),
        )
        .await?;
        let mut modules = self
            .question_service
            .detect_modules(&syllabus_text)
            .await
            .map_err(PipelineError::ModuleDetection)?;
        if modules.is_empty() {
            tracing::warn!("No modules detected, treating the syllabus as a single module");
            modules.push(SyllabusModule::whole_syllabus());
        }

        let total = modules.len();
        let mut progress: Vec<ModuleProgress> = modules.iter().map(ModuleProgress::from).collect();
        self.update(
            job_id,
            JobUpdate::status(JobStatus::GeneratingQuestions)
                .with_modules(progress.clone())
                .with_total_modules(total)
                .with_completed_modules(0)
                .with_step(format!("Detected {} modules", total)),
        )
        .await?;

        let mut generated = Vec::with_capacity(total);
        for (index, module) in modules.iter().enumerate() {
            self.update(
                job_id,
                JobUpdate::step(format!(
                    "Generating questions for {} ({}/{})",
                    module.module_id,
                    index + 1,
                    total
                ))
                .with_current_module(module.title.clone()),
            )
            .await?;

            let questions = self
                .question_service
                .generate_module_questions(
                    &reference_text,
                    &syllabus_text,
                    module,
                    request.counts,
                    request.custom_instructions.as_deref(),
                )
                .await
                .map_err(|source| PipelineError::QuestionGeneration {
                    module_id: module.module_id.clone(),
                    source,
                })?;

            tracing::debug!(
                module_id = %module.module_id,
                question_count = questions.len(),
                "Module questions generated"
            );
            progress[index].mark_completed(questions.len());
            self.update(
                job_id,
                JobUpdate::default()
                    .with_completed_modules(index + 1)
                    .with_modules(progress.clone()),
            )
            .await?;
            generated.push(questions);
        }

        self.update(
            job_id,
            JobUpdate::status(JobStatus::CreatingExcel)
                .with_step("Creating Excel file...")
                .clear_current_module(),
        )
        .await?;

        let writer = Arc::clone(&self.workbook_writer);
        let workbook = tokio::task::spawn_blocking(move || writer.write(&generated))
            .await
            .map_err(|e| WorkbookWriterError::Task(e.to_string()))??;

        let result_path = StoragePath::workbook(job_id);
        self.artifact_store
            .put(&result_path, Bytes::from(workbook))
            .await?;

        if let Err(e) = self
            .update(job_id, JobUpdate::completed(result_path.clone()))
            .await
        {
            let _ = self.artifact_store.delete(&result_path).await;
            return Err(e);
        }

        Ok(result_path)
    }

    async fn extract(&self, staged: &StagedDocument) -> Result<String, PipelineError> {
        let role = staged.document.role;
        let data = self.artifact_store.fetch(&staged.storage_path).await?;

        let text = self
            .file_loader
            .extract_text(&data, &staged.document)
            .await
            .map_err(|source| match source {
                FileLoaderError::NoTextFound(_) => PipelineError::NoTextExtracted(role),
                source => PipelineError::Extraction { role, source },
            })?;

        if text.trim().is_empty() {
            return Err(PipelineError::NoTextExtracted(role));
        }

        tracing::info!(role = %role, chars = text.chars().count(), "Text extracted");
        Ok(text)
    }

    async fn update(&self, job_id: JobId, update: JobUpdate) -> Result<(), PipelineError> {
        if let Some(status) = update.status {
            tracing::debug!(status = %status, "Job status transition");
        }
        self.job_repository
            .update(job_id, update)
            .await
            .map(|_| ())
            .map_err(PipelineError::Repository)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No text could be extracted from the {0} PDF.")]
    NoTextExtracted(DocumentRole),
    #[error("Failed to extract text from the {role} PDF: {source}")]
    Extraction {
        role: DocumentRole,
        #[source]
        source: FileLoaderError,
    },
    #[error("Failed to detect modules: {0}")]
    ModuleDetection(#[source] QuestionServiceError),
    #[error("Failed to generate questions for {module_id}: {source}")]
    QuestionGeneration {
        module_id: String,
        #[source]
        source: QuestionServiceError,
    },
    #[error("Failed to create Excel file: {0}")]
    Workbook(#[from] WorkbookWriterError),
    #[error("storage: {0}")]
    Storage(#[from] ArtifactStoreError),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
}

impl PipelineError {
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::ModuleDetection(QuestionServiceError::Llm(e))
            | PipelineError::QuestionGeneration {
                source: QuestionServiceError::Llm(e),
                ..
            } if matches!(e, LlmClientError::RateLimited | LlmClientError::Unauthorized) => {
                e.to_string()
            }
            other => other.to_string(),
        }
    }
}
