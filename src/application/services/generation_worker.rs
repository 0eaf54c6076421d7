use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::Instrument;

use crate::application::ports::{FileLoader, LlmClient};

use super::job_pipeline::{GenerationRequest, JobPipeline};
pub struct GenerationWorker<F: ?Sized, L: ?Sized> {
    receiver: mpsc::Receiver<GenerationRequest>,
    pipeline: Arc<JobPipeline<F, L>>,
    permits: Arc<Semaphore>,
    max_concurrent_jobs: usize,
}

impl<F, L> GenerationWorker<F, L>
where
    F: FileLoader + ?Sized + 'static,
    L: LlmClient + ?Sized + 'static,
{
    pub fn new(
        receiver: mpsc::Receiver<GenerationRequest>,
        pipeline: Arc<JobPipeline<F, L>>,
        max_concurrent_jobs: usize,
    ) -> Self {
        let max_concurrent_jobs = max_concurrent_jobs.max(1);
        Self {
            receiver,
            pipeline,
            permits: Arc::new(Semaphore::new(max_concurrent_jobs)),
            max_concurrent_jobs,
        }
    }
    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent_jobs = self.max_concurrent_jobs,
            "Generation worker started"
        );

        while let Some(request) = self.receiver.recv().await {
            let permit = match Arc::clone(&self.permits).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let pipeline = Arc::clone(&self.pipeline);
            let span = tracing::info_span!(
                "generation_job",
                job_id = %request.job_id,
                reference = %request.reference.document.filename,
                syllabus = %request.syllabus.document.filename,
            );

            tokio::spawn(
                async move {
                    let _permit = permit;
                    if let Err(e) = pipeline.process_job(request).await {
                        tracing::error!(error = %e, "Generation job failed");
                    }
                }
                .instrument(span),
            );
        }

        tracing::info!("Generation queue closed, waiting for running jobs");
        let _ = self
            .permits
            .acquire_many(self.max_concurrent_jobs as u32)
            .await;
        tracing::info!("Generation worker stopped");
    }
}
