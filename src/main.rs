use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use question_bank::application::ports::{
    ArtifactStore, CompletionRequest, JobRepository, LlmClient, WorkbookWriter,
};
use question_bank::application::services::{
    GenerationOptions, GenerationWorker, JobPipeline, QuestionService,
};
use question_bank::infrastructure::llm::LlmClientFactory;
use question_bank::infrastructure::observability::{TracingConfig, init_tracing};
use question_bank::infrastructure::persistence::InMemoryJobRepository;
use question_bank::infrastructure::spreadsheet::XlsxWorkbookWriter;
use question_bank::infrastructure::storage::ObjectArtifactStore;
use question_bank::infrastructure::text_processing::{ExtractionLimits, PdfAdapter};
use question_bank::presentation::config::{Environment, Settings};
use question_bank::presentation::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load configuration")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let llm_client = LlmClientFactory::create(&settings.llm)?;
    if settings.llm.validate_on_startup {
        validate_llm(llm_client.as_ref()).await;
    }

    let file_loader = Arc::new(PdfAdapter::new(ExtractionLimits::from_settings(
        &settings.extraction,
    )));
    let workbook_writer: Arc<dyn WorkbookWriter> = Arc::new(XlsxWorkbookWriter::new());
    let artifact_store: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::local(
        PathBuf::from(&settings.storage.base_path),
    )?);
    let job_repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());

    let question_service = QuestionService::new(
        llm_client,
        GenerationOptions {
            detection_temperature: settings.generation.detection_temperature,
            detection_max_tokens: settings.generation.detection_max_tokens,
            question_temperature: settings.generation.question_temperature,
            question_max_tokens: settings.generation.question_max_tokens,
        },
    );

    let pipeline = Arc::new(JobPipeline::new(
        file_loader,
        question_service,
        workbook_writer,
        Arc::clone(&job_repository),
        Arc::clone(&artifact_store),
        settings.storage.keep_uploads,
    ));

    let (job_sender, job_receiver) = mpsc::channel(settings.worker.queue_capacity.max(1));
    let worker = GenerationWorker::new(job_receiver, pipeline, settings.worker.max_concurrent_jobs);
    let worker_handle = tokio::spawn(worker.run());

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host/port")?;
    let shutdown_grace = Duration::from_secs(settings.worker.shutdown_grace_secs);

    let state = AppState {
        job_repository,
        artifact_store,
        job_sender,
        settings: Arc::new(settings),
    };
    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = %environment, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router, and with it the last job sender, is gone; the worker drains.
    match tokio::time::timeout(shutdown_grace, worker_handle).await {
        Ok(Ok(())) => tracing::info!("Shutdown complete"),
        Ok(Err(e)) => tracing::error!(error = %e, "Generation worker panicked"),
        Err(_) => tracing::warn!("Generation worker still busy at shutdown, abandoning jobs"),
    }

    Ok(())
}

async fn validate_llm(client: &dyn LlmClient) {
    match client.complete(&CompletionRequest::connection_check()).await {
        Ok(_) => tracing::info!("LLM connection validated"),
        Err(e) => tracing::warn!(error = %e, "LLM validation failed; jobs may error"),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
