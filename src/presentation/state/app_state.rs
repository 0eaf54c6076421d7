use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::{ArtifactStore, JobRepository};
use crate::application::services::GenerationRequest;
use crate::presentation::config::Settings;
#[derive(Clone)]
pub struct AppState {
    pub job_repository: Arc<dyn JobRepository>,
    pub artifact_store: Arc<dyn ArtifactStore>,
    pub job_sender: mpsc::Sender<GenerationRequest>,
    pub settings: Arc<Settings>,
}
