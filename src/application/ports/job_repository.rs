use async_trait::async_trait;

use crate::domain::{Job, JobId, JobUpdate};

use super::RepositoryError;
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn create(&self, job: &Job) -> Result<(), RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    async fn update(&self, id: JobId, update: JobUpdate) -> Result<Job, RepositoryError>;
}
