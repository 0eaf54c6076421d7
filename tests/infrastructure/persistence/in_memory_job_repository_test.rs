use question_bank::application::ports::{JobRepository, RepositoryError};
use question_bank::domain::{Job, JobId, JobStatus, JobTransitionError, JobUpdate};
use question_bank::infrastructure::persistence::InMemoryJobRepository;

#[tokio::test]
async fn given_created_job_when_fetching_then_returns_queued_snapshot() {
    let repo = InMemoryJobRepository::new();
    let job = Job::new();

    repo.create(&job).await.unwrap();
    let fetched = repo.get_by_id(job.id).await.unwrap().unwrap();

    assert_eq!(fetched.id, job.id);
    assert_eq!(fetched.status, JobStatus::Queued);
}

#[tokio::test]
async fn given_existing_id_when_creating_again_then_constraint_violation() {
    let repo = InMemoryJobRepository::new();
    let job = Job::new();
    repo.create(&job).await.unwrap();

    let result = repo.create(&job).await;

    assert!(matches!(result, Err(RepositoryError::ConstraintViolation(_))));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn given_unknown_id_when_fetching_then_returns_none() {
    let repo = InMemoryJobRepository::new();

    assert!(repo.get_by_id(JobId::new()).await.unwrap().is_none());
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn given_unknown_id_when_updating_then_not_found() {
    let repo = InMemoryJobRepository::new();

    let result = repo.update(JobId::new(), JobUpdate::step("x")).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

#[tokio::test]
async fn given_valid_update_when_applying_then_returns_and_stores_new_snapshot() {
    let repo = InMemoryJobRepository::new();
    let job = Job::new();
    repo.create(&job).await.unwrap();

    let updated = repo
        .update(
            job.id,
            JobUpdate::status(JobStatus::Processing).with_step("Extracting text..."),
        )
        .await
        .unwrap();

    assert_eq!(updated.status, JobStatus::Processing);
    let stored = repo.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.current_step.as_deref(), Some("Extracting text..."));
}

#[tokio::test]
async fn given_backward_update_when_applying_then_rejected_and_snapshot_kept() {
    let repo = InMemoryJobRepository::new();
    let job = Job::new();
    repo.create(&job).await.unwrap();
    for status in [JobStatus::Processing, JobStatus::DetectingModules] {
        repo.update(job.id, JobUpdate::status(status)).await.unwrap();
    }

    let result = repo
        .update(job.id, JobUpdate::status(JobStatus::Processing))
        .await;

    assert!(matches!(
        result,
        Err(RepositoryError::InvalidTransition(JobTransitionError::OutOfOrder { .. }))
    ));
    let stored = repo.get_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(stored.status, JobStatus::DetectingModules);
}

#[tokio::test]
async fn given_snapshot_when_repository_changes_later_then_snapshot_is_unaffected() {
    let repo = InMemoryJobRepository::new();
    let job = Job::new();
    repo.create(&job).await.unwrap();
    let before = repo.get_by_id(job.id).await.unwrap().unwrap();

    repo.update(job.id, JobUpdate::failed("boom")).await.unwrap();

    assert_eq!(before.status, JobStatus::Queued);
}
