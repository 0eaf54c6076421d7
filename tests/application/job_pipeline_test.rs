use question_bank::application::ports::{ArtifactStore, ArtifactStoreError, LlmClientError};
use question_bank::domain::{JobStatus, QuestionKind, StoragePath};

use crate::support::{PipelineHarness, REFERENCE_TEXT, SYLLABUS_TEXT, ScriptedLlmClient};

#[tokio::test]
async fn given_three_modules_when_processing_then_workbook_has_three_sets_of_ten_questions() {
    let harness = PipelineHarness::new(ScriptedLlmClient::with_modules(3));
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    harness.pipeline.process_job(request).await.unwrap();

    let written = harness.writer.written.lock().unwrap().clone();
    assert_eq!(written.len(), 1);
    let modules = &written[0];
    assert_eq!(modules.len(), 3);
    for set in modules {
        assert_eq!(set.len(), 10);
        assert_eq!(set.count_of(QuestionKind::MultipleChoice), 5);
        assert_eq!(set.count_of(QuestionKind::ShortAnswer), 3);
        assert_eq!(set.count_of(QuestionKind::LongAnswer), 2);
    }

    let job = harness.job(job_id).await;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.total_modules, 3);
    assert_eq!(job.completed_modules, 3);
    assert!(job.modules.iter().all(|m| m.completed));
    assert!(job.error.is_none());
    assert!(job.current_module.is_none());
    assert_eq!(job.result_path, Some(StoragePath::workbook(job_id)));
}

#[tokio::test]
async fn given_completed_job_when_fetching_result_then_workbook_bytes_are_stored() {
    let harness = PipelineHarness::new(ScriptedLlmClient::with_modules(2));
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    harness.pipeline.process_job(request).await.unwrap();

    let job = harness.job(job_id).await;
    let bytes = harness
        .store
        .fetch(job.result_path.as_ref().unwrap())
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"workbook");
}

#[tokio::test]
async fn given_processed_job_when_checking_uploads_then_staged_files_are_removed() {
    let harness = PipelineHarness::new(ScriptedLlmClient::with_modules(1));
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let reference_path = request.reference.storage_path.clone();

    harness.pipeline.process_job(request).await.unwrap();

    let result = harness.store.fetch(&reference_path).await;
    assert!(matches!(result, Err(ArtifactStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_no_modules_detected_when_processing_then_single_fallback_module_completes() {
    let harness =
        PipelineHarness::new(ScriptedLlmClient::with_modules(0).detection_reply("Nothing here."));
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    harness.pipeline.process_job(request).await.unwrap();

    let job = harness.job(job_id).await;
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.total_modules, 1);
    assert_eq!(job.completed_modules, 1);
    assert_eq!(job.modules[0].module_id, "Module 1");
    assert_eq!(job.modules[0].title, "Complete Syllabus");
}

#[tokio::test]
async fn given_llm_failure_in_second_module_when_processing_then_job_errors_with_one_completed() {
    let harness = PipelineHarness::new(
        ScriptedLlmClient::with_modules(3).failing_generation_call(2, || {
            LlmClientError::ApiRequestFailed("connection reset".to_string())
        }),
    );
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    let result = harness.pipeline.process_job(request).await;
    assert!(result.is_err());

    let job = harness.job(job_id).await;
    assert_eq!(job.status, JobStatus::Error);
    assert_eq!(job.completed_modules, 1);
    assert_eq!(job.total_modules, 3);
    assert!(job.result_path.is_none());
    let error = job.error.unwrap();
    assert!(error.starts_with("Failed to generate questions for Module 2"));
    assert!(error.contains("connection reset"));

    assert!(harness.writer.written.lock().unwrap().is_empty());
    let stored = harness.store.fetch(&StoragePath::workbook(job_id)).await;
    assert!(matches!(stored, Err(ArtifactStoreError::NotFound(_))));
    assert_eq!(harness.llm.generation_calls(), 2);
}

#[tokio::test]
async fn given_quota_exhausted_when_processing_then_job_error_is_quota_message() {
    let harness = PipelineHarness::new(
        ScriptedLlmClient::with_modules(2).failing_generation_call(1, || LlmClientError::RateLimited),
    );
    let request = harness.submit(REFERENCE_TEXT, SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    let _ = harness.pipeline.process_job(request).await;

    let job = harness.job(job_id).await;
    assert_eq!(
        job.error.as_deref(),
        Some("API quota exceeded. Please add credits to your OpenAI account and try again.")
    );
}

#[tokio::test]
async fn given_empty_reference_when_processing_then_job_errors_with_no_text_message() {
    let harness = PipelineHarness::new(ScriptedLlmClient::with_modules(2));
    let request = harness.submit("   ", SYLLABUS_TEXT).await;
    let job_id = request.job_id;

    let _ = harness.pipeline.process_job(request).await;

    let job = harness.job(job_id).await;
    assert_eq!(job.status, JobStatus::Error);
    assert_eq!(
        job.error.as_deref(),
        Some("No text could be extracted from the reference PDF.")
    );
    assert_eq!(harness.llm.generation_calls(), 0);
}

#[tokio::test]
async fn given_empty_syllabus_when_processing_then_job_errors_naming_syllabus() {
    let harness = PipelineHarness::new(ScriptedLlmClient::with_modules(2));
    let request = harness.submit(REFERENCE_TEXT, "").await;
    let job_id = request.job_id;

    let _ = harness.pipeline.process_job(request).await;

    let job = harness.job(job_id).await;
    assert_eq!(
        job.error.as_deref(),
        Some("No text could be extracted from the syllabus PDF.")
    );
}
