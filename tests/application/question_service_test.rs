use std::sync::{Arc, Mutex};

use question_bank::application::ports::{
    CompletionPurpose, CompletionRequest, LlmClient, LlmClientError,
};
use question_bank::application::services::{
    GenerationOptions, QuestionService, QuestionServiceError,
};
use question_bank::domain::{QuestionCounts, QuestionKind, SyllabusModule};

/// Returns a fixed reply and remembers every request.
struct CannedLlmClient {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl CannedLlmClient {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for CannedLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

fn sorting_module() -> SyllabusModule {
    SyllabusModule::new("Module 1", "Sorting", "Ordering data", vec!["quicksort".to_string()])
}

#[tokio::test]
async fn given_detection_request_when_detecting_then_uses_detection_sampling_and_truncated_syllabus() {
    let client = Arc::new(CannedLlmClient::new(r#"[{"module_id": "Module 1", "title": "Sorting"}]"#));
    let service = QuestionService::new(Arc::clone(&client), GenerationOptions::default());
    let syllabus = "s".repeat(5000);

    let modules = service.detect_modules(&syllabus).await.unwrap();

    assert_eq!(modules.len(), 1);
    let requests = client.requests.lock().unwrap();
    let request = &requests[0];
    assert_eq!(request.purpose, CompletionPurpose::ModuleDetection);
    assert_eq!(request.temperature, 0.3);
    assert_eq!(request.max_tokens, 2000);
    let user = &request.messages.last().unwrap().content;
    assert!(user.ends_with(&"s".repeat(3000)));
    assert!(!user.contains(&"s".repeat(3001)));
}

#[tokio::test]
async fn given_extra_questions_when_generating_then_truncates_to_requested_counts() {
    let reply = "MULTIPLE CHOICE QUESTIONS:\nQ1. a?\nA) x\nQ2. b?\nA) y\nQ3. c?\nA) z\nSHORT ANSWER QUESTIONS:\nQ1. d?\nQ2. e?";
    let client = Arc::new(CannedLlmClient::new(reply));
    let service = QuestionService::new(client, GenerationOptions::default());

    let generated = service
        .generate_module_questions("ref", "syl", &sorting_module(), QuestionCounts::new(2, 1, 0), None)
        .await
        .unwrap();

    assert_eq!(generated.count_of(QuestionKind::MultipleChoice), 2);
    assert_eq!(generated.count_of(QuestionKind::ShortAnswer), 1);
    assert_eq!(generated.module.module_id, "Module 1");
}

#[tokio::test]
async fn given_custom_instructions_when_generating_then_prompt_carries_them_and_counts() {
    let client = Arc::new(CannedLlmClient::new("SHORT ANSWER QUESTIONS:\nQ1. Why?"));
    let service = QuestionService::new(Arc::clone(&client), GenerationOptions::default());

    service
        .generate_module_questions(
            "ref",
            "syl",
            &sorting_module(),
            QuestionCounts::new(4, 2, 1),
            Some("Focus on proofs"),
        )
        .await
        .unwrap();

    let requests = client.requests.lock().unwrap();
    let system = requests[0].system_prompt().unwrap();
    assert!(system.contains("- Module: Module 1"));
    assert!(system.contains("- 4 multiple-choice questions"));
    assert!(system.contains("- 2 short answer questions"));
    assert!(system.contains("- 1 long answer questions"));
    assert!(system.contains("ADDITIONAL INSTRUCTIONS:\nFocus on proofs"));
    assert_eq!(requests[0].temperature, 0.7);
    assert_eq!(requests[0].max_tokens, 3000);
}

#[tokio::test]
async fn given_unparseable_reply_when_generating_then_returns_no_questions_error() {
    let client = Arc::new(CannedLlmClient::new("Sorry, I cannot help with that."));
    let service = QuestionService::new(client, GenerationOptions::default());

    let result = service
        .generate_module_questions("ref", "syl", &sorting_module(), QuestionCounts::default(), None)
        .await;

    assert!(matches!(result, Err(QuestionServiceError::NoQuestionsParsed(id)) if id == "Module 1"));
}
