use std::fmt::Write as _;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::application::ports::{
    CompletionPurpose, CompletionRequest, LlmClient, LlmClientError,
};

static MODULE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- Module: (.+)$").unwrap());
static MCQ_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (\d+) multiple-choice").unwrap());
static SHORT_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (\d+) short answer").unwrap());
static LONG_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (\d+) long answer").unwrap());
pub struct MockLlmClient {
    module_count: usize,
    delay: Duration,
}

impl MockLlmClient {
    pub fn new(module_count: usize, delay: Duration) -> Self {
        Self {
            module_count,
            delay,
        }
    }

    fn detection_reply(&self) -> String {
        let modules: Vec<serde_json::Value> = (1..=self.module_count)
            .map(|n| {
                serde_json::json!({
                    "module_id": format!("Module {}", n),
                    "title": format!("Sample Topic {}", n),
                    "description": format!("Placeholder content for module {}", n),
                    "topics": [format!("Concept {}.1", n), format!("Concept {}.2", n)],
                })
            })
            .collect();
        serde_json::Value::Array(modules).to_string()
    }

    fn generation_reply(prompt: &str) -> String {
        let module = MODULE_LINE
            .captures(prompt)
            .map(|c| c[1].trim().to_string())
            .unwrap_or_else(|| "Module".to_string());
        let count = |re: &Regex| -> usize {
            re.captures(prompt)
                .and_then(|c| c[1].parse().ok())
                .unwrap_or(0)
        };

        let mut reply = String::new();
        let _ = writeln!(reply, "MULTIPLE CHOICE QUESTIONS - {}:", module);
        for n in 1..=count(&MCQ_COUNT) {
            let _ = writeln!(reply, "Q{}. Which statement about {} is correct?", n, module);
            let _ = writeln!(reply, "A) The first statement");
            let _ = writeln!(reply, "B) The second statement");
            let _ = writeln!(reply, "C) The third statement");
            let _ = writeln!(reply, "D) The fourth statement");
            let _ = writeln!(reply, "Answer: A");
        }
        let _ = writeln!(reply, "\nSHORT ANSWER QUESTIONS - {}:", module);
        for n in 1..=count(&SHORT_COUNT) {
            let _ = writeln!(reply, "Q{}. Briefly define a key term from {}.", n, module);
        }
        let _ = writeln!(reply, "\nLONG ANSWER QUESTIONS - {}:", module);
        for n in 1..=count(&LONG_COUNT) {
            let _ = writeln!(reply, "Q{}. Discuss the main ideas of {} in detail.", n, module);
        }
        reply
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match request.purpose {
            CompletionPurpose::ModuleDetection => Ok(self.detection_reply()),
            CompletionPurpose::QuestionGeneration => Ok(Self::generation_reply(
                request.system_prompt().unwrap_or_default(),
            )),
            CompletionPurpose::ConnectionCheck => Ok("OK".to_string()),
        }
    }
}
