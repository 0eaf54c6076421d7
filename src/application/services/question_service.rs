use std::sync::Arc;

use crate::application::ports::{
    ChatMessage, CompletionPurpose, CompletionRequest, LlmClient, LlmClientError,
};
use crate::domain::{ModuleQuestions, QuestionCounts, QuestionKind, SyllabusModule};

use super::module_context::{select_module_context, truncate_chars};
use super::module_parser::parse_modules;
use super::question_parser::parse_questions;

const DETECTION_SYLLABUS_CHARS: usize = 3000;
const MODULE_SYLLABUS_CHARS: usize = 1500;
const MODULE_CONTEXT_CHARS: usize = 3000;

const DETECTION_SYSTEM_PROMPT: &str = r#"You are an expert curriculum analyzer. Your task is to identify and extract distinct modules, units, chapters, or topics from a syllabus.

Analyze the syllabus text and identify all modules/units/chapters. Return a structured JSON response with:
1. Module number/identifier
2. Module title/name
3. Brief description of module content
4. Key topics covered in that module

Format your response as a JSON array like this:
[
  {
    "module_id": "Module 1" or "Unit A" or "Chapter 1" (use the exact format from syllabus),
    "title": "Module title or name",
    "description": "Brief description of what this module covers",
    "topics": ["topic1", "topic2", "topic3"]
  }
]

If no clear modules are found, create logical groupings based on content themes.
Ensure each module has sufficient content to generate meaningful questions."#;
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub detection_temperature: f32,
    pub detection_max_tokens: usize,
    pub question_temperature: f32,
    pub question_max_tokens: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            detection_temperature: 0.3,
            detection_max_tokens: 2000,
            question_temperature: 0.7,
            question_max_tokens: 3000,
        }
    }
}
pub struct QuestionService<L: ?Sized> {
    llm_client: Arc<L>,
    options: GenerationOptions,
}

impl<L> QuestionService<L>
where
    L: LlmClient + ?Sized,
{
    pub fn new(llm_client: Arc<L>, options: GenerationOptions) -> Self {
        Self {
            llm_client,
            options,
        }
    }
    pub async fn detect_modules(
        &self,
        syllabus_text: &str,
    ) -> Result<Vec<SyllabusModule>, QuestionServiceError> {
        let request = CompletionRequest {
            purpose: CompletionPurpose::ModuleDetection,
            messages: vec![
                ChatMessage::system(DETECTION_SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Analyze this syllabus and extract modules:\n\n{}",
                    truncate_chars(syllabus_text, DETECTION_SYLLABUS_CHARS)
                )),
            ],
            temperature: self.options.detection_temperature,
            max_tokens: self.options.detection_max_tokens,
        };

        let content = self.llm_client.complete(&request).await?;
        let modules = parse_modules(&content);
        tracing::info!(module_count = modules.len(), "Modules detected");

        Ok(modules)
    }

    pub async fn generate_module_questions(
        &self,
        reference_text: &str,
        syllabus_text: &str,
        module: &SyllabusModule,
        counts: QuestionCounts,
        custom_instructions: Option<&str>,
    ) -> Result<ModuleQuestions, QuestionServiceError> {
        let context = select_module_context(reference_text, module);

        let request = CompletionRequest {
            purpose: CompletionPurpose::QuestionGeneration,
            messages: vec![
                ChatMessage::system(module_system_prompt(module, counts, custom_instructions)),
                ChatMessage::user(format!(
                    "MODULE SYLLABUS CONTENT: {}",
                    truncate_chars(syllabus_text, MODULE_SYLLABUS_CHARS)
                )),
                ChatMessage::user(format!(
                    "RELEVANT REFERENCE MATERIAL: {}",
                    truncate_chars(&context, MODULE_CONTEXT_CHARS)
                )),
            ],
            temperature: self.options.question_temperature,
            max_tokens: self.options.question_max_tokens,
        };

        let content = self.llm_client.complete(&request).await?;
        let questions = parse_questions(&content);
        if questions.is_empty() {
            return Err(QuestionServiceError::NoQuestionsParsed(
                module.module_id.clone(),
            ));
        }

        let mut generated = ModuleQuestions::new(module.clone(), questions);
        generated.truncate_to(counts);

        for kind in QuestionKind::ALL {
            let (got, wanted) = (generated.count_of(kind), counts.for_kind(kind));
            if got < wanted {
                tracing::warn!(
                    module_id = %module.module_id,
                    kind = %kind,
                    got,
                    wanted,
                    "Fewer questions generated than requested"
                );
            }
        }

        Ok(generated)
    }
}

fn module_system_prompt(
    module: &SyllabusModule,
    counts: QuestionCounts,
    custom_instructions: Option<&str>,
) -> String {
    let topics = if module.topics.is_empty() {
        "Not specified".to_string()
    } else {
        module.topics.join(", ")
    };
    let custom = custom_instructions
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("ADDITIONAL INSTRUCTIONS:\n{}\n", c))
        .unwrap_or_default();
    let id = &module.module_id;
    let title = &module.title;

    format!(
        r#"You are an expert educator creating exam questions for a specific module/unit.

MODULE INFORMATION:
- Module: {id}
- Title: {title}
- Description: {description}
- Key Topics: {topics}

Generate EXACTLY:
- {mcq} multiple-choice questions (with 4 options and correct answer marked)
- {short} short answer questions
- {long} long answer questions

IMPORTANT:
- Focus ONLY on content related to this specific module
- Questions should directly relate to the module's topics and learning objectives
- Use the reference material but filter for content relevant to this module
- Ensure questions test understanding of module-specific concepts

{custom}
Format the output clearly with section headers:

MULTIPLE CHOICE QUESTIONS - {id}:
Q1. [Question text related to {title}]
A) Option A
B) Option B
C) Option C
D) Option D
Answer: [Correct option]

SHORT ANSWER QUESTIONS - {id}:
Q1. [Question text related to {title}]

LONG ANSWER QUESTIONS - {id}:
Q1. [Question text related to {title}]
"#,
        description = module.description,
        mcq = counts.mcq,
        short = counts.short,
        long = counts.long,
    )
}

#[derive(Debug, thiserror::Error)]
pub enum QuestionServiceError {
    #[error(transparent)]
    Llm(#[from] LlmClientError),
    #[error("no questions could be parsed from the response for {0}")]
    NoQuestionsParsed(String),
}
