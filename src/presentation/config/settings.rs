use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub generation: GenerationSettings,
    pub extraction: ExtractionSettings,
    pub storage: StorageSettings,
    pub worker: WorkerSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    // defaults < appsettings.toml < appsettings.{env}.toml < APP__* < OPENAI_API_KEY
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Settings::default())?;
        let env_file = format!("appsettings.{}", environment.as_str().to_lowercase());

        Config::builder()
            .add_source(defaults)
            .add_source(File::with_name("appsettings").required(false))
            .add_source(File::with_name(&env_file).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "llm.api_key",
                std::env::var("OPENAI_API_KEY")
                    .ok()
                    .filter(|k| !k.is_empty()),
            )?
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8100,
            max_upload_mb: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub chat_model: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_api_version: Option<String>,
    pub request_timeout_secs: u64,
    pub validate_on_startup: bool,
    pub mock_module_count: usize,
    pub mock_response_delay_ms: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: LlmProvider::OpenAi,
            api_key: String::new(),
            chat_model: "gpt-3.5-turbo".to_string(),
            base_url: None,
            azure_endpoint: None,
            azure_api_version: None,
            request_timeout_secs: 120,
            validate_on_startup: true,
            mock_module_count: 3,
            mock_response_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub default_mcq_count: usize,
    pub default_short_count: usize,
    pub default_long_count: usize,
    pub max_questions_per_type: usize,
    pub detection_temperature: f32,
    pub detection_max_tokens: usize,
    pub question_temperature: f32,
    pub question_max_tokens: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_mcq_count: 5,
            default_short_count: 3,
            default_long_count: 2,
            max_questions_per_type: 50,
            detection_temperature: 0.3,
            detection_max_tokens: 2000,
            question_temperature: 0.7,
            question_max_tokens: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    pub reference_max_pages: usize,
    pub syllabus_max_pages: usize,
    pub hard_page_limit: usize,
    pub max_chars: usize,
    pub timeout_secs: u64,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            reference_max_pages: 1000,
            syllabus_max_pages: 50,
            hard_page_limit: 500,
            max_chars: 500_000,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub base_path: String,
    pub keep_uploads: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_path: "data".to_string(),
            keep_uploads: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSettings {
    pub queue_capacity: usize,
    pub max_concurrent_jobs: usize,
    pub shutdown_grace_secs: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            queue_capacity: 32,
            max_concurrent_jobs: 2,
            shutdown_grace_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub filter: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info,question_bank=debug,tower_http=debug".to_string(),
            json: false,
        }
    }
}
