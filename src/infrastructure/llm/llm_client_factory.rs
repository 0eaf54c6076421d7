use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::presentation::config::{LlmProvider, LlmSettings};

use super::{MockLlmClient, OpenAiClient};

pub struct LlmClientFactory;

impl LlmClientFactory {
    pub fn create(settings: &LlmSettings) -> Result<Arc<dyn LlmClient>, LlmClientError> {
        match settings.provider {
            LlmProvider::Mock => {
                tracing::info!(
                    module_count = settings.mock_module_count,
                    "Using offline mock LLM client"
                );
                Ok(Arc::new(MockLlmClient::new(
                    settings.mock_module_count,
                    Duration::from_millis(settings.mock_response_delay_ms),
                )))
            }
            provider => {
                if settings.api_key.is_empty() && provider != LlmProvider::LmStudio {
                    tracing::warn!(
                        ?provider,
                        "No LLM API key configured; question generation will fail"
                    );
                }
                tracing::info!(?provider, model = %settings.chat_model, "Using HTTP LLM client");
                Ok(Arc::new(OpenAiClient::from_settings(settings)?))
            }
        }
    }
}
