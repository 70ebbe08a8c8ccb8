use crate::shared::config::Config;
use crate::shared::llm::openai_provider::OpenAiProvider;
use crate::shared::llm::LlmProvider;
use contracts::system::config::ClientConfig;
use std::sync::Arc;
use std::time::Duration;

/// Состояние приложения, общее для всех обработчиков
///
/// Прокси не хранит ничего между запросами: только провайдер и настройки.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn LlmProvider>,
    pub client_config: ClientConfig,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &Config) -> Self {
        Self {
            provider,
            client_config: config.client_config(),
            request_timeout: config.request_timeout(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = OpenAiProvider::new_with_endpoint(
            config.llm.api_endpoint.clone(),
            config.llm.api_key.clone(),
            config.llm.model.clone(),
            config.llm.temperature,
            config.llm.max_tokens,
        );
        Self::new(Arc::new(provider), config)
    }
}
