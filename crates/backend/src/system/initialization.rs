use crate::shared::config::Config;
use crate::shared::state::AppState;

/// Собрать состояние приложения из конфигурации
///
/// Отсутствие ключа API или шлюза загрузки не мешает старту:
/// чат ответит ошибкой провайдера, загрузка файлов на клиенте отключится.
pub fn build_state(config: &Config) -> AppState {
    if config.llm.api_key.trim().is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set, chat requests will fail upstream");
    }

    match &config.upload.gateway_url {
        Some(url) => tracing::info!("Upload gateway: {}", url),
        None => tracing::warn!("UPLOAD_API_URL is not set, file uploads are disabled"),
    }

    tracing::info!(
        "LLM: model {} at {} (timeout {}s)",
        config.llm.model,
        config.llm.api_endpoint,
        config.llm.request_timeout_secs
    );

    AppState::from_config(config)
}
