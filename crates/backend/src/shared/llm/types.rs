use async_trait::async_trait;
use contracts::domain::a003_chat::ChatMessage;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Ошибки LLM провайдера
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),
}

impl LlmError {
    /// Классификация ошибки по тексту ответа провайдера
    pub fn classify(err_str: String) -> Self {
        let lower = err_str.to_lowercase();
        if lower.contains("401") || lower.contains("authentication") {
            LlmError::AuthError(err_str)
        } else if lower.contains("429") || lower.contains("rate limit") {
            LlmError::RateLimitExceeded
        } else if lower.contains("connect") || lower.contains("dns") {
            LlmError::NetworkError(err_str)
        } else {
            LlmError::ApiError(err_str)
        }
    }
}

/// Поток текстовых фрагментов ответа модели
pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send>>;

/// Трейт для LLM провайдеров
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Открыть потоковый ответ модели
    ///
    /// Ошибка до начала потока (авторизация, недоступность API)
    /// возвращается сразу; ошибки посреди ответа приходят элементами потока.
    async fn stream_chat(
        &self,
        system: String,
        messages: Vec<ChatMessage>,
    ) -> Result<TokenStream, LlmError>;

    /// Получить название провайдера
    fn provider_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert!(matches!(
            LlmError::classify("status 401: invalid api key".into()),
            LlmError::AuthError(_)
        ));
        assert!(matches!(
            LlmError::classify("Rate limit reached for gpt-4o".into()),
            LlmError::RateLimitExceeded
        ));
        assert!(matches!(
            LlmError::classify("error sending request: connect refused".into()),
            LlmError::NetworkError(_)
        ));
        assert!(matches!(
            LlmError::classify("model overloaded".into()),
            LlmError::ApiError(_)
        ));
    }
}
