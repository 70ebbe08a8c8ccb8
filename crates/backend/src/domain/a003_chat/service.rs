use super::system_prompt::build_system_prompt;
use crate::shared::llm::{LlmError, LlmProvider};
use contracts::domain::a003_chat::{ChatRequest, ChatRole, StreamPart};
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{timeout_at, Instant};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ChatServiceError {
    #[error("Conversation is empty")]
    EmptyConversation,

    #[error(transparent)]
    Provider(#[from] LlmError),
}

/// Подготовка запроса: системные сообщения клиента отбрасываются
/// (системный промпт формирует прокси), пустая история отклоняется.
pub fn prepare(mut request: ChatRequest) -> Result<ChatRequest, ChatServiceError> {
    let before = request.messages.len();
    request.messages.retain(|m| m.role != ChatRole::System);
    if request.messages.len() != before {
        tracing::warn!(
            "Dropped {} client-supplied system message(s)",
            before - request.messages.len()
        );
    }

    if request.messages.is_empty() {
        return Err(ChatServiceError::EmptyConversation);
    }
    Ok(request)
}

/// Открыть поток ответа модели
///
/// Ошибка открытия возвращается до начала ответа. Дальше поток кадров:
/// `f` (начало), `0` на каждый фрагмент, и последним `d` (конец) либо
/// `3` (ошибка провайдера или превышение лимита времени). Лимит считается
/// от начала запроса.
pub async fn open_stream(
    provider: Arc<dyn LlmProvider>,
    request: ChatRequest,
    timeout: Duration,
) -> Result<impl Stream<Item = String> + Send + 'static, ChatServiceError> {
    let started = Instant::now();
    let deadline = started + timeout;
    let timeout_secs = timeout.as_secs();

    let request = prepare(request)?;
    let system = build_system_prompt(&request.data.attachments);

    tracing::info!(
        "Chat request: {} message(s), {} attachment(s), provider {}",
        request.messages.len(),
        request.data.attachments.len(),
        provider.provider_name()
    );

    let mut tokens = match timeout_at(deadline, provider.stream_chat(system, request.messages)).await
    {
        Ok(Ok(tokens)) => tokens,
        Ok(Err(e)) => {
            tracing::error!("Failed to open LLM stream: {}", e);
            return Err(e.into());
        }
        Err(_) => {
            tracing::error!("LLM stream did not open within {}s", timeout_secs);
            return Err(LlmError::Timeout(timeout_secs).into());
        }
    };

    let message_id = format!("msg-{}", Uuid::new_v4());

    let frames = async_stream::stream! {
        yield StreamPart::Start { message_id: message_id.clone() }.encode();

        let mut token_count = 0usize;
        loop {
            match timeout_at(deadline, tokens.next()).await {
                Ok(Some(Ok(token))) => {
                    if token.is_empty() {
                        continue;
                    }
                    token_count += 1;
                    yield StreamPart::Text(token).encode();
                }
                Ok(Some(Err(e))) => {
                    tracing::error!("LLM stream {} failed after {} token(s): {}", message_id, token_count, e);
                    yield StreamPart::Error(e.to_string()).encode();
                    break;
                }
                Ok(None) => {
                    tracing::info!(
                        "LLM stream {} finished: {} token(s) in {}ms",
                        message_id,
                        token_count,
                        started.elapsed().as_millis()
                    );
                    yield StreamPart::Finish { finish_reason: "stop".to_string() }.encode();
                    break;
                }
                Err(_) => {
                    tracing::warn!("LLM stream {} aborted: exceeded {}s", message_id, timeout_secs);
                    yield StreamPart::Error(LlmError::Timeout(timeout_secs).to_string()).encode();
                    break;
                }
            }
        }
    };

    Ok(frames)
}
