use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::domain::a003_chat::ChatRequest;
use futures::StreamExt;
use std::convert::Infallible;

use crate::domain::a003_chat::service;
use crate::shared::api_error::ApiError;
use crate::shared::state::AppState;

/// POST /api/chat
///
/// Ответ: построчный поток кадров (см. `contracts::domain::a003_chat::stream_protocol`).
/// Если провайдер не открыл поток, возвращается 502/504 с JSON ошибки.
pub async fn send(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Response, ApiError> {
    let frames = service::open_stream(state.provider.clone(), request, state.request_timeout).await?;
    let body = Body::from_stream(frames.map(Ok::<_, Infallible>));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::HeaderName::from_static("x-chat-stream"), "v1"),
        ],
        body,
    )
        .into_response())
}
