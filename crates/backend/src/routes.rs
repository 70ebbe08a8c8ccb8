use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers;
use crate::shared::state::AppState;

/// Конфигурация всех роутов приложения
///
/// Всё, что не попало в API, отдаётся из сборки фронтенда.
pub fn configure_routes(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // CHAT
        // ========================================
        .route("/api/chat", post(handlers::a003_chat::send))
        .route("/api/config", get(handlers::client_config::get))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}
