// --- File: crates/dripper_chat/src/routes.rs ---

use crate::handlers::{anthropic_chat_handler, openai_chat_handler, ChatState};
use axum::{routing::post, Router};
use std::sync::Arc;

/// Chat proxy endpoints. The backend nests them under `/api`.
pub fn routes(state: Arc<ChatState>) -> Router {
    Router::new()
        .route("/openai/chat", post(openai_chat_handler))
        .route("/anthropic/chat", post(anthropic_chat_handler))
        .with_state(state)
}
