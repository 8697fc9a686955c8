// File: crates/dripper_chat/src/handlers.rs
use axum::{body::Bytes, extract::State, response::Json};
use dripper_common::{is_chat_enabled, logging::log_error, ChatService};
use dripper_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ChatError;
use crate::logic::{parse_chat_request, ChatResponse};
use crate::service::{AnthropicChatService, OpenAiChatService};

pub type DynChatService = Arc<dyn ChatService<Error = ChatError>>;

pub struct ChatState {
    pub config: Arc<AppConfig>,
    pub openai: DynChatService,
    pub anthropic: DynChatService,
}

impl ChatState {
    /// Builds the state with the real provider clients.
    pub fn new(config: Arc<AppConfig>) -> Result<Self, ChatError> {
        let openai = Arc::new(OpenAiChatService::new(&config.openai)?);
        let anthropic = Arc::new(AnthropicChatService::new(&config.anthropic)?);
        Ok(Self::with_services(config, openai, anthropic))
    }

    pub fn with_services(
        config: Arc<AppConfig>,
        openai: DynChatService,
        anthropic: DynChatService,
    ) -> Self {
        Self {
            config,
            openai,
            anthropic,
        }
    }

    fn ensure_enabled(&self) -> Result<(), ChatError> {
        if is_chat_enabled(&self.config) {
            Ok(())
        } else {
            Err(ChatError::Disabled)
        }
    }

    /// Forwards one conversation to `service`.
    ///
    /// The key is checked before the body is looked at, so an unconfigured
    /// provider reports that even for a malformed request.
    async fn proxy(
        &self,
        service: &dyn ChatService<Error = ChatError>,
        body: &[u8],
    ) -> Result<Json<ChatResponse>, ChatError> {
        self.ensure_enabled()?;
        let provider = service.provider_name();
        if !service.is_configured() {
            warn!(provider, "Chat request rejected: API key is not configured");
            return Err(ChatError::NotConfigured(provider));
        }

        let result = match parse_chat_request(body) {
            Ok(request) => service.complete(request.messages).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(text) => {
                info!(provider, "Chat request completed");
                Ok(Json(ChatResponse { result: text }))
            }
            Err(e) => {
                log_error(&e, &format!("{} chat request failed", provider));
                Err(e)
            }
        }
    }
}

#[axum::debug_handler]
pub async fn openai_chat_handler(
    State(state): State<Arc<ChatState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ChatError> {
    state.proxy(state.openai.as_ref(), &body).await
}

#[axum::debug_handler]
pub async fn anthropic_chat_handler(
    State(state): State<Arc<ChatState>>,
    body: Bytes,
) -> Result<Json<ChatResponse>, ChatError> {
    state.proxy(state.anthropic.as_ref(), &body).await
}
