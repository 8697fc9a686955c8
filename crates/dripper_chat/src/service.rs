// --- File: crates/dripper_chat/src/service.rs ---
//! HTTP clients for the upstream chat providers.
//!
//! Each call is a single request with the configured timeout. Responses are
//! read as text first so failures can be logged with the provider's own
//! error message.

use dripper_common::{client_for_timeout, BoxFuture, ChatMessage, ChatService};
use dripper_config::{AnthropicConfig, OpenAiConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ChatError;
use crate::logic::{
    anthropic_reply_text, openai_reply_text, upstream_error_message, AnthropicMessagesRequest,
    AnthropicMessagesResponse, OpenAiChatRequest, OpenAiChatResponse,
};

pub const OPENAI: &str = "OpenAI";
pub const ANTHROPIC: &str = "Anthropic";

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

fn configured_key(key: Option<&str>) -> Option<&str> {
    key.filter(|k| !k.trim().is_empty())
}

/// Checks the status and decodes a successful body.
async fn read_response<T: DeserializeOwned>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ChatError> {
    let status = response.status();
    let body_text = response.text().await?;

    if !status.is_success() {
        return Err(ChatError::Api {
            provider,
            status: status.as_u16(),
            message: upstream_error_message(&body_text),
        });
    }

    serde_json::from_str(&body_text).map_err(|e| ChatError::InvalidResponse {
        provider,
        message: e.to_string(),
    })
}

// --- OpenAI ---

#[derive(Clone)]
pub struct OpenAiChatService {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiChatService {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ChatError> {
        Ok(Self {
            client: client_for_timeout(config.timeout_secs)?,
            config: config.clone(),
        })
    }
}

impl ChatService for OpenAiChatService {
    type Error = ChatError;

    fn provider_name(&self) -> &'static str {
        OPENAI
    }

    fn is_configured(&self) -> bool {
        configured_key(self.config.api_key.as_deref()).is_some()
    }

    fn complete(&self, messages: Vec<ChatMessage>) -> BoxFuture<'_, String, ChatError> {
        Box::pin(async move {
            let api_key = configured_key(self.config.api_key.as_deref())
                .ok_or(ChatError::NotConfigured(OPENAI))?;
            let url = endpoint(&self.config.base_url, "chat/completions");
            let payload = OpenAiChatRequest {
                model: &self.config.model,
                messages: &messages,
                max_tokens: self.config.max_tokens,
            };

            debug!(model = %self.config.model, messages = messages.len(), "Sending OpenAI chat request");
            let response = self
                .client
                .post(&url)
                .bearer_auth(api_key)
                .json(&payload)
                .send()
                .await?;

            let parsed: OpenAiChatResponse = read_response(OPENAI, response).await?;
            openai_reply_text(parsed).ok_or(ChatError::EmptyResponse(OPENAI))
        })
    }
}

// --- Anthropic ---

#[derive(Clone)]
pub struct AnthropicChatService {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicChatService {
    pub fn new(config: &AnthropicConfig) -> Result<Self, ChatError> {
        Ok(Self {
            client: client_for_timeout(config.timeout_secs)?,
            config: config.clone(),
        })
    }
}

impl ChatService for AnthropicChatService {
    type Error = ChatError;

    fn provider_name(&self) -> &'static str {
        ANTHROPIC
    }

    fn is_configured(&self) -> bool {
        configured_key(self.config.api_key.as_deref()).is_some()
    }

    fn complete(&self, messages: Vec<ChatMessage>) -> BoxFuture<'_, String, ChatError> {
        Box::pin(async move {
            let api_key = configured_key(self.config.api_key.as_deref())
                .ok_or(ChatError::NotConfigured(ANTHROPIC))?;
            let url = endpoint(&self.config.base_url, "messages");
            let payload = AnthropicMessagesRequest {
                model: &self.config.model,
                max_tokens: self.config.max_tokens,
                messages: &messages,
            };

            debug!(model = %self.config.model, messages = messages.len(), "Sending Anthropic messages request");
            let response = self
                .client
                .post(&url)
                .header("x-api-key", api_key)
                .header("anthropic-version", &self.config.api_version)
                .json(&payload)
                .send()
                .await?;

            let parsed: AnthropicMessagesResponse = read_response(ANTHROPIC, response).await?;
            anthropic_reply_text(parsed).ok_or(ChatError::EmptyResponse(ANTHROPIC))
        })
    }
}
