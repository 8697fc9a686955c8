// --- File: crates/dripper_chat/src/logic.rs ---
use dripper_common::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ChatError;

/// Longest slice of an upstream error body kept for the logs.
const MAX_LOGGED_BODY: usize = 200;

// --- Proxy API ---

/// Request body accepted by both chat endpoints.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatResponse {
    #[cfg_attr(feature = "openapi", schema(example = "The Full Color Treatment takes 120 minutes."))]
    pub result: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = "Failed to process request"))]
    pub error: String,
}

/// Parses the raw request body. Unknown fields on messages are dropped, so
/// only role and content reach the provider.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, ChatError> {
    serde_json::from_slice(body).map_err(|e| ChatError::InvalidRequest(e.to_string()))
}

// --- OpenAI wire format ---

#[derive(Serialize, Debug)]
pub struct OpenAiChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAiChatResponse {
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAiChoice {
    pub message: OpenAiReplyMessage,
}

#[derive(Deserialize, Debug)]
pub struct OpenAiReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Content of the first choice, if the provider sent one.
pub fn openai_reply_text(response: OpenAiChatResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
}

// --- Anthropic wire format ---

#[derive(Serialize, Debug)]
pub struct AnthropicMessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: &'a [ChatMessage],
}

#[derive(Deserialize, Debug)]
pub struct AnthropicMessagesResponse {
    #[serde(default)]
    pub content: Vec<AnthropicContentBlock>,
}

#[derive(Deserialize, Debug)]
pub struct AnthropicContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// Text of the first content block.
pub fn anthropic_reply_text(response: AnthropicMessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .next()
        .and_then(|block| block.text)
}

/// Pulls `error.message` out of an upstream error body, falling back to a
/// truncated copy of the raw body.
pub fn upstream_error_message(body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|v| v.pointer("/error/message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_LOGGED_BODY).collect()
}
