// File: crates/dripper_chat/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::logic::{ChatErrorResponse, ChatRequest, ChatResponse};
use dripper_common::ChatMessage;

#[utoipa::path(
    post,
    path = "/openai/chat",
    request_body(content = ChatRequest, example = json!({
        "messages": [{"role": "user", "content": "Which service is the cheapest?"}]
    })),
    responses(
        (status = 200, description = "Text of the first choice", body = ChatResponse),
        (status = 500, description = "API key missing or the request failed", body = ChatErrorResponse),
        (status = 503, description = "Chat is disabled", body = ChatErrorResponse)
    ),
    tag = "Chat"
)]
fn doc_openai_chat_handler() {}

#[utoipa::path(
    post,
    path = "/anthropic/chat",
    request_body(content = ChatRequest, example = json!({
        "messages": [{"role": "user", "content": "Which service is the cheapest?"}]
    })),
    responses(
        (status = 200, description = "Text of the first content block", body = ChatResponse),
        (status = 500, description = "API key missing or the request failed", body = ChatErrorResponse),
        (status = 503, description = "Chat is disabled", body = ChatErrorResponse)
    ),
    tag = "Chat"
)]
fn doc_anthropic_chat_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_openai_chat_handler, doc_anthropic_chat_handler),
    components(schemas(ChatMessage, ChatRequest, ChatResponse, ChatErrorResponse)),
    tags(
        (name = "Chat", description = "Pass-through chat completion proxies")
    )
)]
pub struct ChatApiDoc;
