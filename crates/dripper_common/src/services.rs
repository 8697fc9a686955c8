// --- File: crates/dripper_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! Handlers depend on these traits rather than on concrete HTTP clients, so
//! routers can be assembled with stand-in implementations in tests.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// One turn of a conversation, as forwarded to a chat provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChatMessage {
    #[cfg_attr(feature = "openapi", schema(example = "user"))]
    pub role: String,
    #[cfg_attr(feature = "openapi", schema(example = "Which service takes the longest?"))]
    pub content: String,
}

/// A single-shot chat completion backend.
///
/// Implementations make exactly one upstream call per request: no retries,
/// no streaming.
pub trait ChatService: Send + Sync {
    /// Error type returned by the provider.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Human readable provider name, used in logs and error messages.
    fn provider_name(&self) -> &'static str;

    /// Whether credentials are present. Handlers answer with a configuration
    /// error before reading the request body when this is false.
    fn is_configured(&self) -> bool;

    /// Sends the conversation and returns the text of the first reply.
    fn complete(&self, messages: Vec<ChatMessage>) -> BoxFuture<'_, String, Self::Error>;
}
