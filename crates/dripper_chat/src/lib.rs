// --- File: crates/dripper_chat/src/lib.rs ---

pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

#[cfg(test)]
mod logic_test;

pub use error::ChatError;
pub use handlers::ChatState;
pub use routes::routes;
pub use service::{AnthropicChatService, OpenAiChatService};
