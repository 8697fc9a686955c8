// --- File: crates/dripper_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Runtime feature checks
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod routes; // Shared routes (health)
pub mod services; // Service abstractions

pub use routes::routes;

pub use error::{
    config_error, conflict, external_service_error, not_found, service_unavailable,
    validation_error, DripperError, HttpStatusCode,
};

pub use http::{
    client::{client_for_timeout, create_client, HTTP_CLIENT},
    ErrorBody, ErrorDetail, IntoHttpResponse,
};

pub use features::{is_booking_enabled, is_chat_enabled};

pub use services::{BoxFuture, ChatMessage, ChatService};
