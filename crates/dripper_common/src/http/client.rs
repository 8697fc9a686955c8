// --- File: crates/dripper_common/src/http/client.rs ---
use once_cell::sync::Lazy;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const USER_AGENT: &str = concat!("dripper-scheduler/", env!("CARGO_PKG_VERSION"));

/// A static HTTP client that can be reused across the application.
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    create_client(DEFAULT_TIMEOUT_SECS).unwrap_or_else(|_| Client::new())
});

/// Creates a new HTTP client with the given request timeout.
///
/// Outbound calls in this application never follow redirects: the upstream
/// APIs answer directly and a redirect would be a misconfiguration.
pub fn create_client(timeout_secs: u64) -> Result<Client, ReqwestError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(USER_AGENT)
        .build()
}

/// Returns the shared client for the default timeout, or a dedicated one
/// for any other value.
pub fn client_for_timeout(timeout_secs: u64) -> Result<Client, ReqwestError> {
    if timeout_secs == DEFAULT_TIMEOUT_SECS {
        Ok(HTTP_CLIENT.clone())
    } else {
        create_client(timeout_secs)
    }
}
