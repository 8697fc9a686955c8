//! Runtime feature checks.
//!
//! Feature crates are switched on at compile time through Cargo features on
//! the backend (`booking`, `chat`) and at runtime through the `use_*` flags
//! of [`AppConfig`]. Handlers consult these helpers and answer
//! `503 Service Unavailable` when their module is switched off.

use dripper_config::AppConfig;

/// Check whether the booking wizard is enabled at runtime.
pub fn is_booking_enabled(config: &AppConfig) -> bool {
    config.use_booking
}

/// Check whether the chat proxies are enabled at runtime.
pub fn is_chat_enabled(config: &AppConfig) -> bool {
    config.use_chat
}
