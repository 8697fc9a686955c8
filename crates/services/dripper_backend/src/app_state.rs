// --- File: crates/services/dripper_backend/src/app_state.rs ---
use dripper_common::DripperError;
use dripper_config::AppConfig;
use std::sync::Arc;

#[cfg(feature = "booking")]
use dripper_booking::BookingState;
#[cfg(feature = "chat")]
use dripper_chat::ChatState;

/// State for every feature compiled into the binary.
///
/// Feature states are always built when their Cargo feature is on; the
/// runtime `use_*` flags are checked by the handlers, which answer 503.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,

    #[cfg(feature = "booking")]
    pub booking: Arc<BookingState>,

    #[cfg(feature = "chat")]
    pub chat: Arc<ChatState>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>) -> Result<Self, DripperError> {
        Ok(Self {
            #[cfg(feature = "booking")]
            booking: Arc::new(BookingState::new(config.clone())?),
            #[cfg(feature = "chat")]
            chat: Arc::new(ChatState::new(config.clone())?),
            config,
        })
    }
}
