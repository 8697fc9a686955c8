// --- File: crates/dripper_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- Logging Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Minimum level for the `dripper` targets (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

// --- Booking Config ---

/// One bookable service as it appears in the config file.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    /// Price in the smallest currency unit (cents).
    pub price_cents: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BookingConfig {
    /// IANA time zone used for "today" and for slot instants.
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    /// First slot of the day, "HH:MM".
    #[serde(default = "default_opening_time")]
    pub opening_time: String,
    /// Slots start strictly before this time, "HH:MM".
    #[serde(default = "default_closing_time")]
    pub closing_time: String,
    #[serde(default = "default_slot_interval")]
    pub slot_interval_minutes: i64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Idle wizard sessions older than this are dropped.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: i64,
    /// Empty means the built-in catalog is used.
    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            time_zone: default_time_zone(),
            opening_time: default_opening_time(),
            closing_time: default_closing_time(),
            slot_interval_minutes: default_slot_interval(),
            currency_symbol: default_currency_symbol(),
            session_ttl_minutes: default_session_ttl(),
            services: Vec::new(),
        }
    }
}

// --- OpenAI Config ---
// Secret loaded from DRIPPER__OPENAI__API_KEY or OPENAI_API_KEY.
#[derive(Deserialize, Serialize, Clone)]
pub struct OpenAiConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_openai_model")]
    pub model: String,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_openai_model(),
            base_url: default_openai_base_url(),
            max_tokens: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Anthropic Config ---
// Secret loaded from DRIPPER__ANTHROPIC__API_KEY or ANTHROPIC_API_KEY.
#[derive(Deserialize, Serialize, Clone)]
pub struct AnthropicConfig {
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    #[serde(default = "default_anthropic_base_url")]
    pub base_url: String,
    #[serde(default = "default_anthropic_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_anthropic_version")]
    pub api_version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_anthropic_model(),
            base_url: default_anthropic_base_url(),
            max_tokens: default_anthropic_max_tokens(),
            api_version: default_anthropic_version(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Keys stay out of Debug output.
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl std::fmt::Debug for AnthropicConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // --- Runtime Flags (default to true) ---
    #[serde(default = "default_true")]
    pub use_booking: bool,
    #[serde(default = "default_true")]
    pub use_chat: bool,

    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub anthropic: AnthropicConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            use_booking: true,
            use_chat: true,
            booking: BookingConfig::default(),
            openai: OpenAiConfig::default(),
            anthropic: AnthropicConfig::default(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_zone() -> String {
    "America/New_York".to_string()
}

fn default_opening_time() -> String {
    "09:00".to_string()
}

fn default_closing_time() -> String {
    "17:00".to_string()
}

fn default_slot_interval() -> i64 {
    30
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_session_ttl() -> i64 {
    60
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-opus-20240229".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

fn default_anthropic_max_tokens() -> u32 {
    1000
}

fn default_anthropic_version() -> String {
    "2023-06-01".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}
