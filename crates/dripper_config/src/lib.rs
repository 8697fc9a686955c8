//! Configuration loading for DripperScheduler.
//!
//! Sources are layered in this order, later ones winning:
//!
//! 1. `config/default.{toml,yaml,json}`
//! 2. `config/{RUN_ENV}.*` (`RUN_ENV` defaults to `debug`)
//! 3. environment variables prefixed with `DRIPPER` and split on `__`,
//!    e.g. `DRIPPER__SERVER__PORT=9000`
//!
//! Every field has a default, so a missing config directory still yields a
//! runnable server. API keys left unset are read from the conventional
//! provider variables (`OPENAI_API_KEY`, `ANTHROPIC_API_KEY`).

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use models::*;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "DRIPPER";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Loads the configuration from the default locations.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string());
    let config_dir = env::var("CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env, &prefix)
}

/// Loads the configuration from an explicit directory, run environment and
/// variable prefix.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    debug!(
        "Loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(prefix)
                .separator(CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let mut config: AppConfig = builder.build()?.try_deserialize()?;
    fill_secrets_with(&mut config, |name| env::var(name).ok());
    validate(&config)?;
    Ok(config)
}

/// Convert a secret path to the provider's conventional variable name,
/// e.g. `openai.api_key` becomes `OPENAI_API_KEY`.
pub fn secret_env_var_name(path: &str) -> String {
    path.replace('.', "_").to_uppercase()
}

/// Fills unset API keys through `lookup`, keyed by the conventional
/// variable name. Blank values count as unset.
pub fn fill_secrets_with<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    config.openai.api_key = non_blank(config.openai.api_key.take())
        .or_else(|| non_blank(lookup(&secret_env_var_name("openai.api_key"))));
    config.anthropic.api_key = non_blank(config.anthropic.api_key.take())
        .or_else(|| non_blank(lookup(&secret_env_var_name("anthropic.api_key"))));
}

/// Rejects values that would make the booking flow meaningless.
pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let booking = &config.booking;
    if booking.slot_interval_minutes <= 0 {
        return Err(ConfigError::Message(
            "booking.slot_interval_minutes must be positive".to_string(),
        ));
    }
    if booking.session_ttl_minutes <= 0 {
        return Err(ConfigError::Message(
            "booking.session_ttl_minutes must be positive".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for service in &booking.services {
        if service.id.trim().is_empty() {
            return Err(ConfigError::Message(
                "booking.services: id must not be empty".to_string(),
            ));
        }
        // Ids are embedded in URL paths unescaped.
        if !service
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Message(format!(
                "booking.services: id '{}' may only contain ASCII letters, digits, '-' and '_'",
                service.id
            )));
        }
        if !seen.insert(service.id.as_str()) {
            return Err(ConfigError::Message(format!(
                "booking.services: duplicate id '{}'",
                service.id
            )));
        }
        if service.duration_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "booking.services: service '{}' needs a positive duration",
                service.id
            )));
        }
        if service.price_cents < 0 {
            return Err(ConfigError::Message(format!(
                "booking.services: service '{}' has a negative price",
                service.id
            )));
        }
    }
    Ok(())
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment once.
///
/// `DOTENV_OVERRIDE` selects the file, otherwise a first command line
/// argument starting with `.env`, otherwise `.env`. A missing file is not an
/// error. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
