// --- File: crates/dripper_booking/src/settings.rs ---
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use dripper_config::BookingConfig;

use crate::error::BookingError;

/// Booking configuration with its strings parsed into chrono types.
#[derive(Debug, Clone)]
pub struct BookingSettings {
    pub time_zone: Tz,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub slot_interval: Duration,
    pub currency_symbol: String,
    pub session_ttl: Duration,
}

impl BookingSettings {
    pub fn from_config(config: &BookingConfig) -> Result<Self, BookingError> {
        let time_zone: Tz = config.time_zone.parse().map_err(|_| {
            BookingError::Config(format!("unknown time zone '{}'", config.time_zone))
        })?;
        let opening_time = parse_clock(&config.opening_time, "opening_time")?;
        let closing_time = parse_clock(&config.closing_time, "closing_time")?;
        if opening_time >= closing_time {
            return Err(BookingError::Config(format!(
                "opening_time {} must be before closing_time {}",
                config.opening_time, config.closing_time
            )));
        }
        if config.slot_interval_minutes <= 0 {
            return Err(BookingError::Config(
                "slot_interval_minutes must be positive".to_string(),
            ));
        }
        if config.session_ttl_minutes <= 0 {
            return Err(BookingError::Config(
                "session_ttl_minutes must be positive".to_string(),
            ));
        }

        Ok(Self {
            time_zone,
            opening_time,
            closing_time,
            slot_interval: Duration::minutes(config.slot_interval_minutes),
            currency_symbol: config.currency_symbol.clone(),
            session_ttl: Duration::minutes(config.session_ttl_minutes),
        })
    }

    /// Today's date in the shop's time zone.
    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }

    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.time_zone).date_naive()
    }
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            time_zone: chrono_tz::America::New_York,
            opening_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            closing_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_interval: Duration::minutes(30),
            currency_symbol: "$".to_string(),
            session_ttl: Duration::minutes(60),
        }
    }
}

fn parse_clock(value: &str, field: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| {
        BookingError::Config(format!("{} '{}' is not a HH:MM time", field, value))
    })
}
