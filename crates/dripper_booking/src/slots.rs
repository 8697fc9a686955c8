// --- File: crates/dripper_booking/src/slots.rs ---
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::settings::BookingSettings;

/// A bookable start time on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TimeSlot {
    /// Wall-clock start time in the shop's time zone.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:30:00"))]
    pub time: NaiveTime,
    /// The same start as an RFC 3339 instant.
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2024-03-15T09:30:00-04:00"))]
    pub starts_at: DateTime<FixedOffset>,
    #[cfg_attr(feature = "openapi", schema(example = "9:30 AM"))]
    pub label: String,
}

/// "9:30 AM"
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Start times from `opening` (inclusive) to `closing` (exclusive), every
/// `interval`, on `date` in `time_zone`.
///
/// Wall-clock times that do not exist on that day (spring-forward gap) are
/// skipped. Ambiguous times (fall-back overlap) resolve to the earlier instant.
pub fn generate_time_slots(
    date: NaiveDate,
    opening: NaiveTime,
    closing: NaiveTime,
    interval: Duration,
    time_zone: &Tz,
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    if interval <= Duration::zero() {
        return slots;
    }

    let mut current = opening;
    while current < closing {
        if let Some(start) = time_zone
            .from_local_datetime(&date.and_time(current))
            .earliest()
        {
            slots.push(TimeSlot {
                time: current,
                starts_at: start.fixed_offset(),
                label: format_time(current),
            });
        }

        let (next, wrapped) = current.overflowing_add_signed(interval);
        if wrapped != 0 || next <= current {
            break;
        }
        current = next;
    }

    slots
}

/// Slots for `date` with the configured opening hours.
pub fn slots_for_date(date: NaiveDate, settings: &BookingSettings) -> Vec<TimeSlot> {
    generate_time_slots(
        date,
        settings.opening_time,
        settings.closing_time,
        settings.slot_interval,
        &settings.time_zone,
    )
}

/// Finds the slot starting at `time` on `date`, if it is one of the generated slots.
pub fn find_slot(date: NaiveDate, time: NaiveTime, settings: &BookingSettings) -> Option<TimeSlot> {
    slots_for_date(date, settings)
        .into_iter()
        .find(|slot| slot.time == time)
}
