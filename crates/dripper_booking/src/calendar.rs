// --- File: crates/dripper_booking/src/calendar.rs ---
//! Month grid used by the date step.
//!
//! The grid always has six Sunday-first weeks. It starts on the Sunday on or
//! before the 1st of the month, so the leading cells belong to the previous
//! month and the trailing cells to the next one.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_past: bool,
}

impl CalendarDay {
    /// Past days are never selectable; days of the adjacent months are.
    pub fn is_selectable(&self) -> bool {
        !self.is_past
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct MonthView {
    /// First day of the displayed month.
    pub month: NaiveDate,
    #[cfg_attr(feature = "openapi", schema(example = "March 2024"))]
    pub title: String,
    pub weekdays: Vec<&'static str>,
    pub days: Vec<CalendarDay>,
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn previous_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

pub fn next_month(month: NaiveDate) -> NaiveDate {
    let first = first_of_month(month);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

/// "March 2024"
pub fn month_title(month: NaiveDate) -> String {
    first_of_month(month).format("%B %Y").to_string()
}

/// Builds the 42-cell grid for the month containing `month`.
pub fn month_grid(month: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> MonthView {
    let first = first_of_month(month);
    let leading = i64::from(first.weekday().num_days_from_sunday());
    let grid_start = first - Duration::days(leading);

    let days = (0..GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            CalendarDay {
                date,
                day: date.day(),
                is_current_month: date.year() == first.year() && date.month() == first.month(),
                is_today: date == today,
                is_selected: selected == Some(date),
                is_past: date < today,
            }
        })
        .collect();

    MonthView {
        month: first,
        title: month_title(first),
        weekdays: WEEKDAY_LABELS.to_vec(),
        days,
    }
}
