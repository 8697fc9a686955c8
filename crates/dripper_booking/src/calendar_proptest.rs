#[cfg(test)]
mod tests {
    use crate::calendar::{month_grid, GRID_CELLS};
    use crate::slots::generate_time_slots;
    use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
    use proptest::prelude::*;

    fn any_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2100, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    proptest! {
        #[test]
        fn test_grid_shape_holds_for_any_month(month in any_date(), today in any_date()) {
            let view = month_grid(month, today, None);
            prop_assert_eq!(view.days.len(), GRID_CELLS);
            prop_assert_eq!(view.days[0].date.weekday(), Weekday::Sun);

            // Consecutive days, no gaps.
            for pair in view.days.windows(2) {
                prop_assert_eq!(pair[1].date - pair[0].date, Duration::days(1));
            }

            // Every day of the month is present and flagged as current.
            let first = view.month;
            let in_month = view.days.iter().filter(|d| d.is_current_month).count();
            let expected = view
                .days
                .iter()
                .filter(|d| d.date.year() == first.year() && d.date.month() == first.month())
                .count();
            prop_assert_eq!(in_month, expected);
            prop_assert!((28..=31).contains(&in_month));
            prop_assert_eq!(
                view.days.iter().position(|d| d.is_current_month),
                Some(first.weekday().num_days_from_sunday() as usize)
            );
        }

        #[test]
        fn test_past_flag_matches_today(month in any_date(), today in any_date()) {
            let view = month_grid(month, today, None);
            for day in &view.days {
                prop_assert_eq!(day.is_past, day.date < today);
                prop_assert_eq!(day.is_selectable(), day.date >= today);
            }
        }

        #[test]
        fn test_slots_stay_within_opening_hours(
            date in any_date(),
            open_hour in 0u32..12,
            span_hours in 1u32..12,
            interval in 5i64..120,
        ) {
            let opening = NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap();
            let closing = NaiveTime::from_hms_opt(open_hour + span_hours, 0, 0).unwrap();
            let slots = generate_time_slots(
                date,
                opening,
                closing,
                Duration::minutes(interval),
                &chrono_tz::UTC,
            );

            let expected = (i64::from(span_hours) * 60 + interval - 1) / interval;
            prop_assert_eq!(slots.len() as i64, expected);
            for slot in &slots {
                prop_assert!(slot.time >= opening);
                prop_assert!(slot.time < closing);
            }
            for pair in slots.windows(2) {
                prop_assert_eq!(pair[1].time - pair[0].time, Duration::minutes(interval));
            }
        }
    }
}
