//! Event Calendar Rules
//!
//! Dinners happen on the last Saturday of each month at 18:30 in the
//! venue's timezone. Everything here works on calendar values in that
//! timezone; the caller converts to UTC at the storage boundary.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use chrono_tz::Tz;

/// Service start, venue local time
pub const DINNER_HOUR: u32 = 18;
pub const DINNER_MINUTE: u32 = 30;

/// Last Saturday of the given month at 18:30, as a naive local datetime.
///
/// `month` is 1-based. Panics only on an out-of-range month, which the
/// callers never produce (they pass components of a real date).
pub fn last_saturday(year: i32, month: u32) -> NaiveDateTime {
    let last_day = days_in_month(year, month);
    let date = NaiveDate::from_ymd_opt(year, month, last_day)
        .unwrap_or_else(|| panic!("invalid month: {}-{}", year, month));
    // Walk back from the last day of the month to the nearest Saturday
    let diff = (date.weekday().num_days_from_sunday() + 1) % 7;
    let saturday = date - chrono::Duration::days(diff as i64);
    saturday
        .and_hms_opt(DINNER_HOUR, DINNER_MINUTE, 0)
        .expect("18:30 is always a valid time")
}

/// Last Saturday of the month containing `now`, resolved in `now`'s
/// timezone
pub fn last_saturday_in(tz: Tz, year: i32, month: u32) -> DateTime<Tz> {
    let local = last_saturday(year, month);
    // 18:30 never lands inside a DST gap in European timezones; take the
    // earliest mapping if the offset is ambiguous
    tz.from_local_datetime(&local)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&local))
}

/// The next dinner at or after `now`: this month's last Saturday if it
/// has not started yet, otherwise next month's.
pub fn next_event_instant(now: DateTime<Tz>) -> DateTime<Tz> {
    let tz = now.timezone();
    let this_month = last_saturday_in(tz, now.year(), now.month());
    if this_month > now {
        return this_month;
    }
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    last_saturday_in(tz, year, month)
}

/// Month key for event uniqueness, "YYYY-MM"
pub fn period_key<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is always valid")
        .pred_opt()
        .expect("no month starts at the epoch floor")
        .day()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use chrono_tz::Europe::London;

    #[test]
    fn february_2026_dinner_is_the_28th() {
        let dt = last_saturday(2026, 2);
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
        assert_eq!(dt.hour(), 18);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn december_2025_dinner_is_the_27th() {
        let dt = last_saturday(2025, 12);
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 12, 27).unwrap());
    }

    #[test]
    fn every_month_of_2026_lands_on_a_saturday() {
        for month in 1..=12 {
            let dt = last_saturday(2026, month);
            assert_eq!(dt.weekday(), Weekday::Sat, "month {}", month);
            // Walking one week forward must leave the month
            let next_week = dt.date() + chrono::Duration::days(7);
            assert_ne!(next_week.month(), dt.month());
        }
    }

    #[test]
    fn next_event_stays_in_month_before_dinner() {
        let now = London.with_ymd_and_hms(2026, 2, 10, 12, 0, 0).unwrap();
        let next = next_event_instant(now);
        assert_eq!(period_key(&next), "2026-02");
        assert_eq!(next.day(), 28);
    }

    #[test]
    fn next_event_rolls_over_once_dinner_has_started() {
        // Exactly 18:30 on the last Saturday counts as started
        let now = London.with_ymd_and_hms(2026, 2, 28, 18, 30, 0).unwrap();
        let next = next_event_instant(now);
        assert_eq!(period_key(&next), "2026-03");
    }

    #[test]
    fn next_event_rolls_december_into_january() {
        let now = London.with_ymd_and_hms(2025, 12, 28, 9, 0, 0).unwrap();
        let next = next_event_instant(now);
        assert_eq!(period_key(&next), "2026-01");
        assert_eq!(next.weekday(), Weekday::Sat);
    }

    #[test]
    fn period_key_pads_single_digit_months() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(period_key(&date), "2026-03");
    }
}
