//! Time helpers - business timezone and money formatting
//!
//! Instants are stored as RFC 3339 UTC and compared as parsed
//! `DateTime` values, never as strings.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Current instant in UTC
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Current instant in the business timezone
pub fn business_now(tz: Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(&tz)
}

/// Format pence as a GBP display string (2500 -> "£25.00")
///
/// Precondition: `pence >= 0`.
pub fn format_pence(pence: i64) -> String {
    format!("\u{a3}{}.{:02}", pence / 100, pence % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_whole_pounds() {
        assert_eq!(format_pence(2500), "£25.00");
    }

    #[test]
    fn formats_sub_pound_amounts() {
        assert_eq!(format_pence(5), "£0.05");
        assert_eq!(format_pence(230), "£2.30");
    }
}
