//! Traffic and expiry unit conversions
//!
//! The panel stores traffic quotas in bytes and expiry timestamps in epoch
//! milliseconds; operators think in gigabytes and day counts. Every
//! conversion between the two worlds lives here.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone};

/// Bytes in one gigabyte (binary, 1024³)
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Milliseconds in one day
pub const MS_PER_DAY: i64 = 86_400_000;

/// Convert a gigabyte quota to bytes, flooring to a whole byte count.
///
/// The backend validates quotas against a byte threshold, so the floor must
/// be applied before transmission rather than left to serialization.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[allow(clippy::cast_precision_loss)]
pub fn gb_to_bytes(gb: f64) -> u64 {
    (gb * BYTES_PER_GB as f64).floor() as u64
}

/// Convert a byte count to fractional gigabytes
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB as f64
}

/// Format a byte count as gigabytes with two decimals
#[must_use]
pub fn format_traffic(bytes: u64) -> String {
    format!("{:.2} GB", bytes_to_gb(bytes))
}

/// Format an epoch-millisecond timestamp as `YYYY-MM-DD` (UTC)
#[must_use]
pub fn format_date(epoch_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(epoch_ms).map_or_else(
        || "-".to_string(),
        |dt| dt.format("%Y-%m-%d").to_string(),
    )
}

/// Whole days until expiry, rounding partial days up and clamping at zero.
///
/// An expiry at or before `now_ms` yields `0`, so overdue accounts read as
/// "due today" when fed back into the edit form.
#[must_use]
pub const fn days_until_expiry(expiry_ms: i64, now_ms: i64) -> i64 {
    let diff = expiry_ms - now_ms;
    if diff <= 0 {
        0
    } else {
        (diff + MS_PER_DAY - 1) / MS_PER_DAY
    }
}

/// Absolute expiry date for a day count entered in the form.
///
/// Negative day counts are treated as zero.
#[must_use]
#[allow(clippy::cast_sign_loss)]
pub fn expiry_date_from_days(days: i64, today: NaiveDate) -> NaiveDate {
    today
        .checked_add_days(chrono::Days::new(days.max(0) as u64))
        .unwrap_or(today)
}

/// Epoch milliseconds of local midnight on the given date.
///
/// Falls back to UTC midnight when local midnight does not exist (DST gap).
#[must_use]
pub fn expiry_ms_from_date(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Local.from_local_datetime(&midnight).earliest().map_or_else(
        || midnight.and_utc().timestamp_millis(),
        |dt| dt.timestamp_millis(),
    )
}

/// Epoch milliseconds of today's local midnight.
///
/// Day-count math anchors on midnight rather than wall-clock now, so a
/// quota expiring tomorrow reads as one day regardless of the hour.
#[must_use]
pub fn local_midnight_ms() -> i64 {
    expiry_ms_from_date(Local::now().date_naive())
}

/// Local calendar date of an epoch-millisecond timestamp
#[must_use]
pub fn date_from_ms(epoch_ms: i64) -> Option<NaiveDate> {
    Local
        .timestamp_millis_opt(epoch_ms)
        .single()
        .map(|dt| dt.date_naive())
}

/// Presentation of an expiry timestamp relative to now
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryStatus {
    /// Whether the expiry has passed
    pub is_expired: bool,

    /// Whole days left, zero when expired
    pub days_left: i64,

    /// Ready-to-render label
    pub text: String,
}

/// Describe an expiry timestamp as expired or "N days left"
#[must_use]
pub fn expiry_status(expiry_ms: i64, now_ms: i64) -> ExpiryStatus {
    if expiry_ms <= now_ms {
        return ExpiryStatus {
            is_expired: true,
            days_left: 0,
            text: "Expired".to_string(),
        };
    }

    let days_left = days_until_expiry(expiry_ms, now_ms);
    let text = if days_left == 1 {
        "1 day left".to_string()
    } else {
        format!("{days_left} days left")
    };

    ExpiryStatus {
        is_expired: false,
        days_left,
        text,
    }
}

#[cfg(test)]
#[allow(
    clippy::missing_panics_doc,
    clippy::uninlined_format_args,
    clippy::unreadable_literal,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_gb_to_bytes_floors() {
        assert_eq!(gb_to_bytes(1.0), 1_073_741_824);
        assert_eq!(gb_to_bytes(1.5), 1_610_612_736);
        // 0.1 GB is 107374182.4 bytes, floored
        assert_eq!(gb_to_bytes(0.1), 107_374_182);
        assert_eq!(gb_to_bytes(0.0), 0);
    }

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(1_073_741_824), 1.0);
        assert_eq!(bytes_to_gb(0), 0.0);
        assert_eq!(bytes_to_gb(536_870_912), 0.5);
    }

    #[test]
    fn test_format_traffic_two_decimals() {
        assert_eq!(format_traffic(1_073_741_824), "1.00 GB");
        assert_eq!(format_traffic(1_610_612_736), "1.50 GB");
        assert_eq!(format_traffic(0), "0.00 GB");
    }

    #[test]
    fn test_format_date() {
        // 2025-01-15T00:00:00Z
        assert_eq!(format_date(1_736_899_200_000), "2025-01-15");
        assert_eq!(format_date(0), "1970-01-01");
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(-MS_PER_DAY, 0, 0)] // overdue clamps to zero
    #[case(1, 0, 1)] // any partial day rounds up
    #[case(MS_PER_DAY, 0, 1)]
    #[case(MS_PER_DAY + 1, 0, 2)]
    #[case(30 * MS_PER_DAY, 0, 30)]
    fn test_days_until_expiry(#[case] expiry: i64, #[case] now: i64, #[case] expected: i64) {
        assert_eq!(days_until_expiry(expiry, now), expected);
    }

    #[test]
    fn test_expiry_date_from_days() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        assert_eq!(
            expiry_date_from_days(30, today),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
        assert_eq!(expiry_date_from_days(0, today), today);
        assert_eq!(expiry_date_from_days(-5, today), today);
    }

    #[test]
    fn test_local_midnight_anchors_day_counts() {
        let today = Local::now().date_naive();
        let expiry = expiry_ms_from_date(expiry_date_from_days(10, today));

        assert_eq!(days_until_expiry(expiry, local_midnight_ms()), 10);
    }

    #[test]
    fn test_expiry_ms_round_trips_through_local_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let ms = expiry_ms_from_date(date);

        assert_eq!(date_from_ms(ms), Some(date));
    }

    #[test]
    fn test_expiry_status() {
        let now = 100 * MS_PER_DAY;

        let expired = expiry_status(now - 1, now);
        assert!(expired.is_expired);
        assert_eq!(expired.days_left, 0);
        assert_eq!(expired.text, "Expired");

        let tomorrow = expiry_status(now + MS_PER_DAY, now);
        assert!(!tomorrow.is_expired);
        assert_eq!(tomorrow.days_left, 1);
        assert_eq!(tomorrow.text, "1 day left");

        let week = expiry_status(now + 7 * MS_PER_DAY, now);
        assert_eq!(week.days_left, 7);
        assert_eq!(week.text, "7 days left");
    }

    proptest! {
        #[test]
        fn prop_gb_round_trip_is_close(gb in 0.0f64..1_000_000.0) {
            let back = bytes_to_gb(gb_to_bytes(gb));
            // Flooring loses at most one byte
            prop_assert!((gb - back).abs() < 1e-6);
            prop_assert!(back <= gb);
        }

        #[test]
        fn prop_gb_to_bytes_is_monotonic(a in 0.0f64..1_000_000.0, b in 0.0f64..1_000_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(gb_to_bytes(lo) <= gb_to_bytes(hi));
        }

        #[test]
        fn prop_days_until_expiry_never_negative(expiry in i64::MIN / 4..i64::MAX / 4,
                                                 now in i64::MIN / 4..i64::MAX / 4) {
            prop_assert!(days_until_expiry(expiry, now) >= 0);
        }
    }
}
