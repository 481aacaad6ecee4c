//! Time handling for sample times stored as seconds since 1970-01-01T00:00:00Z.

use chrono::{DateTime, Utc};

/// Round a fractional epoch time to whole seconds, halves rounding up.
pub fn round_epoch(secs: f64) -> i64 {
    (secs + 0.5).floor() as i64
}

/// Convert whole epoch seconds to a UTC timestamp.
pub fn epoch_to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

/// Format epoch seconds as `YYYY-MM-DD HH:MM:SS`, falling back to the raw
/// number when it is outside chrono's representable range.
pub fn format_epoch(secs: i64) -> String {
    match epoch_to_datetime(secs) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => secs.to_string(),
    }
}
