//! Floating-point closeness tests and missing-value handling.
//!
//! Cruise data files mark absent values with a large negative sentinel.
//! Values are converted to `Option<f64>` once, at the loader boundary, so
//! nothing past [`to_optional`] ever compares against the sentinel.

/// Sentinel stored in data files for a missing value.
pub const FP_MISSING_VALUE: f64 = -1.0e34;

/// Relative tolerance used when comparing against the sentinel.
pub const MAX_RELATIVE_ERROR: f64 = 1.0e-12;

/// Absolute tolerance used when comparing against the sentinel.
pub const MAX_ABSOLUTE_ERROR: f64 = 1.0e-5;

/// Whether two values are close under a combined relative and absolute tolerance.
///
/// With `avg = |first + second| / 2` and `diff = |first - second|` the values
/// are close when `diff < avg * rtol + atol`. NaN is only close to NaN, and an
/// infinity is close to any infinity.
pub fn close_to(first: f64, second: f64, rtol: f64, atol: f64) -> bool {
    if first.is_nan() {
        return second.is_nan();
    }
    if second.is_nan() {
        return false;
    }

    if first.is_infinite() {
        return second.is_infinite();
    }
    if second.is_infinite() {
        return false;
    }

    if first == second {
        return true;
    }

    let abs_diff = (first - second).abs();
    let abs_avg = ((first + second) * 0.5).abs();
    abs_diff < abs_avg * rtol + atol
}

/// Like [`close_to`], but also tries each value shifted by 360 degrees.
pub fn longitude_close_to(first: f64, second: f64, rtol: f64, atol: f64) -> bool {
    close_to(first, second, rtol, atol)
        || close_to(first + 360.0, second, rtol, atol)
        || close_to(first, second + 360.0, rtol, atol)
}

/// Whether a raw value denotes "no data".
pub fn is_missing(value: f64) -> bool {
    !value.is_finite()
        || close_to(value, FP_MISSING_VALUE, MAX_RELATIVE_ERROR, MAX_ABSOLUTE_ERROR)
}

/// Convert a raw data value to `None` when it denotes "no data".
#[inline]
pub fn to_optional(value: f64) -> Option<f64> {
    if is_missing(value) {
        None
    } else {
        Some(value)
    }
}
