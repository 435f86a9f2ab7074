use std::time::Duration;

/// Number of fractional digits kept when a number is rendered.
pub const DISPLAY_PRECISION: usize = 6;

/// Renders a number the way `print` and string concatenation show it.
///
/// The value is written with six fixed fractional digits, then trailing
/// zeros and a dangling decimal point are removed. Non-finite values use
/// their conventional names.
///
/// ## Parameters
/// - `value`: The number to render.
///
/// ## Returns
/// The rendered text.
///
/// ## Example
/// ```
/// use ripple::util::num::format_number;
///
/// assert_eq!(format_number(15.0), "15");
/// assert_eq!(format_number(0.5), "0.5");
/// assert_eq!(format_number(1.0 / 3.0), "0.333333");
/// assert_eq!(format_number(f64::NAN), "NaN");
/// assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let fixed = format!("{value:.DISPLAY_PRECISION$}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    // Rounding can leave "-0" behind for tiny negative values.
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts a delay in milliseconds to a [`Duration`].
///
/// Negative and NaN delays become zero. Delays too large to represent
/// saturate at [`Duration::MAX`].
///
/// ## Example
/// ```
/// use std::time::Duration;
///
/// use ripple::util::num::millis_to_duration;
///
/// assert_eq!(millis_to_duration(250.0), Duration::from_millis(250));
/// assert_eq!(millis_to_duration(-5.0), Duration::ZERO);
/// assert_eq!(millis_to_duration(f64::NAN), Duration::ZERO);
/// ```
#[must_use]
pub fn millis_to_duration(millis: f64) -> Duration {
    if millis.is_nan() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(millis / 1000.0).unwrap_or(Duration::MAX)
}
