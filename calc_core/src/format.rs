//! # Number Formatting
//!
//! Turns computed results into display text and display text back into
//! numbers. Results are rounded to a fixed number of significant digits and
//! written in plain positional notation with a `.` separator, independent of
//! locale, so `0.1 + 0.2` shows `0.3` and the text always parses back.

use crate::settings::{DisplaySettings, MAX_SIGNIFICANT_DIGITS};

/// Format a computed result for the display.
///
/// Non-finite values are never produced by the engine; if one is passed in
/// it is rendered as `"0"` so the display stays a valid numeral.
///
/// Output is always positional, never exponent form, so magnitudes far from
/// one produce long text: `1e-300` renders as `0.` followed by 299 zeros and
/// a `1`. Shells with a narrow display should scroll or truncate it.
///
/// # Example
///
/// ```rust
/// use calc_core::format::format_number;
/// use calc_core::settings::DisplaySettings;
///
/// let settings = DisplaySettings::default();
/// assert_eq!(format_number(0.1 + 0.2, &settings), "0.3");
/// assert_eq!(format_number(12.0, &settings), "12");
/// assert_eq!(format_number(-2.5, &settings), "-2.5");
/// ```
pub fn format_number(value: f64, settings: &DisplaySettings) -> String {
    if !value.is_finite() {
        tracing::warn!(value, "non-finite value reached the formatter");
        return "0".to_string();
    }

    let rounded = round_significant(value, settings.significant_digits);

    // Avoid showing "-0"
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Round `value` to `digits` significant digits.
fn round_significant(value: f64, digits: u32) -> f64 {
    let precision = digits.clamp(1, MAX_SIGNIFICANT_DIGITS) as usize - 1;
    // Scientific formatting does the decimal rounding exactly; parsing it back
    // yields the nearest f64 to the rounded decimal. Rounding up next to
    // f64::MAX can overflow, in which case the value is kept as is.
    format!("{:.*e}", precision, value)
        .parse::<f64>()
        .ok()
        .filter(|rounded| rounded.is_finite())
        .unwrap_or(value)
}

/// Parse display text into a number.
///
/// Accepts everything the display can hold, including a trailing point
/// (`"5."`). Returns `None` for text that is not a finite numeral.
pub fn parse_display(text: &str) -> Option<f64> {
    if text.is_empty() || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !text
        .bytes()
        .enumerate()
        .all(|(i, b)| b.is_ascii_digit() || b == b'.' || (i == 0 && b == b'-'))
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whether `text` is a valid display value: a finite numeral with at most
/// one decimal point.
pub fn is_valid_display(text: &str) -> bool {
    text.matches('.').count() <= 1 && parse_display(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(value: f64) -> String {
        format_number(value, &DisplaySettings::default())
    }

    #[test]
    fn test_integers_have_no_fraction() {
        assert_eq!(fmt(12.0), "12");
        assert_eq!(fmt(-7.0), "-7");
        assert_eq!(fmt(1e21), "1000000000000000000000");
    }

    #[test]
    fn test_float_artifacts_are_rounded() {
        assert_eq!(fmt(0.1 + 0.2), "0.3");
        assert_eq!(fmt(1.0 / 3.0), "0.333333333333");
        assert_eq!(fmt(2.0 / 3.0), "0.666666666667");
    }

    #[test]
    fn test_negative_zero() {
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(-1e-30), "-0.000000000000000000000000000001");
    }

    #[test]
    fn test_precision_setting() {
        let settings = DisplaySettings::with_significant_digits(3).unwrap();
        assert_eq!(format_number(3.14159, &settings), "3.14");
        assert_eq!(format_number(123456.0, &settings), "123000");
    }

    #[test]
    fn test_rounding_never_overflows() {
        let settings = DisplaySettings::with_significant_digits(16).unwrap();
        let text = format_number(f64::MAX, &settings);
        assert_eq!(parse_display(&text), Some(f64::MAX));
    }

    #[test]
    fn test_tiny_values_stay_positional() {
        let text = fmt(1e-300);
        assert_eq!(text.len(), 302);
        assert!(text.starts_with("0.000"));
        assert!(text.ends_with('1'));
        assert_eq!(parse_display(&text), Some(1e-300));
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(fmt(f64::INFINITY), "0");
        assert_eq!(fmt(f64::NAN), "0");
    }

    #[test]
    fn test_parse_display() {
        assert_eq!(parse_display("0"), Some(0.0));
        assert_eq!(parse_display("5."), Some(5.0));
        assert_eq!(parse_display("0.25"), Some(0.25));
        assert_eq!(parse_display("-3"), Some(-3.0));
        assert_eq!(parse_display("-"), None);
        assert_eq!(parse_display(""), None);
        assert_eq!(parse_display("inf"), None);
        assert_eq!(parse_display("1e5"), None);
    }

    #[test]
    fn test_is_valid_display() {
        assert!(is_valid_display("0."));
        assert!(!is_valid_display("1.2.3"));
        assert!(!is_valid_display("abc"));
    }
}
