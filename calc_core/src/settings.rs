//! # Display Settings
//!
//! The one knob the engine has: how many significant digits a computed result
//! keeps before it is written to the display. Settings serialize to a small
//! JSON file so a shell can ship its own defaults.
//!
//! ```json
//! { "significant_digits": 12 }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::DisplaySettings;
//!
//! let settings = DisplaySettings::from_json(r#"{ "significant_digits": 8 }"#).unwrap();
//! assert_eq!(settings.significant_digits, 8);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default number of significant digits kept in a displayed result
pub const DEFAULT_SIGNIFICANT_DIGITS: u32 = 12;

/// Largest useful precision: an `f64` round-trips through 17 digits
pub const MAX_SIGNIFICANT_DIGITS: u32 = 17;

/// Formatting settings for computed results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Significant digits kept when a result is written to the display.
    /// Typed input is never rounded.
    pub significant_digits: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
        }
    }
}

impl DisplaySettings {
    /// Settings with the given precision, validated.
    pub fn with_significant_digits(significant_digits: u32) -> CalcResult<Self> {
        let settings = DisplaySettings { significant_digits };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> CalcResult<()> {
        if !(1..=MAX_SIGNIFICANT_DIGITS).contains(&self.significant_digits) {
            return Err(CalcError::invalid_input(
                "significant_digits",
                self.significant_digits.to_string(),
                format!("Must be between 1 and {}", MAX_SIGNIFICANT_DIGITS),
            ));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: DisplaySettings =
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid settings JSON: {}", e),
            })?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Load settings from a JSON file.
///
/// # Returns
///
/// * `Ok(DisplaySettings)` - Parsed and validated settings
/// * `Err(CalcError::FileError)` - The file could not be read
/// * `Err(CalcError::SerializationError)` - The file is not valid settings JSON
/// * `Err(CalcError::InvalidInput)` - A value is out of range
pub fn load_settings(path: &Path) -> CalcResult<DisplaySettings> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let settings = DisplaySettings::from_json(&contents).map_err(|e| match e {
        CalcError::SerializationError { reason } => CalcError::SerializationError {
            reason: format!("{} ({})", reason, path.display()),
        },
        other => other,
    })?;

    tracing::debug!(path = %path.display(), ?settings, "loaded display settings");
    Ok(settings)
}
