//! # Calculator State
//!
//! The single record the engine owns. It is replaced wholesale on every
//! transition and serializes to JSON for snapshots.
//!
//! ## Structure
//!
//! ```text
//! CalculatorState
//! ├── display: String              (what the user sees, always a numeral)
//! ├── previous_value: Option<f64>  (left operand of the pending operation)
//! ├── operation: Option<Operator>  (pending operator)
//! └── waiting_for_operand: bool    (next digit starts a fresh number)
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_number, is_valid_display};
use crate::operator::Operator;
use crate::settings::DisplaySettings;

/// Text shown on a fresh or cleared display
pub const INITIAL_DISPLAY: &str = "0";

/// Calculator state record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// The textual value currently shown
    pub display: String,

    /// Left operand of a pending binary operation
    pub previous_value: Option<f64>,

    /// Pending operator
    pub operation: Option<Operator>,

    /// Set right after an operator or equals; the next digit or decimal point
    /// replaces the display instead of appending to it
    pub waiting_for_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            display: INITIAL_DISPLAY.to_string(),
            previous_value: None,
            operation: None,
            waiting_for_operand: false,
        }
    }
}

impl CalculatorState {
    /// Secondary display line, e.g. `"3 +"`, when an operation is pending.
    pub fn pending_text(&self, settings: &DisplaySettings) -> Option<String> {
        match (self.previous_value, self.operation) {
            (Some(value), Some(op)) => Some(format!("{} {}", format_number(value, settings), op)),
            _ => None,
        }
    }

    /// Check the state invariants. Used when restoring a snapshot that did
    /// not come from the engine.
    pub fn validate(&self) -> CalcResult<()> {
        if !is_valid_display(&self.display) {
            return Err(CalcError::invalid_input(
                "display",
                self.display.clone(),
                "Must be a finite decimal numeral with at most one '.'",
            ));
        }

        if let Some(value) = self.previous_value {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    "previous_value",
                    value.to_string(),
                    "Must be finite",
                ));
            }
        }

        if self.operation.is_some() && self.previous_value.is_none() {
            return Err(CalcError::invalid_input(
                "operation",
                format!("{:?}", self.operation),
                "An operation requires a previous value",
            ));
        }

        Ok(())
    }

    /// Parse a JSON snapshot and check its invariants.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let state: CalculatorState =
            serde_json::from_str(json).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid state JSON: {}", e),
            })?;
        state.validate()?;
        Ok(state)
    }
}
