//! # Calculator Engine
//!
//! A pure reducer, `(CalculatorState, Event) -> CalculatorState`, plus the
//! [`Calculator`] convenience wrapper that owns one state value.
//!
//! Chained operations fold left-to-right as each new operator arrives, so
//! `3 + 4 × 2 =` is `(3 + 4) × 2 = 14`. There is no precedence.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::engine::Calculator;
//!
//! let mut calc = Calculator::new();
//! for key in ["3", "+", "4", "+", "5", "="] {
//!     calc.press(key).unwrap();
//! }
//! assert_eq!(calc.display_text(), "12");
//! ```

use crate::errors::CalcResult;
use crate::event::{Digit, Event};
use crate::format::{format_number, parse_display};
use crate::operator::{evaluate, Operator};
use crate::settings::DisplaySettings;
use crate::state::{CalculatorState, INITIAL_DISPLAY};

/// Apply one event to a state, returning the next state.
pub fn reduce(state: CalculatorState, event: Event, settings: &DisplaySettings) -> CalculatorState {
    let next = match event {
        Event::Digit(digit) => input_digit(state, digit),
        Event::DecimalPoint => input_decimal_point(state),
        Event::Backspace => backspace(state),
        Event::Clear => CalculatorState::default(),
        Event::Operator(op) => apply_operator(state, op, settings),
        Event::Equals => apply_equals(state, settings),
    };

    tracing::debug!(
        ?event,
        display = %next.display,
        previous_value = ?next.previous_value,
        operation = ?next.operation,
        waiting_for_operand = next.waiting_for_operand,
        "applied event"
    );
    next
}

fn input_digit(state: CalculatorState, digit: Digit) -> CalculatorState {
    let d = digit.as_char();

    if state.waiting_for_operand {
        return CalculatorState {
            display: d.to_string(),
            waiting_for_operand: false,
            ..state
        };
    }

    // Suppress the leading zero
    if state.display == INITIAL_DISPLAY {
        return CalculatorState {
            display: d.to_string(),
            ..state
        };
    }

    let mut display = state.display.clone();
    display.push(d);

    // Past f64 range the text would no longer parse; drop the digit
    if parse_display(&display).is_none() {
        tracing::debug!(digits = state.display.len(), "display is full; ignoring digit");
        return state;
    }
    CalculatorState { display, ..state }
}

fn input_decimal_point(state: CalculatorState) -> CalculatorState {
    if state.waiting_for_operand {
        return CalculatorState {
            display: "0.".to_string(),
            waiting_for_operand: false,
            ..state
        };
    }

    if state.display.contains('.') {
        return state;
    }

    let mut display = state.display;
    display.push('.');
    CalculatorState { display, ..state }
}

fn backspace(state: CalculatorState) -> CalculatorState {
    let mut display = state.display;
    display.pop();

    // Empty, or a lone "-" left over from a negative result
    if parse_display(&display).is_none() {
        display = INITIAL_DISPLAY.to_string();
    }

    CalculatorState { display, ..state }
}

fn apply_operator(state: CalculatorState, op: Operator, settings: &DisplaySettings) -> CalculatorState {
    let input_value = input_value(&state.display);

    match (state.previous_value, state.operation) {
        (None, _) => CalculatorState {
            previous_value: Some(input_value),
            operation: Some(op),
            waiting_for_operand: true,
            ..state
        },
        (Some(previous), Some(pending)) => {
            let (new_value, display) = fold(previous, input_value, pending, settings);
            CalculatorState {
                display,
                previous_value: Some(new_value),
                operation: Some(op),
                waiting_for_operand: true,
            }
        }
        (Some(previous), None) => {
            tracing::warn!(previous, "previous value without an operation; installing new pair");
            CalculatorState {
                previous_value: Some(input_value),
                operation: Some(op),
                waiting_for_operand: true,
                ..state
            }
        }
    }
}

fn apply_equals(state: CalculatorState, settings: &DisplaySettings) -> CalculatorState {
    let (Some(previous), Some(op)) = (state.previous_value, state.operation) else {
        return state;
    };

    let (_, display) = fold(previous, input_value(&state.display), op, settings);
    CalculatorState {
        display,
        previous_value: None,
        operation: None,
        waiting_for_operand: true,
    }
}

/// Evaluate `a op b` and render it.
///
/// Returns the full-precision result together with its display text; only
/// the text is rounded. A non-finite result echoes `a`, the same policy as
/// division by zero.
fn fold(a: f64, b: f64, op: Operator, settings: &DisplaySettings) -> (f64, String) {
    let mut result = evaluate(a, b, op);
    if !result.is_finite() {
        tracing::warn!(a, b, ?op, "result overflowed; keeping left operand");
        result = a;
    }

    (result, format_number(result, settings))
}

fn input_value(text: &str) -> f64 {
    parse_display(text).unwrap_or_else(|| {
        tracing::warn!(display = %text, "display is not a numeral; reading it as 0");
        0.0
    })
}

/// A calculator instance: one [`CalculatorState`] and the settings used to
/// format its results.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
    settings: DisplaySettings,
}

impl Calculator {
    /// Fresh calculator with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh calculator with the given settings
    pub fn with_settings(settings: DisplaySettings) -> Self {
        Calculator {
            state: CalculatorState::default(),
            settings,
        }
    }

    /// Restore a calculator from a snapshot.
    ///
    /// Fails with `InvalidInput` if the snapshot breaks a state invariant or
    /// the settings are out of range.
    pub fn from_state(state: CalculatorState, settings: DisplaySettings) -> CalcResult<Self> {
        state.validate()?;
        settings.validate()?;
        Ok(Calculator { state, settings })
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, event, &self.settings);
    }

    /// Apply the event for a keypad label such as `"7"`, `"×"` or `"⌫"`.
    ///
    /// An unknown label leaves the state untouched.
    pub fn press(&mut self, label: &str) -> CalcResult<()> {
        let event = Event::from_label(label)?;
        self.handle(event);
        Ok(())
    }

    pub fn input_digit(&mut self, digit: Digit) {
        self.handle(Event::Digit(digit));
    }

    pub fn input_decimal_point(&mut self) {
        self.handle(Event::DecimalPoint);
    }

    pub fn backspace(&mut self) {
        self.handle(Event::Backspace);
    }

    pub fn clear(&mut self) {
        self.handle(Event::Clear);
    }

    pub fn apply_operator(&mut self, op: Operator) {
        self.handle(Event::Operator(op));
    }

    pub fn apply_equals(&mut self) {
        self.handle(Event::Equals);
    }

    /// The main display text, verbatim
    pub fn display_text(&self) -> &str {
        &self.state.display
    }

    /// The secondary "pending calculation" line, e.g. `"3 +"`
    pub fn pending_text(&self) -> Option<String> {
        self.state.pending_text(&self.settings)
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Copy of the current state, suitable for serializing
    pub fn snapshot(&self) -> CalculatorState {
        self.state.clone()
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }
}
