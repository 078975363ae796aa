//! # Events
//!
//! One [`Event`] per key press. Shells translate their button labels with
//! [`Event::from_label`] and hand the result to the engine.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::event::Event;
//! use calc_core::operator::Operator;
//!
//! assert_eq!(Event::from_label("×").unwrap(), Event::Operator(Operator::Multiply));
//! assert_eq!(Event::from_label("⌫").unwrap(), Event::Backspace);
//! assert!(Event::from_label("√").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::operator::Operator;

/// Label of the backspace key
pub const BACKSPACE_LABEL: &str = "⌫";

/// Label of the clear key
pub const CLEAR_LABEL: &str = "C";

/// A single decimal digit, `0` through `9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Create a digit from its numeric value.
    pub fn new(value: u8) -> CalcResult<Self> {
        if value <= 9 {
            Ok(Digit(value))
        } else {
            Err(CalcError::invalid_input("digit", value.to_string(), "Digit must be 0-9"))
        }
    }

    /// Numeric value of the digit
    pub fn value(self) -> u8 {
        self.0
    }

    /// The digit as an ASCII character
    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = CalcError;

    fn try_from(c: char) -> CalcResult<Self> {
        match c.to_digit(10) {
            Some(d) => Ok(Digit(d as u8)),
            None => Err(CalcError::invalid_input("digit", c.to_string(), "Not a decimal digit")),
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> CalcResult<Self> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.0
    }
}

/// A user action, corresponding 1:1 to an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value")]
pub enum Event {
    Digit(Digit),
    DecimalPoint,
    Backspace,
    Clear,
    Operator(Operator),
    Equals,
}

impl Event {
    /// Map a keypad label to an event.
    ///
    /// Accepts the keypad labels (`0`-`9`, `.`, `C`, `⌫`, `+`, `-`, `×`,
    /// `÷`, `=`) and the keyboard spellings a terminal sends (`*`, `/`, `x`,
    /// `c`, `<`, `\u{8}`, `Enter`, `Backspace`).
    pub fn from_label(label: &str) -> CalcResult<Self> {
        let mut chars = label.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Ok(digit) = Digit::try_from(c) {
                return Ok(Event::Digit(digit));
            }
        }

        if let Some(op) = Operator::from_symbol(label) {
            return Ok(Event::Operator(op));
        }

        match label {
            "." | "," => Ok(Event::DecimalPoint),
            "=" | "Enter" => Ok(Event::Equals),
            "C" | "c" | "AC" | "Escape" => Ok(Event::Clear),
            BACKSPACE_LABEL | "<" | "\u{8}" | "Backspace" => Ok(Event::Backspace),
            _ => Err(CalcError::invalid_key(label)),
        }
    }

    /// The keypad label for this event
    pub fn label(&self) -> String {
        match self {
            Event::Digit(d) => d.as_char().to_string(),
            Event::DecimalPoint => ".".to_string(),
            Event::Backspace => BACKSPACE_LABEL.to_string(),
            Event::Clear => CLEAR_LABEL.to_string(),
            Event::Operator(op) => op.symbol().to_string(),
            Event::Equals => "=".to_string(),
        }
    }
}

/// Split a key sequence such as `"12+3="` into events, one per character.
///
/// Whitespace is skipped. Stops at the first unknown key.
pub fn parse_key_sequence(keys: &str) -> CalcResult<Vec<Event>> {
    keys.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            let mut buf = [0u8; 4];
            Event::from_label(c.encode_utf8(&mut buf))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_bounds() {
        assert_eq!(Digit::new(9).unwrap().value(), 9);
        assert!(Digit::new(10).is_err());
        assert_eq!(Digit::try_from('7').unwrap().as_char(), '7');
        assert_eq!(Digit::try_from('a').unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_keypad_labels() {
        assert_eq!(Event::from_label("0").unwrap(), Event::Digit(Digit::new(0).unwrap()));
        assert_eq!(Event::from_label(".").unwrap(), Event::DecimalPoint);
        assert_eq!(Event::from_label("C").unwrap(), Event::Clear);
        assert_eq!(Event::from_label("⌫").unwrap(), Event::Backspace);
        assert_eq!(Event::from_label("÷").unwrap(), Event::Operator(Operator::Divide));
        assert_eq!(Event::from_label("=").unwrap(), Event::Equals);
    }

    #[test]
    fn test_label_round_trip() {
        let events = [
            Event::Digit(Digit::new(4).unwrap()),
            Event::DecimalPoint,
            Event::Backspace,
            Event::Clear,
            Event::Operator(Operator::Subtract),
            Event::Equals,
        ];
        for event in events {
            assert_eq!(Event::from_label(&event.label()).unwrap(), event);
        }
    }

    #[test]
    fn test_unknown_label() {
        let err = Event::from_label("%").unwrap_err();
        assert_eq!(err, CalcError::invalid_key("%"));
        assert!(Event::from_label("12").is_err());
        assert!(Event::from_label("").is_err());
    }

    #[test]
    fn test_parse_key_sequence() {
        let events = parse_key_sequence("3 + 4 =").unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[1], Event::Operator(Operator::Add));
        assert_eq!(events[3], Event::Equals);

        let err = parse_key_sequence("3+%").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_KEY");
    }

    #[test]
    fn test_digit_serializes_as_number() {
        let json = serde_json::to_string(&Event::Digit(Digit::new(5).unwrap())).unwrap();
        assert_eq!(json, r#"{"event":"Digit","value":5}"#);
        let bad: Result<Digit, _> = serde_json::from_str("12");
        assert!(bad.is_err());
    }
}
