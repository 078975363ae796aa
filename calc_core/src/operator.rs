//! # Operators
//!
//! The four binary operators and their evaluation. Evaluation is strictly
//! pairwise; chains are folded left-to-right by the engine, never by
//! precedence.

use serde::{Deserialize, Serialize};

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// All operators, in keypad order
    pub const ALL: [Operator; 4] = [
        Operator::Divide,
        Operator::Multiply,
        Operator::Subtract,
        Operator::Add,
    ];

    /// Symbol shown on the keypad and in the pending line
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Parse a keypad symbol, accepting the ASCII spellings as well.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" | "−" => Some(Operator::Subtract),
            "×" | "*" | "x" | "X" => Some(Operator::Multiply),
            "÷" | "/" => Some(Operator::Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate `a op b`.
///
/// Division by zero does not fail: the dividend is returned unchanged.
///
/// # Example
///
/// ```rust
/// use calc_core::operator::{evaluate, Operator};
///
/// assert_eq!(evaluate(3.0, 4.0, Operator::Add), 7.0);
/// assert_eq!(evaluate(5.0, 0.0, Operator::Divide), 5.0);
/// ```
pub fn evaluate(a: f64, b: f64, op: Operator) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => {
            if b != 0.0 {
                a / b
            } else {
                a
            }
        }
    }
}
