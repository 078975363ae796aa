//! # calc_core - Four-Function Calculator Engine
//!
//! `calc_core` holds all of the calculator's behaviour: a small state record
//! and a pure reducer that applies key-press events to it. Presentation shells
//! (terminal, GUI, web) translate their button labels into [`Event`]s, feed
//! them to the engine and render [`Calculator::display_text`].
//!
//! ## Design Philosophy
//!
//! - **Pure**: `reduce(state, event) -> state`, no hidden globals
//! - **Closed types**: operators and digits cannot hold invalid values
//! - **JSON-First**: state, events and settings implement Serialize/Deserialize
//! - **No failure in transitions**: division by zero echoes the dividend
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::{Calculator, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.press("3").unwrap();
//! calc.apply_operator(Operator::Add);
//! calc.press("4").unwrap();
//! assert_eq!(calc.pending_text().as_deref(), Some("3 +"));
//!
//! calc.apply_equals();
//! assert_eq!(calc.display_text(), "7");
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - The reducer and the `Calculator` wrapper
//! - [`state`] - The calculator state record
//! - [`event`] - Key-press events and label mapping
//! - [`operator`] - The four operators and `evaluate`
//! - [`format`] - Result formatting and display parsing
//! - [`settings`] - Display precision settings
//! - [`errors`] - Structured error types

pub mod engine;
pub mod errors;
pub mod event;
pub mod format;
pub mod operator;
pub mod settings;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use engine::{reduce, Calculator};
pub use errors::{CalcError, CalcResult};
pub use event::{parse_key_sequence, Digit, Event};
pub use operator::{evaluate, Operator};
pub use settings::{load_settings, DisplaySettings};
pub use state::CalculatorState;
