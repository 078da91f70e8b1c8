//! Calculator widget core.
//!
//! This module provides:
//! - An accumulator engine with left-to-right evaluation
//! - A bounded session history of completed computations
//! - Key mapping from keyboard input to calculator events
//! - Display projection and number formatting

mod display;
mod engine;
mod format;
mod history;
mod keys;
mod state;

pub use display::DisplaySnapshot;
pub use engine::CalculatorEngine;
pub use format::{format_number, group_thousands, parse_operand};
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryEntry};
pub use keys::{CalculatorInput, KeyError, parse_keys};
pub use state::{CalculatorState, Mode, Operator};
