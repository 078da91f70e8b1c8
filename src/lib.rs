//! Calculator widget engine for a new-tab dashboard.
//!
//! The engine owns the operand/operator state machine and a bounded session
//! history. UI shells deliver key events and receive display, history and
//! error callbacks.

pub mod calculator;
pub mod config;
pub mod error;
pub mod shell;

pub use calculator::{CalculatorEngine, CalculatorInput, DisplaySnapshot, History, Operator};
pub use config::{Config, ConfigSource};
pub use error::CalcError;
