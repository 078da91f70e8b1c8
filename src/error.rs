//! Error types surfaced by the calculator engine.

use thiserror::Error;

/// Failure of a calculator operation.
///
/// Only computation can fail; digit entry, clear and backspace are total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// The divisor of a `/` operation parsed to exactly zero.
    #[error("Cannot divide by zero")]
    DivisionByZero,
}
