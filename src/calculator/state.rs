//! Calculator state: the operand strings, the active operator and the reset flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A binary operator selectable on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    #[serde(rename = "%")]
    Modulo,
}

impl Operator {
    /// The symbol shown in expressions and history entries.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Parse an operator from its symbol or a keypad alias.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "*" | "x" | "X" | "×" => Some(Self::Multiply),
            "/" | "÷" => Some(Self::Divide),
            "%" => Some(Self::Modulo),
            _ => None,
        }
    }

    /// Apply the operator to two operands with IEEE-754 semantics.
    ///
    /// Division by zero is not checked here; `%` follows the sign of `lhs`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => lhs / rhs,
            Self::Modulo => lhs % rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Where the engine is in its input cycle, derived from [`CalculatorState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Typing an operand (also the initial state).
    Entering,
    /// An operator is chosen and no right-hand operand has been typed yet.
    HasOperator,
    /// A result was just produced; the next digit starts a fresh operand.
    JustComputed,
}

/// Raw calculator state.
///
/// Operands are kept as the text the user typed so that trailing decimal
/// points and leading zeros display exactly as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CalculatorState {
    /// The operand currently being typed.
    pub pending: String,
    /// The operand fixed in place when an operator was chosen.
    pub accumulated: String,
    /// `None` iff no operation is pending.
    pub operator: Option<Operator>,
    /// The next digit or decimal point starts a fresh operand.
    pub reset_on_next_digit: bool,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the current input mode.
    pub fn mode(&self) -> Mode {
        if self.reset_on_next_digit {
            Mode::JustComputed
        } else if self.operator.is_some() && self.pending.is_empty() {
            Mode::HasOperator
        } else {
            Mode::Entering
        }
    }

    /// Both operands are empty.
    pub fn is_blank(&self) -> bool {
        self.pending.is_empty() && self.accumulated.is_empty()
    }
}
