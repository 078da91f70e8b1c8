//! Display projection of the calculator state.

use super::format::group_thousands;
use super::state::CalculatorState;
use serde::Serialize;

/// What the display callback receives after each mutating operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    /// Accumulated operand, operator and pending operand, e.g. `5 + 3`.
    pub expression: String,
    /// The pending operand, "0" when nothing is typed, or an error message.
    pub result: String,
    /// Whether `result` holds an error message.
    pub is_error: bool,
}

impl DisplaySnapshot {
    /// Project the state for display.
    ///
    /// With `group` set, numeric operands get thousand separators; the state's
    /// raw text is never modified.
    pub fn from_state(state: &CalculatorState, group: bool) -> Self {
        let show = |text: &str| {
            if group {
                group_thousands(text)
            } else {
                text.to_string()
            }
        };

        let mut parts = Vec::with_capacity(3);
        if !state.accumulated.is_empty() {
            parts.push(show(&state.accumulated));
        }
        if let Some(op) = state.operator {
            parts.push(op.symbol().to_string());
        }
        if !state.pending.is_empty() {
            parts.push(show(&state.pending));
        }

        let result = if state.pending.is_empty() {
            "0".to_string()
        } else {
            show(&state.pending)
        };

        Self {
            expression: parts.join(" "),
            result,
            is_error: false,
        }
    }

    /// Snapshot for a failed operation. The expression still shows the state.
    pub fn error(state: &CalculatorState, message: impl Into<String>, group: bool) -> Self {
        Self {
            result: message.into(),
            is_error: true,
            ..Self::from_state(state, group)
        }
    }

    /// Single-line rendering used by the terminal shell.
    pub fn render_line(&self) -> String {
        if self.is_error {
            format!("{} | error: {}", self.expression, self.result)
        } else {
            format!("{} | {}", self.expression, self.result)
        }
    }
}
