//! The accumulator calculator engine.
//!
//! Evaluation is strictly left to right: choosing a new operator collapses
//! the pending operation first, so `2 + 3 * 4 =` yields 20.

use super::display::DisplaySnapshot;
use super::format::{format_number, parse_operand};
use super::history::History;
use super::keys::CalculatorInput;
use super::state::{CalculatorState, Mode, Operator};
use crate::error::CalcError;
use std::sync::Arc;

type DisplayCallback = Arc<dyn Fn(&DisplaySnapshot) + Send + Sync>;
type HistoryCallback = Arc<dyn Fn(&History) + Send + Sync>;
type ErrorCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Calculator widget engine: state, session history and output callbacks.
pub struct CalculatorEngine {
    state: CalculatorState,
    history: History,
    group_thousands: bool,
    on_display: Option<DisplayCallback>,
    on_history: Option<HistoryCallback>,
    on_error: Option<ErrorCallback>,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::with_history(History::default())
    }

    /// Create an engine with a preconfigured (usually differently sized) history.
    pub fn with_history(history: History) -> Self {
        Self {
            state: CalculatorState::new(),
            history,
            group_thousands: false,
            on_display: None,
            on_history: None,
            on_error: None,
        }
    }

    /// Show thousand separators in display snapshots.
    pub fn set_group_thousands(&mut self, group: bool) {
        self.group_thousands = group;
    }

    /// Set the callback invoked after every mutating operation.
    pub fn set_on_display(
        &mut self,
        callback: impl Fn(&DisplaySnapshot) + Send + Sync + 'static,
    ) {
        self.on_display = Some(Arc::new(callback));
    }

    /// Set the callback invoked when a history entry is added.
    pub fn set_on_history(&mut self, callback: impl Fn(&History) + Send + Sync + 'static) {
        self.on_history = Some(Arc::new(callback));
    }

    /// Set the callback invoked with a human-readable message on failure.
    pub fn set_on_error(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_error = Some(Arc::new(callback));
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Current display projection.
    pub fn display(&self) -> DisplaySnapshot {
        DisplaySnapshot::from_state(&self.state, self.group_thousands)
    }

    /// Route one input event to its operation.
    pub fn handle(&mut self, input: CalculatorInput) -> Result<(), CalcError> {
        match input {
            CalculatorInput::Digit(d) => self.append_digit(d),
            CalculatorInput::Decimal => self.append_decimal(),
            CalculatorInput::Operator(op) => return self.choose_operator(op),
            CalculatorInput::Equals => return self.compute(),
            CalculatorInput::Percent => self.percent(),
            CalculatorInput::Clear => self.clear(),
            CalculatorInput::Backspace => self.backspace(),
        }
        Ok(())
    }

    /// Append a digit to the pending operand.
    pub fn append_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            tracing::debug!(?digit, "Ignoring non-digit input");
            return;
        }

        if self.state.reset_on_next_digit {
            self.state.pending.clear();
            self.state.reset_on_next_digit = false;
        }

        if self.state.pending == "0" {
            self.state.pending.clear();
        }
        self.state.pending.push(digit);

        self.refresh_display();
    }

    /// Append a decimal point; at most one per operand.
    pub fn append_decimal(&mut self) {
        if self.state.reset_on_next_digit {
            self.state.pending = "0".to_string();
            self.state.reset_on_next_digit = false;
        }

        if self.state.pending.is_empty() {
            self.state.pending.push('0');
        }
        if !self.state.pending.contains('.') {
            self.state.pending.push('.');
        }

        self.refresh_display();
    }

    /// Select an operator, collapsing any chained operation first.
    ///
    /// Fails only when the collapsed operation divides by zero; the state is
    /// then left untouched.
    pub fn choose_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        if self.state.is_blank() {
            return Ok(());
        }

        if self.state.pending.is_empty() {
            tracing::trace!(%op, "Replacing operator");
            self.state.operator = Some(op);
            self.refresh_display();
            return Ok(());
        }

        if !self.state.accumulated.is_empty() {
            self.compute()?;
        }

        self.state.accumulated = std::mem::take(&mut self.state.pending);
        self.state.operator = Some(op);
        self.state.reset_on_next_digit = false;

        self.refresh_display();
        Ok(())
    }

    /// Evaluate the pending operation.
    ///
    /// No-op when no operator is active or a result was just produced, so
    /// repeated equals presses don't re-apply the last operation.
    pub fn compute(&mut self) -> Result<(), CalcError> {
        let Some(op) = self.state.operator else {
            return Ok(());
        };
        if self.state.reset_on_next_digit {
            tracing::debug!("Result already computed, ignoring equals");
            return Ok(());
        }

        let rhs_text = if self.state.pending.is_empty() {
            self.state.accumulated.clone()
        } else {
            self.state.pending.clone()
        };
        let lhs = parse_operand(&self.state.accumulated);
        let rhs = parse_operand(&rhs_text);

        if op == Operator::Divide && rhs == 0.0 {
            let err = CalcError::DivisionByZero;
            self.report_error(&err);
            return Err(err);
        }

        let result = op.apply(lhs, rhs);
        let result_text = format_number(result);
        let expression = format!(
            "{} {} {} = {}",
            self.state.accumulated, op, rhs_text, result_text
        );
        tracing::trace!(%expression, "Computed");

        self.history.push(expression, result);

        self.state.pending = result_text;
        self.state.accumulated.clear();
        self.state.operator = None;
        self.state.reset_on_next_digit = true;

        self.notify_history();
        self.refresh_display();
        Ok(())
    }

    /// Divide the pending operand by 100.
    pub fn percent(&mut self) {
        let value = parse_operand(&self.state.pending);
        if value.is_nan() {
            tracing::debug!(pending = %self.state.pending, "Percent on non-number ignored");
            return;
        }

        let result = value / 100.0;
        let result_text = format_number(result);
        let expression = format!("{}% = {}", format_number(value), result_text);

        self.history.push(expression, result);

        self.state.pending = result_text;
        self.state.reset_on_next_digit = true;

        self.notify_history();
        self.refresh_display();
    }

    /// Reset all state. History is kept.
    pub fn clear(&mut self) {
        self.state = CalculatorState::new();
        self.refresh_display();
    }

    /// Remove the last character of the pending operand.
    pub fn backspace(&mut self) {
        self.state.pending.pop();
        self.refresh_display();
    }

    fn refresh_display(&self) {
        if let Some(callback) = &self.on_display {
            callback(&self.display());
        }
    }

    fn notify_history(&self) {
        if let Some(callback) = &self.on_history {
            callback(&self.history);
        }
    }

    fn report_error(&self, err: &CalcError) {
        let message = err.to_string();
        tracing::debug!(%message, "Calculation failed");

        if let Some(callback) = &self.on_display {
            callback(&DisplaySnapshot::error(
                &self.state,
                message.as_str(),
                self.group_thousands,
            ));
        }
        if let Some(callback) = &self.on_error {
            callback(&message);
        }
    }
}
