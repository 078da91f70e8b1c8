//! Key mapping for the calculator keypad.
//!
//! Translates keyboard key names and typed keypad characters into discrete
//! calculator inputs.

use super::state::Operator;
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Matches a run of keypad characters that can be typed without spaces.
    /// Allows: digits, decimal separators, operators, "=", "c" (clear), "p" (percent).
    static ref KEYPAD_CHARS: Regex = Regex::new(
        r"^[0-9\.,\+\-−\*xX×/÷%=cCpP]+$"
    ).unwrap();
}

/// A single discrete input event delivered to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalculatorInput {
    /// A digit key `0`-`9`.
    Digit(char),
    /// The decimal point key.
    Decimal,
    /// An operator key.
    Operator(Operator),
    /// The equals key.
    Equals,
    /// The percent button (divides the pending operand by 100).
    Percent,
    /// The clear key.
    Clear,
    /// The backspace key.
    Backspace,
}

/// Input that doesn't map to any calculator key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key: {0}")]
    Unknown(String),
}

impl CalculatorInput {
    /// Map a keyboard key name or a single keypad character.
    ///
    /// `%` is the modulo operator; the percent button is `p` or `Percent`.
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(input) = named_key(key) {
            return Some(input);
        }

        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' | ',' => Some(Self::Decimal),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            'p' | 'P' => Some(Self::Percent),
            _ => Operator::from_symbol(c.encode_utf8(&mut [0; 4])).map(Self::Operator),
        }
    }
}

fn named_key(key: &str) -> Option<CalculatorInput> {
    match key.to_ascii_lowercase().as_str() {
        "enter" | "equals" => Some(CalculatorInput::Equals),
        "escape" | "esc" | "clear" | "delete" => Some(CalculatorInput::Clear),
        "backspace" | "bs" => Some(CalculatorInput::Backspace),
        "percent" => Some(CalculatorInput::Percent),
        "decimal" => Some(CalculatorInput::Decimal),
        _ => None,
    }
}

/// Parse a line of typed input into calculator inputs.
///
/// Tokens are separated by whitespace. A token is either a named key
/// (`Enter`, `Backspace`, ...) or a run of keypad characters such as `12+3=`.
pub fn parse_keys(line: &str) -> Result<Vec<CalculatorInput>, KeyError> {
    let mut inputs = Vec::new();

    for token in line.split_whitespace() {
        if let Some(input) = named_key(token) {
            inputs.push(input);
            continue;
        }

        if !KEYPAD_CHARS.is_match(token) {
            return Err(KeyError::Unknown(token.to_string()));
        }

        for c in token.chars() {
            let input =
                CalculatorInput::from_char(c).ok_or_else(|| KeyError::Unknown(c.to_string()))?;
            inputs.push(input);
        }
    }

    Ok(inputs)
}
