//! Number formatting and operand parsing.
//!
//! Results are stored back into the pending operand as text, so the string
//! produced here is what the user sees and what the next operation parses.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Longest leading float literal: sign, digits with optional fraction,
    /// optional complete exponent, or an infinity.
    static ref NUMERIC_PREFIX: Regex = Regex::new(
        r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)"
    ).unwrap();
}

/// Parse an operand string as a float.
///
/// Reads the longest numeric prefix, so an exponent trimmed by backspace
/// (`1e+`) still reads as `1`. Empty text or a bare "." yields NaN.
pub fn parse_operand(text: &str) -> f64 {
    NUMERIC_PREFIX
        .find(text.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Convert a result to its canonical decimal string.
///
/// Uses the shortest representation that round-trips, with no rounding.
/// Very large and very small magnitudes switch to exponent form with an
/// explicit exponent sign (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return text.to_string();
    }
    // Covers -0 as well.
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return format_exponent(value);
    }

    format!("{}", value)
}

fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// Group the integer part of a numeric string with thousand separators.
///
/// Anything that isn't a plain decimal (NaN, Infinity, exponent form) is
/// returned unchanged. The fractional part and a trailing "." are kept as typed.
pub fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    if int_part.is_empty() || !int_part.chars().all(|c| c.is_ascii_digit()) {
        return text.to_string();
    }

    let mut result = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    let grouped: String = result.chars().rev().collect();
    format!("{}{}{}", sign, grouped, frac_part)
}
