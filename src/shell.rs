//! Line-oriented terminal shell around the calculator engine.
//!
//! Each input line is a sequence of keys (`12+3=`, `5 / 2 Enter`). After every
//! line the latest display frame is printed as `expression | result`.
//! Lines starting with `:` are shell commands.

use crate::calculator::{CalculatorEngine, DisplaySnapshot, KeyError, parse_keys};
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex};

const HELP: &str = "keys: 0-9 . + - * / % = c p  |  named: Enter Escape Backspace Percent\n\
commands: :history :json :help :quit";

/// Feed a line of keys to the engine.
///
/// Calculation errors are reported through the engine's error callback and
/// don't stop the remaining keys.
pub fn play(engine: &mut CalculatorEngine, line: &str) -> Result<(), KeyError> {
    let inputs = parse_keys(line)?;
    for input in inputs {
        if let Err(err) = engine.handle(input) {
            tracing::debug!(?input, %err, "Input rejected");
        }
    }
    Ok(())
}

/// Run the interactive loop until EOF or `:quit`.
pub fn run<R: BufRead, W: Write>(
    engine: &mut CalculatorEngine,
    input: R,
    mut output: W,
) -> io::Result<()> {
    let frame: Arc<Mutex<Option<DisplaySnapshot>>> = Arc::new(Mutex::new(None));
    let alerts: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

    let frame_slot = Arc::clone(&frame);
    engine.set_on_display(move |snapshot| {
        if snapshot.is_error {
            return;
        }
        if let Ok(mut slot) = frame_slot.lock() {
            *slot = Some(snapshot.clone());
        }
    });
    let alert_sink = Arc::clone(&alerts);
    engine.set_on_error(move |message| {
        if let Ok(mut sink) = alert_sink.lock() {
            sink.push(message.to_string());
        }
    });
    engine.set_on_history(|history| {
        tracing::trace!(entries = history.len(), "History updated");
    });

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match trimmed {
            ":quit" | ":q" => break,
            ":help" => {
                writeln!(output, "{}", HELP)?;
                continue;
            }
            ":history" => {
                if engine.history().is_empty() {
                    writeln!(output, "(no history)")?;
                }
                for entry in engine.history().iter() {
                    writeln!(output, "{}. {}", entry.order, entry.expression)?;
                }
                continue;
            }
            ":json" => {
                let json = engine.history().to_json().map_err(io::Error::other)?;
                writeln!(output, "{}", json)?;
                continue;
            }
            _ => {}
        }

        if let Err(err) = play(engine, trimmed) {
            writeln!(output, "error: {}", err)?;
            continue;
        }

        let messages: Vec<String> = match alerts.lock() {
            Ok(mut sink) => sink.drain(..).collect(),
            Err(_) => Vec::new(),
        };
        for message in messages {
            writeln!(output, "error: {}", message)?;
        }

        let latest = frame.lock().ok().and_then(|mut slot| slot.take());
        let snapshot = latest.unwrap_or_else(|| engine.display());
        writeln!(output, "{}", snapshot.render_line())?;
    }

    output.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn session(script: &str) -> (CalculatorEngine, String) {
        let mut engine = CalculatorEngine::new();
        let mut out = Vec::new();
        run(&mut engine, Cursor::new(script.to_string()), &mut out).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_prints_frame_per_line() {
        let (engine, out) = session("5+\n3\n=\n");
        assert_eq!(out, "5 + | 0\n5 + 3 | 3\n8 | 8\n");
        assert_eq!(engine.state().pending, "8");
    }

    #[test]
    fn test_division_error_reported() {
        let (engine, out) = session("5/0=\n");
        assert_eq!(out, "error: Cannot divide by zero\n5 / 0 | 0\n");
        assert_eq!(engine.state().pending, "0");
    }

    #[test]
    fn test_unknown_key_skips_line() {
        let (engine, out) = session("5 + sin\n");
        assert_eq!(out, "error: unknown key: sin\n");
        assert!(engine.state().pending.is_empty());
    }

    #[test]
    fn test_history_command() {
        let (_, out) = session(":history\n1+1=\n20p\n:history\n");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "(no history)");
        assert_eq!(&lines[3..], &["2. 20% = 0.2", "1. 1 + 1 = 2"]);
    }

    #[test]
    fn test_json_command() {
        let (_, out) = session("2*4=\n:json\n");
        let json = out.split_once('\n').map(|(_, rest)| rest).unwrap();
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value[0]["expression"], "2 * 4 = 8");
    }

    #[test]
    fn test_quit_stops_reading() {
        let (engine, out) = session("1\n:quit\n2\n");
        assert_eq!(out, "1 | 1\n");
        assert_eq!(engine.state().pending, "1");
    }

    #[test]
    fn test_noop_line_still_renders() {
        let (_, out) = session("=\n");
        assert_eq!(out, " | 0\n");
    }

    #[test]
    fn test_play_without_callbacks() {
        let mut engine = CalculatorEngine::new();
        play(&mut engine, "9/0= c 7").unwrap();
        assert_eq!(engine.state().pending, "7");
    }
}
