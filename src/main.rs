use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tabcalc::calculator::History;
use tabcalc::{CalculatorEngine, Config, shell};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabcalc")]
#[command(about = "Accumulator calculator with a left-to-right keypad engine", long_about = None)]
struct Cli {
    /// Path to config file (overrides the default location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of history entries kept for the session
    #[arg(long)]
    history_limit: Option<usize>,

    /// Show thousand separators in the display
    #[arg(long)]
    group_thousands: bool,

    /// Run a key sequence (e.g. "5+3=") and print the final display
    #[arg(short = 'k', long)]
    keys: Option<String>,

    /// With --keys, also print the session history as JSON
    #[arg(long, requires = "keys")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) =
        Config::load_with_source(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log.level)),
        )
        .with_writer(io::stderr)
        .init();
    source.log();

    let limit = cli.history_limit.unwrap_or(config.history.limit);
    let mut engine = CalculatorEngine::with_history(History::new(limit));
    engine.set_group_thousands(cli.group_thousands || config.display.group_thousands);
    tracing::info!(history_limit = limit, "Calculator ready");

    if let Some(keys) = cli.keys {
        engine.set_on_error(|message| eprintln!("error: {}", message));
        shell::play(&mut engine, &keys).context("Invalid key sequence")?;

        println!("{}", engine.display().render_line());
        if cli.json {
            println!("{}", engine.history().to_json()?);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("tabcalc: type keys like 12+3= and press Enter, :help for more");
    }
    shell::run(&mut engine, stdin.lock(), io::stdout().lock()).context("Shell I/O failed")?;

    Ok(())
}
