//! Habit Ledger - Main Entry Point
//!
//! Interactive shell over an in-memory habit store. The actual
//! implementation is in the `habit_ledger` library.

use anyhow::{Context, Result};
use clap::Parser;
use habit_ledger::{FixedClock, HabitHandler, HabitStore, StoreSnapshot, SystemClock, logging};
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Habit Ledger - track punch-in habits, month reward cards and statistics
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pin "today" to a date (YYYY-MM-DD) instead of the system clock
    #[arg(long)]
    today: Option<String>,

    /// Start from a TOML snapshot instead of the bundled demo data
    #[arg(long, conflicts_with = "empty")]
    seed: Option<PathBuf>,

    /// Start with an empty store
    #[arg(long)]
    empty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write rotated log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = args
        .log_level
        .as_deref()
        .unwrap_or(logging::default_log_level());
    logging::init_logging(level, args.log_dir.as_deref())?;

    let store = match &args.today {
        Some(raw) => {
            let today = habit_ledger::validation::parse_date(raw)?;
            build_store(&args, FixedClock(today))?
        }
        None => build_store(&args, SystemClock)?,
    };
    info!("event=session_start today={}", store.today());

    let mut handler = HabitHandler::new(store);
    run_shell(&mut handler)
}

fn build_store(args: &Args, clock: impl habit_ledger::Clock + 'static) -> Result<HabitStore> {
    if args.empty {
        return Ok(HabitStore::new(clock));
    }
    match &args.seed {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read seed file {}", path.display()))?;
            let snapshot = StoreSnapshot::from_toml(&content)?;
            Ok(HabitStore::from_snapshot(snapshot, clock)?)
        }
        None => Ok(HabitStore::with_demo_data(clock)?),
    }
}

fn run_shell(handler: &mut HabitHandler) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    writeln!(stdout, "habit-ledger {}. Type 'help' for commands.", env!("CARGO_PKG_VERSION"))?;

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        match handler.execute(trimmed) {
            Ok(reply) if reply.is_empty() => {}
            Ok(reply) => writeln!(stdout, "{}", reply.trim_end())?,
            Err(e) => {
                warn!("event=command_failed error={:?}", e.to_string());
                writeln!(stdout, "Error: {}", e)?;
            }
        }
    }

    info!("event=session_end");
    Ok(())
}
