mod menu;
mod models;
mod session;
mod storage;
mod types;

use std::io::{stderr, stdin, stdout, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::menu::{write_account_listing, Console, MenuLoop};
use crate::session::SessionController;
use crate::storage::LedgerFile;

const DEFAULT_LEDGER_PATH: &str = "bank_data.txt";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum RunMode {
    /// The login / create account menu.
    Interactive,
    /// Print every account and exit without touching the ledger.
    List
}

fn main() -> Result<()> {
    //NOTE: Positional arguments only, all optional: bank-console [ledger_path] [log_level] [mode]
    let args: Vec<String> = std::env::args().collect();

    let path = args.get(1)
        .map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_PATH));
    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::ERROR);
    let mode = args.get(3)
        .map(|s| parse_run_mode(s)).unwrap_or(RunMode::Interactive);

    setup_logging(log_level);

    let controller = SessionController::load(LedgerFile::new(&path))
        .with_context(|| format!("Could not load ledger at {}", path.display()))?;

    info!("Ledger ready with {} accounts", controller.store().len());

    if mode == RunMode::List {
        write_account_listing(controller.store(), stdout().lock())?;
        return Ok(());
    }

    let clear_screen = stdout().is_terminal();
    let console = Console::new(stdin().lock(), stdout().lock(), clear_screen);

    MenuLoop::new(controller, console).run()?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn parse_run_mode(mode: &str) -> RunMode {
    match mode.to_lowercase().as_str() {
        "interactive" => RunMode::Interactive,
        "list" => RunMode::List,
        _ => {
            eprintln!("Invalid mode '{}', defaulting to 'interactive'", mode);
            RunMode::Interactive
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout belongs to the interactive menu, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
