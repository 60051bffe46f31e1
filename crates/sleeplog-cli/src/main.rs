use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sleeplog_cli::commands::timer::TimerAction;
use sleeplog_cli::commands::{entries, list, status, timer};
use sleeplog_cli::{Cli, Commands, Config};
use sleeplog_core::SleepLog;
use sleeplog_db::Database;

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let (db, config) = open_database(cli.config.as_deref())?;
    let mut log = db
        .load_log(&config.store_name)
        .context("failed to restore sleep log")?;
    let now = Local::now();
    let mut out = std::io::stdout().lock();

    let changed = dispatch(&mut out, &mut log, command, &now)?;

    if changed {
        db.save_log(&config.store_name, &log, now.with_timezone(&Utc))
            .context("failed to save sleep log")?;
        tracing::debug!(store = %config.store_name, "snapshot written");
    }
    out.flush()?;

    Ok(())
}

/// Runs one command against the log. Returns whether it changed.
fn dispatch<W: Write>(
    out: &mut W,
    log: &mut SleepLog,
    command: Commands,
    now: &DateTime<Local>,
) -> Result<bool> {
    let action = match command {
        Commands::Start => TimerAction::Start,
        Commands::Stop => TimerAction::Stop,
        Commands::Resume => TimerAction::Resume,
        Commands::Reset => TimerAction::Reset,
        Commands::SetStart { time } => TimerAction::SetStart(time),
        Commands::SetEnd { time } => TimerAction::SetEnd(time),
        Commands::Save { start, end } => {
            return entries::save(out, log, start.as_deref(), end.as_deref(), now);
        }
        Commands::Edit { id, start, end } => {
            return entries::edit(out, log, &id, start.as_deref(), end.as_deref(), now);
        }
        Commands::Delete { id } => return entries::delete(out, log, &id),
        Commands::List { json } => {
            list::run(out, log, &Local, json)?;
            return Ok(false);
        }
        Commands::Status { json } => {
            status::run(out, log, now, json)?;
            return Ok(false);
        }
    };
    timer::run(out, log, &action, now)
}
