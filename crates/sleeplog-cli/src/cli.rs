//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Sleep timer and sleep log.
///
/// Start a timer when you go to bed, stop it when you wake up, and save the
/// session to a log kept across runs.
#[derive(Debug, Parser)]
#[command(name = "sleeplog", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the sleep timer now.
    Start,

    /// Stop the running timer now.
    Stop,

    /// Resume a stopped timer from its original start.
    Resume,

    /// Clear the timer without saving.
    Reset,

    /// Set the timer start to a time today.
    SetStart {
        /// Wall-clock time (HH:MM).
        time: String,
    },

    /// Set the timer end to a time today.
    SetEnd {
        /// Wall-clock time (HH:MM).
        time: String,
    },

    /// Save the timer as a sleep entry.
    ///
    /// `--start` and `--end` override the timer's values.
    Save {
        /// Start time (RFC 3339, YYYY-MM-DDTHH:MM, or "N hours ago").
        #[arg(long)]
        start: Option<String>,

        /// End time (RFC 3339, YYYY-MM-DDTHH:MM, or "N hours ago").
        #[arg(long)]
        end: Option<String>,
    },

    /// Change the start or end of a saved entry.
    Edit {
        /// Entry ID.
        id: String,

        /// New start time.
        #[arg(long)]
        start: Option<String>,

        /// New end time.
        #[arg(long)]
        end: Option<String>,
    },

    /// Delete a saved entry.
    Delete {
        /// Entry ID.
        id: String,
    },

    /// List saved entries, newest first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the timer and time since last sleep.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
