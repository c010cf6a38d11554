use crate::report::Format;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Weekly household chore dashboard.
///
/// Runs the interactive dashboard unless a subcommand is given. Progress lives
/// in memory only and is wiped when the ISO week changes.
#[derive(Debug, Parser)]
#[command(name = "choreboard", version, about)]
pub struct Cli {
    /// TOML file with rooms, tick rate and log directory.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write logs to `<DIR>/choreboard.log` (overrides the config file).
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the summary and task log for a fresh week and exit.
    Report {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}
