//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: compare every locale snapshot against the reference table
//! - `init`: initialize a locheck configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Snapshot directory (overrides config file)
    #[arg(long)]
    pub snapshots: Option<PathBuf>,

    /// Exclusion document path (overrides config file)
    #[arg(long)]
    pub exclusions: Option<PathBuf>,

    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Check a single locale instead of every discovered snapshot
    #[arg(long)]
    pub locale: Option<String>,

    /// Directory where run results are archived and compared with the
    /// previous run
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare locale snapshots against the reference table for structural
    /// consistency (HTML tags, CSS values, functions, placeholders)
    Check(CheckCommand),
    /// Initialize a new .locheckrc.json configuration file
    Init,
}
