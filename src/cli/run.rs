//! Main entry point for the locheck CLI.
//!
//! Dispatches to the appropriate command handler based on the parsed
//! arguments and converts the run outcome into an exit status.

use std::{fs, path::Path};

use anyhow::Result;
use colored::Colorize;

use super::{
    args::{Arguments, CheckCommand, Command},
    exit_status::ExitStatus,
    report,
};
use crate::{
    config::{CONFIG_FILE_NAME, default_config_json},
    core::CheckContext,
    history,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => {
            init()?;
            println!("Created {CONFIG_FILE_NAME}");
            Ok(ExitStatus::Success)
        }
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn check(cmd: CheckCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let verbose = args.common.verbose;

    let ctx = CheckContext::new(&args.common, args.locale.as_deref())?;
    if verbose {
        eprintln!(
            "Checking {} locale(s) against reference '{}'",
            ctx.locales.len(),
            ctx.config.reference_locale
        );
    }

    let result = ctx.execute();
    report::print(&result, verbose);

    if let Some(ref output_dir) = args.output {
        let delta = history::compare_and_archive(output_dir, &result)?;
        print_delta(&delta);
    }

    if result.diagnostics.is_empty() && result.general_errors.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}

fn print_delta(delta: &history::RunDelta) {
    if !delta.new.is_empty() {
        println!("\n{}", format!("New errors ({}):", delta.new.len()).red());
        println!("{}", delta.new.join("\n"));
    }
    if !delta.fixed.is_empty() {
        println!(
            "\n{}",
            format!("Fixed errors ({}):", delta.fixed.len()).green()
        );
        println!("{}", delta.fixed.join("\n"));
    }
    if !delta.has_changes() {
        println!("\nNo changes ({}).", delta.total);
    }
}

fn init() -> Result<()> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(())
}
