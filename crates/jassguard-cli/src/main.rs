mod cli;
mod commands;
mod logging;

use std::env;
use std::process::ExitCode;

use jassguard_core::Config;

use crate::cli::{Command, USAGE};
use crate::commands::{CommandError, RunSummary};

fn main() -> ExitCode {
    let args = env::args_os()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned());
    let command = match cli::parse_args(args) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    if command == Command::Help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let config = match command.config_path() {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(err) => {
                eprintln!("error: config {path}: {err}");
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };
    logging::init(
        config
            .log_level
            .as_deref()
            .unwrap_or(logging::DEFAULT_DIRECTIVE),
    );

    let result: Result<RunSummary, CommandError> = match command {
        Command::Scan(args) => commands::run_scan(args, &config),
        Command::Inject(args) => commands::run_inject(args, &config),
        Command::Help => Ok(RunSummary::default()),
    };

    match result {
        Ok(summary) if summary.failed == 0 => ExitCode::SUCCESS,
        Ok(summary) => {
            tracing::warn!(failed = summary.failed, processed = summary.processed, "some maps failed");
            ExitCode::FAILURE
        }
        Err(err) => {
            tracing::error!(%err, "run aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
