//! `linelog` binary: log from shell scripts, or watch the demo keep log lines
//! clear of a running spinner.
//!
//! Usage:
//!   linelog log <level> <scope> <msg>...     Log a message
//!   linelog demo [--workers N] [--steps N]   Spinner plus concurrent loggers
//!
//! Global flags: --config, --level, --log-file, --no-color, --clear

use clap::Parser;
use linelog::Logger;
use linelog::cli::{Cli, Command, build_internal_logger, cmd_demo, cmd_log, load_config};
use linelog::internal;
use linelog::output::stderr_writer;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli.apply_overrides(&mut config);

    // One writer owns stderr; every logger that prints to the terminal shares it
    let writer = Arc::new(stderr_writer(config.parse_clear_mode()));
    internal::init(build_internal_logger(&config, &writer));
    let logger = Logger::from_config_with_writer(&config, Some(writer));

    match cli.command {
        Command::Log {
            level,
            scope,
            message,
        } => cmd_log(&logger, level.into(), &scope, &message),
        Command::Demo { workers, steps } => cmd_demo(&logger, workers, steps),
    }
}
