//! CLI module for linelog.
//!
//! This module provides the command-line interface using Clap.

pub mod commands;
pub mod util;

use crate::config::Config;
use crate::output::ClearMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl From<LogLevel> for crate::level::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Fatal => Self::Fatal,
            LogLevel::Panic => Self::Panic,
        }
    }
}

/// Line clearing for CLI arguments.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ClearArg {
    Auto,
    Always,
    Never,
}

impl From<ClearArg> for ClearMode {
    fn from(arg: ClearArg) -> Self {
        match arg {
            ClearArg::Auto => Self::Auto,
            ClearArg::Always => Self::Always,
            ClearArg::Never => Self::Never,
        }
    }
}

/// linelog - Structured logging that stays out of the way of progress bars.
#[derive(Parser)]
#[command(name = "linelog", version, about = "Structured logging that stays out of the way of progress bars")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Minimum level; unknown values mean info
    #[arg(long = "level", id = "min_level", global = true, value_name = "LEVEL")]
    pub min_level: Option<String>,
    /// Also write JSON lines to this rotating file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<String>,
    /// Disable ANSI colors
    #[arg(long, global = true)]
    pub no_color: bool,
    /// Clear the terminal line before each log line
    #[arg(long, global = true, value_enum)]
    pub clear: Option<ClearArg>,
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Log a single message.
    Log {
        /// Log level
        #[arg(value_enum)]
        level: LogLevel,
        /// Scope/component name
        scope: String,
        /// Log message
        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Draw a spinner while worker threads log through the same terminal.
    Demo {
        /// Number of worker threads
        #[arg(long, default_value_t = 3)]
        workers: usize,
        /// Log lines per worker
        #[arg(long, default_value_t = 5)]
        steps: usize,
    },
}

impl Cli {
    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(level) = &self.min_level {
            config.general.level.clone_from(level);
        }
        if let Some(path) = &self.log_file {
            config.file.path = Some(path.clone());
        }
        if self.no_color {
            config.terminal.colors = false;
        }
        if let Some(clear) = self.clear {
            config.terminal.clear_line = ClearMode::from(clear).as_str().to_string();
        }
    }
}

pub use commands::{cmd_demo, cmd_log};
pub use util::{build_internal_logger, load_config};
