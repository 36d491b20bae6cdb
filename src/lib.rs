//! `linelog` - structured logging for command-line tools that also draw progress
//! bars and spinners on the same terminal.
//!
//! - Console lines go through a [`LineSyncWriter`] that wipes whatever a spinner left
//!   on the current line before a log line starts, and never interleaves two lines
//! - Optional JSON-lines file with size rotation, backup retention, and gzip
//! - TOML configuration and a builder for programmatic setup
//!
//! # Example
//!
//! ```
//! use linelog::{ClearMode, Level, Logger};
//!
//! let logger = Logger::builder()
//!     .level(Level::Debug)
//!     .terminal()
//!         .colors(false)
//!         .clear_mode(ClearMode::Auto)
//!         .done()
//!     .build();
//!
//! logger.info("MAIN", "Application started");
//! logger.event(Level::Warn, "NET").field("attempt", 2).send("Retrying");
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `linelog` binary

pub mod config;
mod error;
pub mod fmt;
pub mod install;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod rotate;

#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use error::Error;
pub use install::InstallOptions;
pub use level::Level;
pub use logger::{Event, Logger, LoggerBuilder};
pub use output::{
    CLEAR_LINE, ClearMode, ConsoleWriter, FileOutput, JsonOutput, LineSyncWriter, LogRecord,
    Output, TerminalOutput,
};
pub use rotate::RotatingFile;
