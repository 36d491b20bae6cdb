//! Startup helpers shared by the binary's commands.

use crate::config::Config;
use crate::logger::Logger;
use crate::output::ConsoleWriter;
use std::path::Path;
use std::sync::Arc;

/// A missing file, explicit or default, yields the default config.
///
/// # Errors
/// The file exists but is not valid TOML for [`Config`].
pub fn load_config(path: Option<&Path>) -> Result<Config, crate::Error> {
    path.map_or_else(Config::load, Config::load_from)
}

/// Diagnostics share the terminal writer with the main logger, never the log file:
/// a second rotating handle on the same path would fight over rotation.
#[must_use]
pub fn build_internal_logger(config: &Config, writer: &Arc<ConsoleWriter>) -> Logger {
    let mut builder = Logger::builder().level(config.parse_level());
    if config.terminal.enabled {
        builder = builder
            .terminal()
            .colors(config.terminal.colors)
            .time_format(&config.terminal.time_format)
            .writer(Arc::clone(writer))
            .done();
    }
    builder.build()
}
