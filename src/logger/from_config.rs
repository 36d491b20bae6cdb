//! Logger wiring from a loaded [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::internal;
use crate::output::ConsoleWriter;
use std::sync::Arc;

impl Logger {
    /// Terminal output on stderr plus, when a path is configured, a rotating file.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_with_writer(config, None)
    }

    /// Same as [`Logger::from_config`], but the terminal output draws through `writer`
    /// so the host can keep using it for its own terminal output.
    #[must_use]
    pub fn from_config_with_writer(config: &Config, writer: Option<Arc<ConsoleWriter>>) -> Self {
        let level = config.parse_level();
        internal::debug("LOGGER", &format!("Log level: {level}"));

        let mut builder = LoggerBuilder::new().level(level);
        let mut outputs: Vec<&str> = Vec::new();

        if config.terminal.enabled {
            builder = Self::configure_terminal(builder, config, writer);
            outputs.push("terminal");
        }

        if let Some(path) = config.file_path() {
            internal::debug("FILE", &format!("Configuring file output at {}", path.display()));
            builder = builder
                .file(path)
                .max_size(config.max_size_or_default())
                .max_backups(config.file.max_backups)
                .max_age_days(config.file.max_age_days)
                .compress(config.file.compress)
                .done();
            outputs.push("file");
        }

        if outputs.is_empty() {
            internal::warn("LOGGER", "No outputs enabled");
        } else {
            internal::debug(
                "LOGGER",
                &format!("Outputs enabled: [{}]", outputs.join(", ")),
            );
        }

        builder.build()
    }

    fn configure_terminal(
        builder: LoggerBuilder,
        config: &Config,
        writer: Option<Arc<ConsoleWriter>>,
    ) -> LoggerBuilder {
        internal::debug(
            "TERMINAL",
            &format!(
                "Colors: {}, clear: {}",
                if config.terminal.colors {
                    "enabled"
                } else {
                    "disabled"
                },
                config.terminal.clear_line
            ),
        );

        let mut terminal = builder
            .terminal()
            .colors(config.terminal.colors)
            .time_format(&config.terminal.time_format)
            .clear_mode(config.parse_clear_mode());

        for (level, color) in config.level_colors() {
            terminal = terminal.level_color(level, color);
        }

        if let Some(writer) = writer {
            terminal = terminal.writer(writer);
        }

        terminal.done()
    }
}
