//! Human-readable console lines: `15:04:05 INF SCOPE message key=value`.

use super::color::Color;
use crate::level::Level;
use crate::output::LogRecord;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Write as _;

/// Rendering settings for one console line; cloned into each terminal output.
#[derive(Debug, Clone)]
pub struct ConsoleFormat {
    colors_enabled: bool,
    time_format: String,
    level_colors: HashMap<Level, Color>,
}

impl Default for ConsoleFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleFormat {
    #[must_use]
    pub fn new() -> Self {
        let mut level_colors = HashMap::new();
        level_colors.insert(Level::Trace, Color::purple());
        level_colors.insert(Level::Debug, Color::yellow());
        level_colors.insert(Level::Info, Color::green());
        level_colors.insert(Level::Warn, Color::orange());
        level_colors.insert(Level::Error, Color::red());
        level_colors.insert(Level::Fatal, Color::red());
        level_colors.insert(Level::Panic, Color::red());

        Self {
            colors_enabled: true,
            time_format: "%H:%M:%S".to_string(),
            level_colors,
        }
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    /// strftime-style, passed straight to chrono.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    #[must_use]
    pub fn level_color(mut self, level: Level, color: Color) -> Self {
        self.level_colors.insert(level, color);
        self
    }

    #[must_use]
    pub const fn colors_enabled(&self) -> bool {
        self.colors_enabled
    }

    /// Renders one record as a single line including the trailing newline.
    #[must_use]
    pub fn render(&self, record: &LogRecord) -> String {
        let mut line = String::with_capacity(64 + record.message.len());

        // chrono reports a bad strftime pattern as a fmt::Error, not at parse time
        let mut time = String::new();
        if write!(time, "{}", record.time.format(&self.time_format)).is_err() {
            time = record.time.format("%H:%M:%S").to_string();
        }
        self.push_dim(&mut line, &time);
        line.push(' ');

        let tag = record.level.abbrev();
        if self.colors_enabled {
            let color = self
                .level_colors
                .get(&record.level)
                .copied()
                .unwrap_or(Color::white());
            line.push_str(&super::colorize(tag, color));
        } else {
            line.push_str(tag);
        }
        line.push(' ');

        if !record.scope.is_empty() {
            self.push_dim(&mut line, &escape_breaks(&record.scope));
            line.push(' ');
        }

        line.push_str(&escape_breaks(&record.message));

        for (key, value) in &record.fields {
            line.push(' ');
            let key: &str = &escape_breaks(key);
            let value = render_value(value);
            if self.colors_enabled {
                let value_color = if key == "error" || key == "error_chain" {
                    Color::red()
                } else {
                    Color::white()
                };
                let _ = write!(
                    line,
                    "{}={}",
                    super::colorize(key, Color::cyan()),
                    super::colorize(&value, value_color)
                );
            } else {
                let _ = write!(line, "{key}={value}");
            }
        }

        line.push('\n');
        line
    }

    fn push_dim(&self, line: &mut String, text: &str) {
        if self.colors_enabled {
            let _ = write!(line, "{}{text}{}", Color::DIM, Color::RESET);
        } else {
            line.push_str(text);
        }
    }
}

/// Line breaks inside one record would start a line the terminal writer never
/// saw begin, so nothing clears it.
fn escape_breaks(text: &str) -> Cow<'_, str> {
    if !text.contains(['\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.replace('\n', "\\n").replace('\r', "\\r"))
}

/// Bare strings stay bare unless they would be ambiguous; everything else is compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s)
            if !s.is_empty()
                && !s
                    .chars()
                    .any(|c| c.is_whitespace() || c == '=' || c == '"' || c.is_control()) =>
        {
            s.clone()
        }
        other => other.to_string(),
    }
}
