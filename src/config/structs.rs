//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum log level (trace, debug, info, warn, error, fatal, panic).
    pub level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Terminal output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Enable terminal output.
    pub enabled: bool,
    /// Enable colors.
    pub colors: bool,
    /// Timestamp format (strftime).
    pub time_format: String,
    /// Line clearing before each log line (auto, always, never).
    pub clear_line: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: true,
            time_format: "%H:%M:%S".to_string(),
            clear_line: "auto".to_string(),
        }
    }
}

/// Rotating file output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Log file path; the file output is enabled only when this is set.
    pub path: Option<String>,
    /// Rotation threshold (e.g., "10M").
    pub max_size: String,
    /// Rotated files to keep (0 = all).
    pub max_backups: usize,
    /// Maximum age of rotated files in days (0 = no limit).
    pub max_age_days: u32,
    /// Gzip rotated files.
    pub compress: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_size: "10M".to_string(),
            max_backups: 3,
            max_age_days: 28,
            compress: true,
        }
    }
}
