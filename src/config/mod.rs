//! TOML configuration loading. Separated from struct definitions so the loading
//! logic stays independent of the serde schema.

mod structs;

pub use structs::{FileConfig, GeneralConfig, TerminalConfig};

use crate::fmt::Color;
use crate::install::InstallOptions;
use crate::internal;
use crate::level::Level;
use crate::output::ClearMode;
use crate::rotate::{DEFAULT_MAX_SIZE, parse_size};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A completely empty config file must still produce a working logger; `#[serde(default)]`
/// on every field ensures zero-config works out of the box.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Severity filtering applies to all outputs.
    pub general: GeneralConfig,
    pub terminal: TerminalConfig,
    pub file: FileConfig,
    /// Level name to `#RRGGBB` overrides for the console tag.
    pub colors: HashMap<String, String>,
    /// Carried for the host's installer; linelog itself ignores it.
    pub install: InstallOptions,
}

impl Config {
    /// Loads the default config file, or defaults when there is none.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined or TOML parsing hits a syntax error.
    pub fn load() -> Result<Self, crate::Error> {
        let path = Self::get_config_path()?;
        Self::load_from(&path)
    }

    /// Loads configuration from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    /// The file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// # Errors
    /// TOML syntax errors or type mismatches.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config dir>/linelog/linelog.toml`, following the platform's conventions.
    ///
    /// # Errors
    /// The platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "linelog")
            .map(|dirs| dirs.config_dir().join("linelog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// Unknown level strings fall back to `Info`.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        Level::parse_lossy(&self.general.level)
    }

    /// Unknown modes fall back to `Auto`.
    #[must_use]
    pub fn parse_clear_mode(&self) -> ClearMode {
        self.terminal.clear_line.parse().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using auto"));
            ClearMode::Auto
        })
    }

    /// The log file path with `~` expanded; `None` when the file output is off.
    #[must_use]
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
    }

    /// # Errors
    /// The size string is not something like "512K", "10M" or "1G".
    pub fn max_size_bytes(&self) -> Result<u64, crate::Error> {
        parse_size(&self.file.max_size)
            .ok_or_else(|| crate::Error::InvalidSize(self.file.max_size.clone()))
    }

    /// Like [`Config::max_size_bytes`], but falls back to 10 MiB with a diagnostic.
    #[must_use]
    pub fn max_size_or_default(&self) -> u64 {
        self.max_size_bytes().unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using default"));
            DEFAULT_MAX_SIZE
        })
    }

    /// Level colors from the `[colors]` table; malformed entries are skipped with a diagnostic.
    #[must_use]
    pub fn level_colors(&self) -> Vec<(Level, Color)> {
        let mut colors = Vec::new();
        for (name, hex) in &self.colors {
            match (name.parse::<Level>(), Color::from_hex(hex)) {
                (Ok(level), Some(color)) => colors.push((level, color)),
                _ => internal::warn("CONFIG", &format!("Invalid color entry: {name} = {hex}")),
            }
        }
        colors.sort_by_key(|(level, _)| *level);
        colors
    }
}
