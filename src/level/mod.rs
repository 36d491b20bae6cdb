//! Severity levels that gate which records reach the outputs.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a record's level against the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// High-volume instrumentation that would be too noisy outside of development.
    Trace = 0,
    /// Startup, teardown, and state-change details useful for diagnosing issues.
    Debug = 1,
    /// Normal operational milestones: package downloaded, config loaded.
    #[default]
    Info = 2,
    /// Non-fatal anomalies that may need attention (retries, skipped steps).
    Warn = 3,
    /// Failures that prevent the current operation from completing.
    Error = 4,
    /// Failures after which the host is expected to exit.
    Fatal = 5,
    /// Broken invariants after which the host is expected to abort.
    Panic = 6,
}

impl Level {
    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }

    /// Three-letter console tag, fixed width so messages line up.
    #[must_use]
    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::Trace => "TRC",
            Self::Debug => "DBG",
            Self::Info => "INF",
            Self::Warn => "WRN",
            Self::Error => "ERR",
            Self::Fatal => "FTL",
            Self::Panic => "PNC",
        }
    }

    /// Total parse: anything unrecognized falls back to `Info` so a typo in
    /// config or a CLI flag never disables logging.
    #[must_use]
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    /// Used by help output, CLI completion, and tests.
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
            Self::Panic,
        ]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
