//! Options the host's installer reads; linelog only carries them through config.

use serde::Deserialize;

/// How a package installation integrates with the desktop.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct InstallOptions {
    /// Skip desktop integration (menu entries, icons).
    pub skip_desktop: bool,
    /// Install under this application name instead of the package's own.
    pub custom_name: Option<String>,
    /// Skip injecting Wayland environment variables into the launcher.
    pub skip_wayland_env: bool,
}

impl InstallOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn skip_desktop(mut self, skip: bool) -> Self {
        self.skip_desktop = skip;
        self
    }

    #[must_use]
    pub fn custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    #[must_use]
    pub const fn skip_wayland_env(mut self, skip: bool) -> Self {
        self.skip_wayland_env = skip;
        self
    }
}
