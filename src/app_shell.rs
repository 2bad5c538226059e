//! App shell descriptor for the native wrapper
//!
//! A plain record of the three values the packaging tool reads: the
//! application id, its display name, and the directory holding the built web
//! assets. It is stored as `capacitor.config.json` at the repository root.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name the native wrapper looks for
pub const DESCRIPTOR_FILE: &str = "capacitor.config.json";

/// Native app shell configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppShellConfig {
    /// Reverse-DNS application identifier, e.g. "town.flyer.app"
    pub app_id: String,
    /// Display name shown under the app icon
    pub app_name: String,
    /// Directory with the built web assets, relative to the project root
    pub web_dir: PathBuf,
}

impl AppShellConfig {
    /// The FlyerTown app shell
    pub fn flyertown() -> Self {
        Self {
            app_id: "town.flyer.app".to_string(),
            app_name: "FlyerTown".to_string(),
            web_dir: PathBuf::from("dist"),
        }
    }

    /// Read and validate a descriptor from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        tracing::debug!(
            path = %path.display(),
            app_id = %config.app_id,
            "loaded app shell descriptor"
        );
        Ok(config)
    }

    /// Validate and write the descriptor as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Identifier and name must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(Error::config("appId", "application id is empty"));
        }
        if self.app_name.trim().is_empty() {
            return Err(Error::config("appName", "application name is empty"));
        }
        Ok(())
    }
}

impl Default for AppShellConfig {
    fn default() -> Self {
        Self::flyertown()
    }
}
