use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{PacklockError, Result};

/// Optional per-directory configuration read from `packlock.toml`.
///
/// Everything here is a default; command-line flags always win.
///
/// ```toml
/// [packlock]
/// format = "tar-gz"
/// key = "/keys/filekey.key"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub packlock: PacklockSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PacklockSection {
    /// Default archive container format.
    pub format: Option<String>,
    /// Default key file path.
    pub key: Option<String>,
}

impl AppConfig {
    /// Load `packlock.toml` from `dir`, or defaults when it is absent.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join("packlock.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        toml::from_str(&content).map_err(|e| PacklockError::InvalidConfig {
            detail: format!("Failed to parse packlock.toml: {e}"),
        })
    }
}
