pub mod backup;
pub mod generate_key;
pub mod restore;

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::config::app_config::AppConfig;
use crate::core::errors::{PacklockError, Result};

/// Default archive backend when neither flag nor config names one.
pub const DEFAULT_FORMAT: &str = "tar-gz";

/// Default key file name, written to the working directory.
pub const DEFAULT_KEY_FILE: &str = "packlock.key";

/// Resolve the key file path: flag wins over packlock.toml.
pub fn resolve_key_path(flag: Option<&Path>, config: &AppConfig) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = &config.packlock.key {
        return Ok(PathBuf::from(path));
    }
    Err(PacklockError::InvalidConfig {
        detail: "No key file given. Pass --key <path> or set `key` in packlock.toml.".into(),
    })
}

/// Resolve the archive format name: flag wins over packlock.toml.
pub fn resolve_format(flag: Option<&str>, config: &AppConfig) -> String {
    flag.map(str::to_string)
        .or_else(|| config.packlock.format.clone())
        .unwrap_or_else(|| DEFAULT_FORMAT.to_string())
}

/// Hex SHA-256 of a file, printed after a backup so the artifact can be
/// verified at the destination later.
pub fn file_sha256(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}
