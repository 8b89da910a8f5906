use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::symmetric_key::SymmetricKey;

/// Port for loading and generating symmetric keys.
pub trait KeyStore: Send + Sync {
    /// Read and validate the key blob at `path`.
    fn load(&self, path: &Path) -> Result<SymmetricKey>;

    /// Generate a fresh random key and write it to `path`.
    /// Refuses to overwrite an existing file unless `force`.
    fn generate(&self, path: &Path, force: bool) -> Result<SymmetricKey>;
}
