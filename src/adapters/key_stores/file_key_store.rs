use std::path::Path;

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;

use crate::core::errors::{PacklockError, Result};
use crate::core::models::symmetric_key::{SymmetricKey, KEY_LEN};
use crate::core::traits::key_store::KeyStore;

/// Key store backed by plain files: one key, 32 raw bytes, nothing else.
///
/// The key file is the only long-lived credential this tool knows about,
/// which is why `generate` refuses to overwrite an existing one.
pub struct FileKeyStore;

impl KeyStore for FileKeyStore {
    fn load(&self, path: &Path) -> Result<SymmetricKey> {
        // A missing or unreadable file is an I/O problem; KeyFormat is
        // reserved for a file that exists but is not a 32-byte key.
        let bytes = std::fs::read(path)?;

        let arr: [u8; KEY_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| PacklockError::KeyFormat {
                    path: path.to_path_buf(),
                    detail: format!("expected {KEY_LEN} bytes, found {}", bytes.len()),
                })?;

        Ok(SymmetricKey::from_bytes(arr))
    }

    fn generate(&self, path: &Path, force: bool) -> Result<SymmetricKey> {
        if path.exists() && !force {
            return Err(PacklockError::KeyFileExists {
                path: path.to_path_buf(),
            });
        }

        let mut bytes = [0u8; KEY_LEN];
        OsRng.fill_bytes(&mut bytes);

        std::fs::write(path, bytes)?;

        // Key files are credentials; keep them owner-readable only.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(SymmetricKey::from_bytes(bytes))
    }
}
