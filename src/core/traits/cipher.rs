use crate::core::errors::Result;
use crate::core::models::symmetric_key::SymmetricKey;

/// Port for authenticated-encryption backends.
///
/// Implementations live in `adapters::cipher` (e.g. AesGcmCodec).
/// A codec turns one container into one self-contained blob and back;
/// decryption must fail closed, never yield partial plaintext.
pub trait CipherCodec: Send + Sync {
    /// Encrypt plaintext under `key`. Must use fresh randomness per call,
    /// so encrypting the same bytes twice yields different blobs.
    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>>;

    /// Verify and decrypt a blob produced by `encrypt`.
    fn decrypt(&self, blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>>;

    /// Human-readable name of this backend (e.g. "aes-256-gcm").
    fn name(&self) -> &str;
}
