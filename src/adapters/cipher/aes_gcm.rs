use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::core::errors::{PacklockError, Result};
use crate::core::models::symmetric_key::SymmetricKey;
use crate::core::traits::cipher::CipherCodec;

/// Size of the AES-GCM nonce in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// Envelope magic: "PLK" + format version 1.
const MAGIC: [u8; 4] = *b"PLK\x01";

/// AES-256-GCM codec producing self-contained binary blobs.
///
/// Blob layout: `magic(4) | nonce(12) | ciphertext+tag`. The nonce is
/// drawn fresh from the OS RNG on every call, so encrypting the same
/// container twice never yields the same blob.
pub struct AesGcmCodec;

impl CipherCodec for AesGcmCodec {
    fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| PacklockError::Authentication)?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| PacklockError::Authentication)?;

        let mut blob = Vec::with_capacity(MAGIC.len() + NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&MAGIC);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    fn decrypt(&self, blob: &[u8], key: &SymmetricKey) -> Result<Vec<u8>> {
        if blob.len() < MAGIC.len() + NONCE_LEN {
            return Err(PacklockError::Format {
                detail: format!("blob too short ({} bytes)", blob.len()),
            });
        }
        if blob[..MAGIC.len()] != MAGIC {
            return Err(PacklockError::Format {
                detail: "missing PLK header; not a packlock backup".into(),
            });
        }

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| PacklockError::Authentication)?;

        let nonce = Nonce::from_slice(&blob[MAGIC.len()..MAGIC.len() + NONCE_LEN]);
        let ciphertext = &blob[MAGIC.len() + NONCE_LEN..];

        // A wrong key and a flipped bit are indistinguishable here;
        // both fail the tag check and nothing is returned.
        cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| PacklockError::Authentication)
    }

    fn name(&self) -> &str {
        "aes-256-gcm"
    }
}
