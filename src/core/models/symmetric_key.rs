use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length in bytes of a Packlock key (AES-256).
pub const KEY_LEN: usize = 32;

/// An AES-256 key loaded from a key file.
///
/// Lives only for the duration of one backup or restore operation
/// and is wiped from memory when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

// Never leak key material through debug output.
impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey([redacted; {KEY_LEN}])")
    }
}
