use std::path::Path;

use crate::core::errors::Result;

/// Port for container-format backends.
///
/// Implementations live in `adapters::archive` (e.g. TarGzArchiver).
/// The core layer only depends on this trait, never on a concrete format.
pub trait Archiver: Send + Sync {
    /// Pack a file or directory tree into a single container file at
    /// `container`. Directory structure is preserved relative to the
    /// source's parent, so the source's own name is the root entry.
    fn pack(&self, source: &Path, container: &Path) -> Result<()>;

    /// Extract every entry of `container` under `destination`.
    /// Entries that would escape `destination` must be rejected
    /// before anything is written.
    fn unpack(&self, container: &Path, destination: &Path) -> Result<()>;

    /// File extension produced by this format (e.g. "tar.gz").
    fn extension(&self) -> &str;

    /// Human-readable name of this backend (e.g. "tar-gz").
    fn name(&self) -> &str;
}
