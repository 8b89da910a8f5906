use std::path::{Path, PathBuf};

use crate::adapters::key_stores::file_key_store::FileKeyStore;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::key_store::KeyStore;

/// Execute the `packlock generate-key` command.
///
/// Writes 32 random bytes to the output path (default: ./packlock.key).
/// An existing key file is never overwritten without --force, since the
/// old key is the only way to decrypt backups made with it.
pub fn execute(output_path: Option<&Path>, force: bool, quiet: bool) -> Result<()> {
    let path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(super::DEFAULT_KEY_FILE));

    FileKeyStore.generate(&path, force)?;

    if !quiet {
        output::success(&format!("New key written to {}", path.display()));
        output::warning("Anyone holding this file can decrypt your backups.");
        println!("\n  Back it up somewhere safe. If you lose it, your backups are gone.");
    }

    Ok(())
}
