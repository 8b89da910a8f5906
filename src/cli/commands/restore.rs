use std::path::Path;

use crate::adapters::archive::tar_gz::TarGzArchiver;
use crate::adapters::cipher::aes_gcm::AesGcmCodec;
use crate::adapters::key_stores::file_key_store::FileKeyStore;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::core::errors::{PacklockError, Result};
use crate::core::models::operation::{Operation, OperationMode};
use crate::core::services::pipeline::Pipeline;
use crate::core::traits::archiver::Archiver;

/// Execute the `packlock restore` command.
///
/// Decrypts a backup blob and extracts the container under the
/// destination directory. Decryption happens in scratch space, so a
/// wrong key or a tampered blob writes nothing to the destination.
pub fn execute(
    backup_file: &Path,
    destination: &Path,
    key_flag: Option<&Path>,
    format_flag: Option<&str>,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let config = AppConfig::load(Path::new("."))?;
    let key_path = super::resolve_key_path(key_flag, &config)?;
    let format = super::resolve_format(format_flag, &config);

    let op = Operation {
        source: backup_file.to_path_buf(),
        destination: destination.to_path_buf(),
        key_path,
        mode: OperationMode::Restore,
    };

    match format.as_str() {
        "tar-gz" | "tgz" => restore_with(TarGzArchiver, &op, verbose, quiet),
        other => Err(PacklockError::InvalidConfig {
            detail: format!("Unknown archive format: '{other}'. Use 'tar-gz'."),
        }),
    }
}

/// Run the pipeline with a given archive backend.
fn restore_with<A: Archiver>(
    archiver: A,
    op: &Operation,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    let pipeline = Pipeline {
        archiver,
        cipher: AesGcmCodec,
        key_store: FileKeyStore,
    };

    if !quiet {
        output::header(&format!("Starting {op}"));
        if verbose {
            output::detail(&format!("Key file: {}", op.key_path.display()));
        }
    }

    if quiet {
        pipeline.restore(op)?;
    } else {
        let sp = output::spinner("Decrypting and extracting...");
        match pipeline.restore(op) {
            Ok(()) => output::finish_spinner(
                sp,
                &format!("Restored into {}", op.destination.display()),
            ),
            Err(e) => {
                sp.finish_and_clear();
                return Err(e);
            }
        }
    }

    Ok(())
}
