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
use crate::core::traits::cipher::CipherCodec;

/// Execute the `packlock backup` command.
///
/// Packs the source, encrypts the container and moves the blob into the
/// destination directory. The destination is only touched by the final
/// move; any earlier failure leaves it untouched.
pub fn execute(
    source: &Path,
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
        source: source.to_path_buf(),
        destination: destination.to_path_buf(),
        key_path,
        mode: OperationMode::Backup,
    };

    match format.as_str() {
        "tar-gz" | "tgz" => backup_with(TarGzArchiver, &op, verbose, quiet),
        other => Err(PacklockError::InvalidConfig {
            detail: format!("Unknown archive format: '{other}'. Use 'tar-gz'."),
        }),
    }
}

/// Run the pipeline with a given archive backend.
fn backup_with<A: Archiver>(archiver: A, op: &Operation, verbose: bool, quiet: bool) -> Result<()> {
    let format_name = archiver.name().to_string();

    let pipeline = Pipeline {
        archiver,
        cipher: AesGcmCodec,
        key_store: FileKeyStore,
    };

    if !quiet {
        output::header(&format!("Starting {op}"));
        if verbose {
            output::detail(&format!("Key file: {}", op.key_path.display()));
            output::detail(&format!("Container format: {format_name}"));
        }
    }

    let report = if quiet {
        pipeline.backup(op)?
    } else {
        let sp = output::spinner(&format!(
            "Packing and encrypting with {}...",
            pipeline.cipher.name()
        ));
        match pipeline.backup(op) {
            Ok(report) => {
                output::finish_spinner(
                    sp,
                    &format!("Encrypted backup written ({} bytes)", report.blob_len),
                );
                report
            }
            Err(e) => {
                sp.finish_and_clear();
                return Err(e);
            }
        }
    };

    if !quiet {
        output::success(&format!("Saved to {}", report.artifact.display()));
        let fingerprint = super::file_sha256(&report.artifact)?;
        output::detail(&format!("SHA-256: {fingerprint}"));
        println!("\n  Keep the key file safe. Without it this backup cannot be restored.");
    }

    Ok(())
}
