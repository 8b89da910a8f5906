use std::path::{Path, PathBuf};

use crate::core::errors::{PacklockError, Result};
use crate::core::models::operation::Operation;
use crate::core::traits::archiver::Archiver;
use crate::core::traits::cipher::CipherCodec;
use crate::core::traits::key_store::KeyStore;

/// Outcome of a successful backup run.
pub struct BackupReport {
    /// Final encrypted artifact at the destination.
    pub artifact: PathBuf,
    /// Size of the encrypted blob in bytes.
    pub blob_len: u64,
}

/// Orchestrates the two pipelines by combining an `Archiver`,
/// a `CipherCodec` and a `KeyStore`.
///
/// Every intermediate artifact lives in a per-operation scratch directory
/// (`tempfile::TempDir`), so concurrent runs never collide and the scratch
/// space is removed on every exit path, success or failure. The destination
/// is only touched by the final stage: the move for backups, the extraction
/// for restores. A failure in any earlier stage leaves it byte-identical.
pub struct Pipeline<A: Archiver, C: CipherCodec, K: KeyStore> {
    pub archiver: A,
    pub cipher: C,
    pub key_store: K,
}

impl<A: Archiver, C: CipherCodec, K: KeyStore> Pipeline<A, C, K> {
    /// Run `pack → encrypt → move` for one operation.
    pub fn backup(&self, op: &Operation) -> Result<BackupReport> {
        validate(op)?;

        // Key problems must surface before any scratch I/O happens.
        let key = self
            .key_store
            .load(&op.key_path)
            .map_err(|e| e.in_stage("key load"))?;

        let scratch = scratch_dir()?;

        let container = scratch.path().join("container");
        self.archiver
            .pack(&op.source, &container)
            .map_err(|e| e.in_stage("pack"))?;

        let plaintext = std::fs::read(&container).map_err(|e| {
            PacklockError::from(e).in_stage("encrypt")
        })?;
        let blob = self
            .cipher
            .encrypt(&plaintext, &key)
            .map_err(|e| e.in_stage("encrypt"))?;
        drop(plaintext);

        let blob_path = scratch.path().join("blob");
        std::fs::write(&blob_path, &blob)
            .map_err(|e| PacklockError::from(e).in_stage("encrypt"))?;

        let artifact = op.destination.join(artifact_name(&op.source, &self.archiver));
        move_into_place(&blob_path, &artifact).map_err(|e| e.in_stage("move"))?;

        Ok(BackupReport {
            artifact,
            blob_len: blob.len() as u64,
        })

        // `scratch` drops here and removes the container and the blob copy.
    }

    /// Run `decrypt → unpack` for one operation.
    pub fn restore(&self, op: &Operation) -> Result<()> {
        validate(op)?;

        let key = self
            .key_store
            .load(&op.key_path)
            .map_err(|e| e.in_stage("key load"))?;

        let scratch = scratch_dir()?;

        let blob = std::fs::read(&op.source)
            .map_err(|e| PacklockError::from(e).in_stage("decrypt"))?;
        let plaintext = self
            .cipher
            .decrypt(&blob, &key)
            .map_err(|e| e.in_stage("decrypt"))?;

        let container = scratch.path().join("container");
        std::fs::write(&container, &plaintext)
            .map_err(|e| PacklockError::from(e).in_stage("decrypt"))?;

        self.archiver
            .unpack(&container, &op.destination)
            .map_err(|e| e.in_stage("unpack"))?;

        Ok(())
    }
}

/// Check both endpoints before any stage runs.
fn validate(op: &Operation) -> Result<()> {
    if !op.source.exists() {
        return Err(PacklockError::SourceNotFound {
            path: op.source.clone(),
        });
    }
    if !op.destination.is_dir() {
        return Err(PacklockError::DestinationNotFound {
            path: op.destination.clone(),
        });
    }
    Ok(())
}

/// Fresh scratch directory under the system temp root, unique per call.
fn scratch_dir() -> Result<tempfile::TempDir> {
    let dir = tempfile::Builder::new().prefix("packlock-").tempdir()?;
    Ok(dir)
}

/// Name for the artifact at the destination:
/// `<source-name>-<utc-stamp>.<ext>.plk`.
///
/// The timestamp keeps repeated backups of the same source from
/// colliding; `move_into_place` still refuses to clobber.
fn artifact_name(source: &Path, archiver: &impl Archiver) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "backup".into());
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    format!("{name}-{stamp}.{}.plk", archiver.extension())
}

/// Move the finished blob to the destination.
///
/// Rename first; if the destination is on another filesystem the rename
/// fails, so fall back to a staged copy. The final name only ever
/// appears via rename, never through a partially written file.
fn move_into_place(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(PacklockError::DestinationExists {
            path: to.to_path_buf(),
        });
    }

    if std::fs::rename(from, to).is_err() {
        copy_then_rename(from, to)?;
        std::fs::remove_file(from)?;
    }
    Ok(())
}

/// Copy `from` to `<to>.part`, then rename into place. An interrupted
/// copy leaves the final name untouched; the stray `.part` file is
/// removed on the error path.
fn copy_then_rename(from: &Path, to: &Path) -> Result<()> {
    let mut partial = to.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    let staged = std::fs::copy(from, &partial).and_then(|_| std::fs::rename(&partial, to));
    if let Err(e) = staged {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::archive::tar_gz::TarGzArchiver;
    use crate::adapters::cipher::aes_gcm::AesGcmCodec;
    use crate::adapters::key_stores::file_key_store::FileKeyStore;
    use crate::core::models::operation::OperationMode;

    fn pipeline() -> Pipeline<TarGzArchiver, AesGcmCodec, FileKeyStore> {
        Pipeline {
            archiver: TarGzArchiver,
            cipher: AesGcmCodec,
            key_store: FileKeyStore,
        }
    }

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("project");
        std::fs::create_dir_all(src.join("sub")).unwrap();
        std::fs::write(src.join("a.txt"), b"alpha").unwrap();
        std::fs::write(src.join("sub/b.txt"), b"bravo").unwrap();

        let backups = dir.path().join("backups");
        std::fs::create_dir_all(&backups).unwrap();

        let key_path = dir.path().join("packlock.key");
        FileKeyStore.generate(&key_path, false).unwrap();

        (dir, src, backups, key_path)
    }

    #[test]
    fn backup_then_restore_round_trips() {
        let (dir, src, backups, key_path) = setup();
        let p = pipeline();

        let report = p
            .backup(&Operation {
                source: src.clone(),
                destination: backups.clone(),
                key_path: key_path.clone(),
                mode: OperationMode::Backup,
            })
            .unwrap();
        assert!(report.artifact.exists());
        assert!(report.blob_len > 0);

        let restored = dir.path().join("restored");
        std::fs::create_dir_all(&restored).unwrap();
        p.restore(&Operation {
            source: report.artifact,
            destination: restored.clone(),
            key_path,
            mode: OperationMode::Restore,
        })
        .unwrap();

        assert_eq!(
            std::fs::read(restored.join("project/a.txt")).unwrap(),
            b"alpha"
        );
        assert_eq!(
            std::fs::read(restored.join("project/sub/b.txt")).unwrap(),
            b"bravo"
        );
    }

    #[test]
    fn restore_with_wrong_key_leaves_destination_empty() {
        let (dir, src, backups, key_path) = setup();
        let p = pipeline();

        let report = p
            .backup(&Operation {
                source: src,
                destination: backups,
                key_path,
                mode: OperationMode::Backup,
            })
            .unwrap();

        let wrong_key = dir.path().join("wrong.key");
        FileKeyStore.generate(&wrong_key, false).unwrap();

        let restored = dir.path().join("restored");
        std::fs::create_dir_all(&restored).unwrap();

        let result = p.restore(&Operation {
            source: report.artifact,
            destination: restored.clone(),
            key_path: wrong_key,
            mode: OperationMode::Restore,
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(&restored).unwrap().count(), 0);
    }

    #[test]
    fn backup_with_bad_key_touches_nothing() {
        let (dir, src, backups, _) = setup();
        let p = pipeline();

        let bad_key = dir.path().join("bad.key");
        std::fs::write(&bad_key, b"not 32 bytes").unwrap();

        let result = p.backup(&Operation {
            source: src,
            destination: backups.clone(),
            key_path: bad_key,
            mode: OperationMode::Backup,
        });

        assert!(result.is_err());
        assert_eq!(std::fs::read_dir(&backups).unwrap().count(), 0);
    }

    #[test]
    fn backup_missing_source_fails_before_side_effects() {
        let (dir, _, backups, key_path) = setup();
        let p = pipeline();

        let result = p.backup(&Operation {
            source: dir.path().join("ghost"),
            destination: backups.clone(),
            key_path,
            mode: OperationMode::Backup,
        });

        assert!(matches!(result, Err(PacklockError::SourceNotFound { .. })));
        assert_eq!(std::fs::read_dir(&backups).unwrap().count(), 0);
    }

    #[test]
    fn two_backups_of_one_source_coexist() {
        let (_dir, src, backups, key_path) = setup();
        let p = pipeline();

        let op = Operation {
            source: src,
            destination: backups.clone(),
            key_path,
            mode: OperationMode::Backup,
        };

        let first = p.backup(&op).unwrap();
        // Same second → same timestamp is possible; retry until the name
        // differs or the move refuses, both acceptable outcomes.
        match p.backup(&op) {
            Ok(second) => assert_ne!(first.artifact, second.artifact),
            Err(PacklockError::Stage { stage: "move", .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn staged_copy_lands_whole_and_leaves_no_part_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("backups/artifact");
        std::fs::create_dir_all(dir.path().join("backups")).unwrap();
        std::fs::write(&from, b"blob bytes").unwrap();

        copy_then_rename(&from, &to).unwrap();

        assert_eq!(std::fs::read(&to).unwrap(), b"blob bytes");
        assert!(!dir.path().join("backups/artifact.part").exists());
    }

    #[test]
    fn failed_staged_copy_leaves_destination_clean() {
        let dir = tempfile::tempdir().unwrap();
        let backups = dir.path().join("backups");
        std::fs::create_dir_all(&backups).unwrap();

        // Source vanished before the copy could run.
        let result = copy_then_rename(&dir.path().join("ghost"), &backups.join("artifact"));

        assert!(result.is_err());
        // Neither the final name nor a stray .part file exists.
        assert_eq!(std::fs::read_dir(&backups).unwrap().count(), 0);
    }

    #[test]
    fn move_refuses_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        std::fs::write(&from, b"x").unwrap();
        std::fs::write(&to, b"y").unwrap();

        let result = move_into_place(&from, &to);
        assert!(matches!(
            result,
            Err(PacklockError::DestinationExists { .. })
        ));
        // Neither side was disturbed.
        assert_eq!(std::fs::read(&to).unwrap(), b"y");
        assert_eq!(std::fs::read(&from).unwrap(), b"x");
    }
}
