use std::path::PathBuf;

/// All domain errors for Packlock.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum PacklockError {
    #[error(
        "Source not found: {path}\n\n  \
         Check that the path is correct and the file or directory exists."
    )]
    SourceNotFound { path: PathBuf },

    #[error(
        "Destination not found: {path}\n\n  \
         The destination must be an existing directory.\n  \
         Create it first: mkdir -p <destination>"
    )]
    DestinationNotFound { path: PathBuf },

    #[error(
        "Refusing to overwrite {path}\n\n  \
         A file with that name already exists at the destination.\n  \
         Remove or rename it, then run the operation again."
    )]
    DestinationExists { path: PathBuf },

    #[error(
        "Invalid key file {path}: {detail}\n\n  \
         A Packlock key is exactly 32 raw bytes.\n  \
         Generate one with: packlock generate-key"
    )]
    KeyFormat { path: PathBuf, detail: String },

    #[error(
        "Key file already exists: {path}\n\n  \
         Overwriting it would make every backup encrypted with the old key\n  \
         unrecoverable. Pass --force if you really mean it."
    )]
    KeyFileExists { path: PathBuf },

    #[error(
        "Decryption failed: wrong key or corrupted backup\n\n  \
         The authentication check did not pass, so no plaintext was written.\n\n  \
         Solutions:\n    \
         → Check that --key points at the key used to create this backup\n    \
         → Verify the backup file was not truncated or modified in transit"
    )]
    Authentication,

    #[error("Not a valid backup container: {detail}")]
    Format { detail: String },

    #[error(
        "Archive entry escapes the destination: {entry}\n\n  \
         The container holds a path that would be written outside the\n  \
         restore directory. Extraction was aborted and nothing was written."
    )]
    PathTraversal { entry: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error("{stage} failed: {source}")]
    Stage {
        stage: &'static str,
        #[source]
        source: Box<PacklockError>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PacklockError {
    /// Attribute an error to the pipeline stage it came from.
    /// Keeps the innermost stage if one is already recorded.
    pub fn in_stage(self, stage: &'static str) -> Self {
        match self {
            err @ PacklockError::Stage { .. } => err,
            other => PacklockError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PacklockError>;
