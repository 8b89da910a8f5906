use std::path::PathBuf;

/// Direction of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Backup,
    Restore,
}

/// One backup or restore request, built by the CLI layer from named
/// arguments. Created per invocation, never persisted.
#[derive(Debug, Clone)]
pub struct Operation {
    /// What to back up, or the encrypted blob to restore.
    pub source: PathBuf,
    /// Directory the result lands in.
    pub destination: PathBuf,
    /// Path to the 32-byte key file.
    pub key_path: PathBuf,
    pub mode: OperationMode,
}

/// Rendered in command headers, e.g. `backup /data/project → /backups`.
impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verb = match self.mode {
            OperationMode::Backup => "backup",
            OperationMode::Restore => "restore",
        };
        write!(
            f,
            "{verb} {} → {}",
            self.source.display(),
            self.destination.display()
        )
    }
}
