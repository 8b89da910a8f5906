pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Archive, encrypt and relocate backups with a single symmetric key.
#[derive(Parser, Debug)]
#[command(name = "packlock", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Archive container format
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Path to the 32-byte key file
    #[arg(long, global = true, env = "PACKLOCK_KEY")]
    pub key: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Archive a file or directory, encrypt it and move it to a backup directory
    Backup {
        /// File or directory to back up
        source: PathBuf,
        /// Existing directory the encrypted backup lands in
        destination: PathBuf,
    },

    /// Decrypt a backup and extract it under a directory
    Restore {
        /// Encrypted backup file produced by `packlock backup`
        backup_file: PathBuf,
        /// Existing directory to extract into
        destination: PathBuf,
    },

    /// Generate a fresh symmetric key file
    GenerateKey {
        /// Where to write the key (default: ./packlock.key)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Overwrite an existing key file
        #[arg(long)]
        force: bool,
    },
}
