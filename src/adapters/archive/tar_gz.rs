use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use walkdir::WalkDir;

use crate::core::errors::{PacklockError, Result};
use crate::core::traits::archiver::Archiver;

/// Container backend producing gzip-compressed tar files.
///
/// The root entry is named after the source's final path component, so a
/// backup of `/data/project` restores as `project/` under the destination.
/// Symlinks are skipped during pack: following them can loop and can pull
/// in files outside the tree being backed up.
pub struct TarGzArchiver;

impl TarGzArchiver {
    /// The entry name a source path gets inside the container.
    fn root_name(source: &Path) -> Result<&std::ffi::OsStr> {
        source.file_name().ok_or_else(|| PacklockError::Format {
            detail: format!("source {} has no final path component", source.display()),
        })
    }

    /// Reject entry paths that would land outside the destination.
    fn check_entry_path(entry: &Path) -> Result<()> {
        let escapes = entry.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(PacklockError::PathTraversal {
                entry: entry.to_path_buf(),
            });
        }
        Ok(())
    }
}

impl Archiver for TarGzArchiver {
    fn pack(&self, source: &Path, container: &Path) -> Result<()> {
        let root = PathBuf::from(Self::root_name(source)?);

        let file = File::create(container)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        // Follows a symlinked source itself; links inside the tree are
        // still skipped by the walk below.
        let meta = std::fs::metadata(source)?;
        if meta.is_file() {
            builder.append_path_with_name(source, &root)?;
        } else if meta.is_dir() {
            for entry in WalkDir::new(source).follow_links(false) {
                let entry = entry.map_err(std::io::Error::from)?;
                let rel = entry.path().strip_prefix(source).map_err(|_| {
                    std::io::Error::other(format!(
                        "walk produced {} outside {}",
                        entry.path().display(),
                        source.display()
                    ))
                })?;
                let name = root.join(rel);

                let ftype = entry.file_type();
                if ftype.is_dir() {
                    builder.append_dir(&name, entry.path())?;
                } else if ftype.is_file() {
                    builder.append_path_with_name(entry.path(), &name)?;
                }
                // Symlinks and special files are skipped.
            }
        } else {
            return Err(PacklockError::SourceNotFound {
                path: source.to_path_buf(),
            });
        }

        // finish() flushes the tar trailer and the gzip stream.
        builder.into_inner()?.finish()?;
        Ok(())
    }

    fn unpack(&self, container: &Path, destination: &Path) -> Result<()> {
        // First pass: validate every entry path before touching the
        // destination, so a traversal attempt writes nothing at all.
        let file = File::open(container)?;
        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        for entry in archive.entries().map_err(to_format_error)? {
            let entry = entry.map_err(to_format_error)?;
            let path = entry.path().map_err(to_format_error)?;
            Self::check_entry_path(&path)?;
        }

        // Second pass: actually extract.
        let file = File::open(container)?;
        let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
        for entry in archive.entries().map_err(to_format_error)? {
            let mut entry = entry.map_err(to_format_error)?;
            // unpack_in re-checks containment as a second line of defense.
            entry.unpack_in(destination)?;
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        "tar.gz"
    }

    fn name(&self) -> &str {
        "tar-gz"
    }
}

/// Tar-level read failures mean the blob decrypted fine but is not a
/// container we produced.
fn to_format_error(e: std::io::Error) -> PacklockError {
    PacklockError::Format {
        detail: e.to_string(),
    }
}
