//! Tarball operations for config archives.
//!
//! Archives are gzip-compressed tars holding regular files only; parent
//! directories are recreated on extraction.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tar::{Archive, Builder};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::interrupt;

/// One member of an archive.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ArchiveEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Write every regular file below `dir` into a gzip tarball at `out_file`.
///
/// With `include_root`, member paths are relative to the parent of `dir`,
/// so they all start with `dir`'s own name and extraction reproduces it.
/// Otherwise members are relative to `dir` itself.
///
/// Returns the number of files archived.
pub fn create_tarball(dir: &Path, out_file: &Path, include_root: bool) -> Result<usize> {
    if !dir.is_dir() {
        return Err(Error::fs(dir, "directory to archive not found"));
    }

    let rel_dir = if include_root {
        dir.parent().unwrap_or(dir)
    } else {
        dir
    };

    interrupt::check()?;
    info!("Creating tarball {}", out_file.display());

    let file = File::create(out_file).map_err(|e| Error::fs(out_file, e.to_string()))?;
    let builder = Builder::new(GzEncoder::new(BufWriter::new(file), Compression::default()));

    // No partial archive is left behind on failure
    write_members(builder, dir, rel_dir, out_file).inspect_err(|_| {
        if let Err(e) = fs::remove_file(out_file) {
            debug!("could not remove partial {}: {}", out_file.display(), e);
        }
    })
}

fn write_members<W: Write>(
    mut builder: Builder<GzEncoder<W>>,
    dir: &Path,
    rel_dir: &Path,
    out_file: &Path,
) -> Result<usize> {
    let mut count = 0;
    for entry in WalkDir::new(dir).sort_by_file_name() {
        interrupt::check()?;
        let entry = entry?;
        if !entry.file_type().is_file() || entry.path() == out_file {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(rel_dir)
            .map_err(|_| Error::fs(entry.path(), "outside of archive root"))?;
        debug!("  adding {}", rel.display());
        builder.append_path_with_name(entry.path(), rel)?;
        count += 1;
    }

    builder.into_inner()?.finish()?.flush()?;
    Ok(count)
}

fn open(archive: &Path) -> Result<Archive<GzDecoder<BufReader<File>>>> {
    let file = File::open(archive).map_err(|e| Error::fs(archive, e.to_string()))?;
    Ok(Archive::new(GzDecoder::new(BufReader::new(file))))
}

/// List the members of a gzip tarball, in archive order.
pub fn list_tarball(archive: &Path) -> Result<Vec<ArchiveEntry>> {
    let mut tar = open(archive)?;
    let mut entries = Vec::new();
    for entry in tar.entries()? {
        interrupt::check()?;
        let entry = entry?;
        entries.push(ArchiveEntry {
            path: entry.path()?.into_owned(),
            size: entry.header().size()?,
        });
    }
    Ok(entries)
}

/// Verify that every member of `archive` lives under the single top-level
/// directory `expected`, with no absolute or `..` components.
pub fn check_top_level(archive: &Path, expected: &str) -> Result<()> {
    let entries = list_tarball(archive)?;
    if entries.is_empty() {
        return Err(Error::fs(archive, "archive is empty"));
    }

    for entry in &entries {
        let mut components = entry
            .path
            .components()
            .filter(|c| !matches!(c, Component::CurDir));

        let top = match components.next() {
            Some(Component::Normal(name)) => name.to_string_lossy(),
            _ => {
                return Err(Error::fs(
                    archive,
                    format!("member '{}' is not under '{}'", entry.path.display(), expected),
                ))
            }
        };
        if top != expected {
            return Err(Error::fs(
                archive,
                format!(
                    "member '{}' is not under '{}'",
                    entry.path.display(),
                    expected
                ),
            ));
        }
        if components.any(|c| !matches!(c, Component::Normal(_))) {
            return Err(Error::fs(
                archive,
                format!("member '{}' escapes the archive root", entry.path.display()),
            ));
        }
    }
    Ok(())
}

/// Extract `archive` on top of `dest`.
///
/// Same-named files are overwritten; files already in `dest` that the
/// archive does not mention are left alone. Returns the number of members
/// written.
pub fn extract_tarball(archive: &Path, dest: &Path) -> Result<usize> {
    fs::create_dir_all(dest)?;

    let mut tar = open(archive)?;
    tar.set_overwrite(true);

    let mut count = 0;
    for entry in tar.entries()? {
        interrupt::check()?;
        let mut entry = entry?;
        if entry.unpack_in(dest)? {
            count += 1;
        } else {
            debug!("skipped unsafe member {:?}", entry.path()?);
        }
    }

    info!("Extracted {} files to {}", count, dest.display());
    Ok(count)
}
