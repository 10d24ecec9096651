//! Utilities for path checking and directory copies.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::interrupt;

/// Make `path` absolute against the current directory without touching the
/// filesystem.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Fail unless `path` is a directory.
pub fn require_dir(path: &Path, what: &str) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::fs(path, format!("{} not found", what)))
    }
}

/// Recursively copy `src` to `dst`.
///
/// The copy does not merge: `dst` must not exist yet. Symlinks are
/// followed, so the copy holds regular files and directories only.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<u64> {
    require_dir(src, "source directory")?;
    if dst.exists() {
        return Err(Error::fs(dst, "destination already exists"));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        interrupt::check()?;
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|_| Error::fs(entry.path(), "escaped source directory"))?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| Error::fs(&target, e.to_string()))?;
            copied += 1;
        }
    }

    Ok(copied)
}
