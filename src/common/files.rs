//! Utilities for file operations with automatic parent directory creation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write a file, creating parent directories as needed.
///
/// This is a convenience function that combines creating the parent directory
/// with writing the file content, eliminating the common pattern of:
/// ```ignore
/// if let Some(parent) = path.parent() {
///     fs::create_dir_all(parent)?;
/// }
/// fs::write(path, content)?;
/// ```
pub fn write_file_with_dirs<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).map_err(|e| Error::fs(path, e.to_string()))
}

/// Copy a regular file into `dir`, keeping its file name and permissions.
///
/// Returns the destination path. Fails if `src` is not a regular file.
pub fn copy_file_into(src: &Path, dir: &Path) -> Result<PathBuf> {
    if !src.is_file() {
        return Err(Error::fs(src, "not a regular file"));
    }
    let name = src
        .file_name()
        .ok_or_else(|| Error::fs(src, "path has no file name"))?;
    let dest = dir.join(name);

    // fs::copy carries the permission bits across
    fs::copy(src, &dest).map_err(|e| Error::fs(&dest, e.to_string()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn test_write_file_with_dirs_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf.d/nested/default.conf");
        write_file_with_dirs(&path, "server {}").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "server {}");
    }

    #[test]
    fn test_copy_file_into_keeps_name_and_mode() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("privkey.pem");
        fs::write(&src, "KEY").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o600)).unwrap();

        let dest_dir = temp.path().join("certs");
        fs::create_dir(&dest_dir).unwrap();

        let dest = copy_file_into(&src, &dest_dir).unwrap();
        assert_eq!(dest, dest_dir.join("privkey.pem"));
        assert_eq!(fs::read_to_string(&dest).unwrap(), "KEY");
        let mode = fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_copy_file_into_rejects_directory() {
        let temp = TempDir::new().unwrap();
        let err = copy_file_into(temp.path(), temp.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }
}
