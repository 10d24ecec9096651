//! Ephemeral staging directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::Result;

/// Prefix of every staging directory created under the system temp dir.
pub const STAGING_PREFIX: &str = "docker_root_";

/// A per-build staging directory, removed when dropped.
///
/// The tree is discarded on every exit path: success, early `?` return or
/// unwinding panic.
#[derive(Debug)]
pub struct StagingTree {
    dir: TempDir,
}

impl StagingTree {
    /// Create a fresh, empty staging directory.
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(STAGING_PREFIX).tempdir()?;
        debug!("created staging tree {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_staging_tree_removed_on_drop() {
        let staging = StagingTree::new().unwrap();
        let root = staging.path().to_path_buf();
        fs::create_dir_all(staging.join("www/pkg")).unwrap();
        fs::write(staging.join("www/index.html"), "x").unwrap();

        assert!(root.exists());
        assert!(root
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(STAGING_PREFIX));

        drop(staging);
        assert!(!root.exists());
    }

    #[test]
    fn test_staging_tree_removed_on_error_path() {
        fn failing_build(root: &mut Option<PathBuf>) -> Result<()> {
            let staging = StagingTree::new()?;
            *root = Some(staging.path().to_path_buf());
            Err(crate::error::Error::precondition("boom"))
        }

        let mut root = None;
        assert!(failing_build(&mut root).is_err());
        assert!(!root.unwrap().exists());
    }
}
