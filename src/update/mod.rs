//! Container updater.
//!
//! Replaces the application tree of a running docker-compose stack with the
//! contents of a delivered config archive:
//!
//! 1. stop the stack
//! 2. extract the archive over the install directory
//! 3. start the stack detached
//! 4. delete the consumed archive
//!
//! The sequence is not transactional. If extraction or the restart fails,
//! the stack stays stopped.

pub mod compose;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

pub use compose::{DockerCompose, COMPOSE_FILE};

use crate::artifact::{check_top_level, extract_tarball};
use crate::capabilities::{Capabilities, Tool};
use crate::common::absolute;
use crate::error::{Error, Result};
use crate::interrupt;
use crate::process::CommandRunner;

/// What an update run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The archive was applied and removed.
    Updated,
    /// No archive was waiting; nothing was touched.
    NotUpdated,
}

impl UpdateOutcome {
    pub fn updated(self) -> bool {
        self == UpdateOutcome::Updated
    }
}

/// Check that the host may run an update at all.
pub fn check_environment(caps: &Capabilities) -> Result<()> {
    caps.require_unprivileged()?;
    caps.require(Tool::DockerCompose)?;
    Ok(())
}

pub struct Updater<R> {
    caps: Capabilities,
    install_dir: PathBuf,
    runner: R,
}

impl<R: CommandRunner> Updater<R> {
    /// Create an updater for `install_dir`.
    ///
    /// Refuses to run as root and requires `docker-compose`.
    pub fn new(caps: &Capabilities, install_dir: &Path, runner: R) -> Result<Self> {
        check_environment(caps)?;
        Ok(Self {
            caps: caps.clone(),
            install_dir: absolute(install_dir)?,
            runner,
        })
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Leaf name every archive member must start with.
    fn container_name(&self) -> Result<String> {
        self.install_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::fs(&self.install_dir, "install directory has no name"))
    }

    /// Apply `archive` if it exists.
    pub fn update(&self, archive: &Path) -> Result<UpdateOutcome> {
        if !archive.is_file() {
            info!("No archive at {}", archive.display());
            return Ok(UpdateOutcome::NotUpdated);
        }

        let compose = DockerCompose::new(&self.caps, &self.install_dir, &self.runner)?;

        // Validate before stopping anything
        check_top_level(archive, &self.container_name()?)?;
        interrupt::check()?;

        compose.stop()?;

        let parent = self
            .install_dir
            .parent()
            .ok_or_else(|| Error::fs(&self.install_dir, "install directory has no parent"))?;
        extract_tarball(archive, parent)?;
        // Interrupted after extraction: stay stopped and keep the archive
        interrupt::check()?;

        compose.start(true)?;

        fs::remove_file(archive).map_err(|e| Error::fs(archive, e.to_string()))?;
        info!("Removed {}", archive.display());

        Ok(UpdateOutcome::Updated)
    }
}
