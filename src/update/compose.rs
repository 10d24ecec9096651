//! Thin wrapper over the `docker-compose` CLI for one install directory.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::capabilities::{Capabilities, Tool};
use crate::error::{Error, Result};
use crate::process::{Cmd, CommandRunner};

/// Orchestration descriptor expected in every install directory.
pub const COMPOSE_FILE: &str = "docker-compose.yml";

pub struct DockerCompose<R> {
    program: PathBuf,
    directory: PathBuf,
    runner: R,
}

impl<R: CommandRunner> DockerCompose<R> {
    /// Bind to the stack described by `<directory>/docker-compose.yml`.
    pub fn new(caps: &Capabilities, directory: &Path, runner: R) -> Result<Self> {
        let program = caps.require(Tool::DockerCompose)?;

        let compose_file = directory.join(COMPOSE_FILE);
        if !compose_file.is_file() {
            return Err(Error::fs(compose_file, "compose file is missing"));
        }

        Ok(Self {
            program,
            directory: directory.to_path_buf(),
            runner,
        })
    }

    fn compose(&self) -> Cmd {
        Cmd::for_path(&self.program).dir(&self.directory)
    }

    /// Stop the stack. Succeeds when nothing is running.
    pub fn stop(&self) -> Result<()> {
        info!("Stopping stack in {}", self.directory.display());
        self.runner.run(&self.compose().arg("stop"))?;
        Ok(())
    }

    /// Start the stack, detached unless `background` is false.
    pub fn start(&self, background: bool) -> Result<()> {
        info!("Starting stack in {}", self.directory.display());
        let mut cmd = self.compose().arg("up");
        if background {
            cmd = cmd.arg("-d");
        }
        self.runner.run(&cmd)?;
        Ok(())
    }
}
