//! Host capabilities, resolved once at process start.
//!
//! Builders and the updater never query `PATH` or the process uid
//! themselves; they receive a [`Capabilities`] value. Tests build one by
//! hand to simulate missing tools or a superuser environment.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// External executables the workflows depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Docker,
    WasmPack,
    DockerCompose,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Docker, Tool::WasmPack, Tool::DockerCompose];

    /// Executable name looked up on `PATH`.
    pub fn binary(self) -> &'static str {
        match self {
            Tool::Docker => "docker",
            Tool::WasmPack => "wasm-pack",
            Tool::DockerCompose => "docker-compose",
        }
    }

    /// Install hint shown by preflight.
    pub fn install_hint(self) -> &'static str {
        match self {
            Tool::Docker => "Install the 'docker' package",
            Tool::WasmPack => "Install with 'cargo install wasm-pack'",
            Tool::DockerCompose => "Install the 'docker-compose' package",
        }
    }

    /// What the tool is needed for.
    pub fn purpose(self) -> &'static str {
        match self {
            Tool::Docker => "Required by `image` to build and save the container image",
            Tool::WasmPack => "Required by `image` and `archive` to build the WASM bundle",
            Tool::DockerCompose => "Required by `update` to stop and start the stack",
        }
    }
}

/// Everything the workflows need to know about the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub docker: Option<PathBuf>,
    pub wasm_pack: Option<PathBuf>,
    pub docker_compose: Option<PathBuf>,
    /// Real or effective uid is 0.
    pub superuser: bool,
}

impl Capabilities {
    /// Inspect the running host.
    pub fn detect() -> Self {
        let caps = Self {
            docker: which::which(Tool::Docker.binary()).ok(),
            wasm_pack: which::which(Tool::WasmPack.binary()).ok(),
            docker_compose: which::which(Tool::DockerCompose.binary()).ok(),
            superuser: running_as_superuser(),
        };
        debug!(?caps, "detected host capabilities");
        caps
    }

    /// Resolved path for `tool`, if it was found.
    pub fn path(&self, tool: Tool) -> Option<&Path> {
        match tool {
            Tool::Docker => self.docker.as_deref(),
            Tool::WasmPack => self.wasm_pack.as_deref(),
            Tool::DockerCompose => self.docker_compose.as_deref(),
        }
    }

    /// Resolved path for `tool`, or a precondition failure.
    pub fn require(&self, tool: Tool) -> Result<PathBuf> {
        self.path(tool)
            .map(Path::to_path_buf)
            .ok_or_else(|| Error::precondition(format!("{} is not installed", tool.binary())))
    }

    /// Fail when running with superuser privileges.
    pub fn require_unprivileged(&self) -> Result<()> {
        if self.superuser {
            return Err(Error::precondition("shouldn't run as root"));
        }
        Ok(())
    }
}

#[cfg(unix)]
fn running_as_superuser() -> bool {
    nix::unistd::getuid().is_root() || nix::unistd::geteuid().is_root()
}

#[cfg(not(unix))]
fn running_as_superuser() -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_missing_tool() {
        let caps = Capabilities::default();
        let err = caps.require(Tool::WasmPack).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert_eq!(err.to_string(), "wasm-pack is not installed");
    }

    #[test]
    fn test_require_present_tool() {
        let caps = Capabilities {
            docker: Some(PathBuf::from("/usr/bin/docker")),
            ..Default::default()
        };
        assert_eq!(
            caps.require(Tool::Docker).unwrap(),
            PathBuf::from("/usr/bin/docker")
        );
        assert!(caps.path(Tool::DockerCompose).is_none());
    }

    #[test]
    fn test_superuser_rejected() {
        let caps = Capabilities {
            superuser: true,
            ..Default::default()
        };
        assert!(caps.require_unprivileged().is_err());
        assert!(Capabilities::default().require_unprivileged().is_ok());
    }

    #[test]
    fn test_tool_names() {
        let names: Vec<_> = Tool::ALL.iter().map(|t| t.binary()).collect();
        assert_eq!(names, ["docker", "wasm-pack", "docker-compose"]);
    }
}
