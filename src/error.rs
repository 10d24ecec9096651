//! Error types shared by the builders, the updater and the store client.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The environment is not fit to run the requested workflow.
    #[error("{0}")]
    Precondition(String),

    /// An external command exited non-zero.
    #[error("'{command}' failed (exit code {code}){}", format_output(.stdout, .stderr))]
    Subprocess {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// An external command could not be started at all.
    #[error("failed to execute '{program}'. Is it installed?")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {reason}", .path.display())]
    FileSystem { path: PathBuf, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Protocol { url: String, status: u16 },

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn precondition(msg: impl Into<String>) -> Self {
        Error::Precondition(msg.into())
    }

    pub fn fs(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::FileSystem {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True for errors raised because the user hit Ctrl-C.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, Error::Interrupted)
    }
}

/// Captured output appended to a failed command: stderr first, then stdout
/// under its own label. Blank streams are left out.
fn format_output(stdout: &str, stderr: &str) -> String {
    let mut out = String::new();
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        out.push_str(":\n");
        out.push_str(stderr);
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        out.push_str("\nstdout:\n");
        out.push_str(stdout);
    }
    out
}

pub type Result<T> = std::result::Result<T, Error>;
