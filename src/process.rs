//! Centralized command execution with consistent error handling.
//!
//! Every external tool (docker, wasm-pack, docker-compose) goes through
//! [`Cmd`] and a [`CommandRunner`]. Output is always captured, and a
//! non-zero exit becomes [`Error::Subprocess`] carrying the command line,
//! exit code, stdout and stderr.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Result of a command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or -1 if terminated by signal.
    pub code: i32,
    /// Captured stdout as a string.
    pub stdout: String,
    /// Captured stderr as a string.
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Returns true if the command exited successfully.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Get stdout, trimmed of whitespace.
    pub fn stdout_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Get stderr, trimmed of whitespace.
    pub fn stderr_trimmed(&self) -> &str {
        self.stderr.trim()
    }
}

/// Builder for configuring command execution.
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    /// If true, don't fail on non-zero exit.
    allow_fail: bool,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
            allow_fail: false,
        }
    }

    /// Create a command for a program resolved to an absolute path.
    pub fn for_path(program: &Path) -> Self {
        Self::new(program.to_string_lossy())
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<str>) -> Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Add a path as an argument.
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.to_string_lossy().into_owned());
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Allow non-zero exit codes without failing.
    pub fn allow_fail(mut self) -> Self {
        self.allow_fail = true;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    /// The command as a single space-joined line, for logs and errors.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Turn a captured result into an error if the exit code demands it.
    pub fn check(&self, result: CommandResult) -> Result<CommandResult> {
        if !self.allow_fail && !result.success() {
            return Err(Error::Subprocess {
                command: self.command_line(),
                code: result.code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }
        Ok(result)
    }

    /// Run the command on the host and capture output.
    pub fn run(&self) -> Result<CommandResult> {
        SystemRunner.run(self)
    }
}

/// Something that can execute a [`Cmd`].
///
/// The host implementation is [`SystemRunner`]; tests substitute a fake that
/// records invocations.
pub trait CommandRunner {
    /// Execute `cmd`, returning its captured output. Implementations must
    /// apply [`Cmd::check`] so that non-zero exits surface as errors.
    fn run(&self, cmd: &Cmd) -> Result<CommandResult>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, cmd: &Cmd) -> Result<CommandResult> {
        (**self).run(cmd)
    }
}

/// Runs commands as blocking child processes of this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &Cmd) -> Result<CommandResult> {
        debug!(command = %cmd.command_line(), dir = ?cmd.current_dir, "running");

        let mut command = Command::new(&cmd.program);
        command.args(&cmd.args);

        if let Some(ref dir) = cmd.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| Error::Spawn {
            program: cmd.program.clone(),
            source,
        })?;

        let result = CommandResult {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(code = result.code, "finished {}", cmd.program);
        cmd.check(result)
    }
}

// =============================================================================
// Tests
// =============================================================================
