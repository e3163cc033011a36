//! External editor hand-off.
//!
//! The editor runs in the foreground with the terminal's stdio attached and
//! the caller blocks until it exits. There is no timeout: an editor that
//! never exits stalls the session, which is what the user asked for.

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use log::info;

use crate::error::{Error, Result};

/// A configured editor command, e.g. `nvim` or `code --wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EditorCommand {
    /// Split a command line on whitespace into program and leading args.
    /// Returns `None` for a blank command.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Run the editor on `path` and wait for it to exit.
    ///
    /// Failing to start the process is fatal. A non-zero exit is not an
    /// error here; the caller decides what it means.
    pub fn launch(&self, path: &Path) -> Result<EditorOutcome> {
        info!("Launching editor: {} {}", self, path.display());
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
            .map_err(|source| Error::EditorSpawn {
                program: self.program.clone(),
                source,
            })?;
        let outcome = EditorOutcome::from(status);
        info!("Editor exited: {:?}", outcome);
        Ok(outcome)
    }
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// How the editor process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOutcome {
    pub success: bool,
    /// `None` when the child was killed by a signal.
    pub code: Option<i32>,
}

impl EditorOutcome {
    pub fn success() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub fn failure(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for EditorOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}
