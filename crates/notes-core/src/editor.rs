//! External editor integration.
//!
//! Notes are edited in the user's own editor, launched as a blocking
//! subprocess on the note file.

use std::env;
use std::io;
use std::path::Path;
use std::process::Command;

use crate::{Error, Result};

/// Opens a file for interactive editing and returns once editing is over.
pub trait Editor {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Result of handing a note to the editor.
///
/// Launch failures never undo the note write that preceded them, so they are
/// surfaced as a warning rather than an error.
#[derive(Debug)]
pub enum EditorOutcome {
    /// Editor ran and exited
    Closed,
    /// Editor could not be launched
    Unavailable(Error),
}

impl EditorOutcome {
    pub(crate) fn from_launch(result: Result<()>) -> Self {
        match result {
            Ok(()) => Self::Closed,
            Err(error) => {
                tracing::warn!("Editor launch failed: {error}");
                Self::Unavailable(error)
            }
        }
    }

    /// The launch failure, if any
    pub const fn warning(&self) -> Option<&Error> {
        match self {
            Self::Closed => None,
            Self::Unavailable(error) => Some(error),
        }
    }
}

/// Editor resolved from `$VISUAL`/`$EDITOR`, a configured command, or the
/// platform fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemEditor {
    command: String,
}

impl SystemEditor {
    /// Use an explicit editor command, e.g. `code --wait`
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Resolve from the environment, then `configured`, then the fallback
    pub fn from_env(configured: Option<&str>) -> Self {
        let command = ["VISUAL", "EDITOR"]
            .into_iter()
            .filter_map(|key| env::var(key).ok())
            .chain(configured.map(str::to_string))
            .find(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_editor().to_string());
        Self::new(command)
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Editor for SystemEditor {
    fn open(&self, path: &Path) -> Result<()> {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(Error::EditorUnavailable(self.command.clone()));
        };

        tracing::debug!("Launching editor `{}` on {}", self.command, path.display());
        let status = match Command::new(program).args(parts).arg(path).status() {
            Ok(status) => status,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::EditorUnavailable(program.to_string()));
            }
            Err(err) => return Err(Error::Io(err)),
        };

        if !status.success() {
            tracing::warn!("Editor `{}` exited with status {status}", self.command);
        }
        Ok(())
    }
}

pub const fn default_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "nvim"
    }
}
