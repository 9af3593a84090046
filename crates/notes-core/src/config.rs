//! Directory configuration shared by the store, exporter, and backup agent.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{Error, Result};

/// Where notes live and where exports/backups are written.
///
/// Passed by value into each component at construction; there is no
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotesConfig {
    /// Directory holding one `<slug>.md` file per note
    pub notes_dir: PathBuf,
    /// User-facing directory for exports and backups
    pub output_dir: PathBuf,
}

impl NotesConfig {
    pub fn new(notes_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Reject configurations that would write exports into the notes directory.
    pub fn validate(&self) -> Result<()> {
        if self.notes_dir.as_os_str().is_empty() {
            return Err(Error::Config("notes directory cannot be empty".to_string()));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::Config("output directory cannot be empty".to_string()));
        }
        if same_dir(&self.notes_dir, &self.output_dir) {
            return Err(Error::Config(format!(
                "output directory must differ from the notes directory ({})",
                self.notes_dir.display()
            )));
        }
        Ok(())
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a.components().eq(b.components()),
    }
}
