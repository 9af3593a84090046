//! Note model and title/file-name mapping

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::models::NoteStatus;
use crate::{Error, Result};

/// Extension of note files in the notes directory
pub const NOTE_EXTENSION: &str = "md";

/// Character substituted for whitespace in file names
const SLUG_SEPARATOR: char = '_';

/// A note as seen from the notes directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Human-readable title derived from the file name
    pub title: String,
    /// File name inside the notes directory (`<slug>.md`)
    pub file_name: String,
    /// Status decoded from the first-line marker
    pub status: NoteStatus,
    /// Filesystem modification time
    pub modified_at: DateTime<Local>,
}

/// Validate and trim a title.
///
/// Titles must be non-empty after trimming, must not contain path separators
/// or control characters, and must not consist only of dots.
pub fn normalize_title(title: &str) -> Result<&str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidTitle("title cannot be empty".to_string()));
    }
    if trimmed.contains(['/', '\\']) {
        return Err(Error::InvalidTitle(format!(
            "'{trimmed}' contains a path separator"
        )));
    }
    if trimmed.chars().any(char::is_control) {
        return Err(Error::InvalidTitle(format!(
            "{trimmed:?} contains a control character"
        )));
    }
    if trimmed.chars().all(|c| c == '.') {
        return Err(Error::InvalidTitle(format!("'{trimmed}' is not a valid name")));
    }
    Ok(trimmed)
}

/// Map a title to its note file name (`My note` -> `My_note.md`)
///
/// # Examples
///
/// ```
/// use notes_core::models::file_name_for_title;
///
/// assert_eq!(file_name_for_title("Weekly plan").unwrap(), "Weekly_plan.md");
/// ```
pub fn file_name_for_title(title: &str) -> Result<String> {
    Ok(format!("{}.{NOTE_EXTENSION}", slug(normalize_title(title)?)))
}

/// Recover a display title from a note file name (`My_note.md` -> `My note`)
///
/// Returns `None` for names without the note extension.
#[must_use]
pub fn title_from_file_name(file_name: &str) -> Option<String> {
    let stem = file_name.strip_suffix(&format!(".{NOTE_EXTENSION}"))?;
    if stem.is_empty() {
        return None;
    }
    Some(stem.replace(SLUG_SEPARATOR, " "))
}

pub(crate) fn slug(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_whitespace() { SLUG_SEPARATOR } else { c })
        .collect()
}
