//! Note status and the first-line status marker

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Marker prefix recognised on line 1 of a note file
pub const STATUS_MARKER_PREFIX: &str = "<!-- status:";
/// Marker suffix recognised on line 1 of a note file
pub const STATUS_MARKER_SUFFIX: &str = "-->";

/// Workflow state of a note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NoteStatus {
    /// Not started
    #[default]
    Open,
    /// Being worked on
    InProgress,
    /// Finished
    Done,
}

impl NoteStatus {
    /// All statuses in workflow order
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Done];

    /// Canonical marker value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for NoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteStatus {
    type Err = Error;

    /// Accepts the canonical values plus the older `in progress` / `in_progress`
    /// spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// Render the marker line for a status, including the trailing newline
#[must_use]
pub fn status_marker_line(status: NoteStatus) -> String {
    format!("{STATUS_MARKER_PREFIX} {status} {STATUS_MARKER_SUFFIX}\n")
}

/// Decode the status from note content.
///
/// Only the first line is inspected. Missing, malformed, or unknown markers
/// fall back to [`NoteStatus::Open`]; this never fails.
///
/// # Examples
///
/// ```
/// use notes_core::models::{parse_status_marker, NoteStatus};
///
/// assert_eq!(parse_status_marker("<!-- status: done -->\n# Title\n"), NoteStatus::Done);
/// assert_eq!(parse_status_marker("# Title\n"), NoteStatus::Open);
/// ```
#[must_use]
pub fn parse_status_marker(content: &str) -> NoteStatus {
    let first_line = content.lines().next().unwrap_or("").trim_end();

    let Some(inner) = first_line
        .strip_prefix(STATUS_MARKER_PREFIX)
        .and_then(|rest| rest.strip_suffix(STATUS_MARKER_SUFFIX))
    else {
        return NoteStatus::default();
    };

    inner.parse().unwrap_or_else(|_| {
        tracing::debug!("Unknown status marker value {:?}, using default", inner.trim());
        NoteStatus::default()
    })
}

/// Whether a line should be replaced (rather than pushed down) when a new
/// status is written.
pub(crate) fn is_marker_line(line: &str) -> bool {
    line.starts_with(STATUS_MARKER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_display() {
        for status in NoteStatus::ALL {
            assert_eq!(status.to_string().parse::<NoteStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_status_accepts_legacy_spellings() {
        assert_eq!("in progress".parse::<NoteStatus>().unwrap(), NoteStatus::InProgress);
        assert_eq!("In_Progress".parse::<NoteStatus>().unwrap(), NoteStatus::InProgress);
        assert_eq!(" DONE ".parse::<NoteStatus>().unwrap(), NoteStatus::Done);
    }

    #[test]
    fn test_status_rejects_unknown_value() {
        let err = "blocked".parse::<NoteStatus>().unwrap_err();
        assert!(matches!(err, Error::InvalidStatus(value) if value == "blocked"));
    }

    #[test]
    fn test_marker_line_format() {
        assert_eq!(
            status_marker_line(NoteStatus::InProgress),
            "<!-- status: in-progress -->\n"
        );
    }

    #[test]
    fn test_parse_marker_reads_first_line_only() {
        assert_eq!(
            parse_status_marker("<!-- status: in-progress -->\n# Todo\n"),
            NoteStatus::InProgress
        );
        assert_eq!(
            parse_status_marker("# Todo\n<!-- status: done -->\n"),
            NoteStatus::Open
        );
    }

    #[test]
    fn test_parse_marker_is_lenient() {
        assert_eq!(parse_status_marker(""), NoteStatus::Open);
        assert_eq!(parse_status_marker("<!-- status: done"), NoteStatus::Open);
        assert_eq!(parse_status_marker("<!-- status: someday -->"), NoteStatus::Open);
        assert_eq!(parse_status_marker("<!-- status:done-->\r\n"), NoteStatus::Done);
    }
}
