use chrono::{DateTime, Local};
use notes_core::editor::{EditorOutcome, SystemEditor};
use notes_core::{Note, NoteStore};

use crate::config::Settings;
use crate::error::CliError;

const TITLE_COLUMN_MAX: usize = 40;
const STATUS_COLUMN_WIDTH: usize = 11;

/// Open the note store with the user's editor
pub fn open_store(settings: &Settings) -> Result<NoteStore, CliError> {
    let editor = SystemEditor::from_env(settings.editor.as_deref());
    tracing::debug!("Using editor `{}`", editor.command());
    Ok(NoteStore::open(
        &settings.notes.notes_dir,
        Box::new(editor),
    )?)
}

pub fn report_editor_outcome(outcome: &EditorOutcome) {
    if let Some(warning) = outcome.warning() {
        eprintln!("Warning: {warning}");
    }
}

pub fn format_note_table(notes: &[Note]) -> Vec<String> {
    let title_width = notes
        .iter()
        .map(|note| note.title.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Title".len(), TITLE_COLUMN_MAX);

    let mut lines = Vec::with_capacity(notes.len() + 1);
    lines.push(format!(
        "{:<title_width$}  {:<STATUS_COLUMN_WIDTH$}  Last Modified",
        "Title", "Status"
    ));
    for note in notes {
        let title = truncate(&note.title, title_width);
        let status = note.status.to_string();
        let modified = format_modified(&note.modified_at);
        lines.push(format!(
            "{title:<title_width$}  {status:<STATUS_COLUMN_WIDTH$}  {modified}"
        ));
    }
    lines
}

pub fn format_modified(modified_at: &DateTime<Local>) -> String {
    modified_at.format("%Y-%m-%d %H:%M").to_string()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = text.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}
