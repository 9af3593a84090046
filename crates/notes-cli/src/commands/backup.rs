use notes_core::backup::{BackupAgent, BackupSummary};
use notes_core::{NoteStore, NotesConfig};

use crate::error::CliError;

pub fn run_backup(store: &NoteStore, config: &NotesConfig) -> Result<BackupSummary, CliError> {
    let summary = BackupAgent::new(store, &config.output_dir).backup()?;
    println!(
        "Backup created: {} ({} {})",
        summary.path.display(),
        summary.count,
        if summary.count == 1 { "note" } else { "notes" }
    );
    Ok(summary)
}
