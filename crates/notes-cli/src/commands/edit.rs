use notes_core::NoteStore;

use crate::commands::common::report_editor_outcome;
use crate::error::CliError;

pub fn run_edit(title: &str, store: &NoteStore) -> Result<(), CliError> {
    let outcome = store.open_for_edit(title)?;
    report_editor_outcome(&outcome);
    Ok(())
}
