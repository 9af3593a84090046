use notes_core::NoteStore;

use crate::commands::common::report_editor_outcome;
use crate::error::CliError;

pub fn run_add(title: &str, store: &NoteStore) -> Result<(), CliError> {
    let (note, outcome) = store.create(title)?;
    report_editor_outcome(&outcome);

    println!("Created: {}", store.dir().join(&note.file_name).display());
    Ok(())
}
