use notes_core::{NoteStatus, NoteStore};

use crate::error::CliError;

pub fn run_status(title: &str, status: NoteStatus, store: &NoteStore) -> Result<(), CliError> {
    let note = store.set_status(title, status.as_str())?;
    println!("Updated status: {} -> {}", note.title, note.status);
    Ok(())
}
