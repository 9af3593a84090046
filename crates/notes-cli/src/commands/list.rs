use notes_core::NoteStore;

use crate::commands::common::format_note_table;
use crate::error::CliError;

pub fn run_list(as_json: bool, store: &NoteStore) -> Result<(), CliError> {
    let notes = store.list()?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes found.");
    } else {
        for line in format_note_table(&notes) {
            println!("{line}");
        }
    }

    Ok(())
}
