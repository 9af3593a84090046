use notes_core::NoteStore;

use crate::error::CliError;

pub fn run_delete(title: &str, store: &NoteStore) -> Result<(), CliError> {
    store.delete(title)?;
    println!("Deleted: {}", title.trim());
    Ok(())
}
