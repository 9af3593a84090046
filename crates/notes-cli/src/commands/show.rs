use std::io::{self, Write};

use notes_core::NoteStore;

use crate::error::CliError;

pub fn run_show(title: &str, store: &NoteStore) -> Result<(), CliError> {
    let content = store.read(title)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        writeln!(stdout)?;
    }
    Ok(())
}
