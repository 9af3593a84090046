//! Note store: one Markdown file per note in a single directory.
//!
//! The directory itself is the source of truth. There is no index; a note
//! exists exactly when its `<slug>.md` file does. The store performs no
//! locking and assumes a single interactive user.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::editor::{Editor, EditorOutcome};
use crate::models::{
    file_name_for_title, is_marker_line, normalize_title, parse_status_marker, status_marker_line,
    title_from_file_name, Note, NoteStatus, NOTE_EXTENSION,
};
use crate::{Error, Result};

/// File-backed note collection
pub struct NoteStore {
    dir: PathBuf,
    editor: Box<dyn Editor>,
}

impl NoteStore {
    /// Open the store at `dir`.
    ///
    /// The directory is created by the first [`NoteStore::create`], so a
    /// rejected command never leaves an empty notes directory behind.
    pub fn open(dir: impl Into<PathBuf>, editor: Box<dyn Editor>) -> Result<Self> {
        Ok(Self {
            dir: dir.into(),
            editor,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the note file for `title`; the file need not exist
    pub fn resolve_path(&self, title: &str) -> Result<PathBuf> {
        Ok(self.dir.join(file_name_for_title(title)?))
    }

    /// Create a new note and open it in the editor
    pub fn create(&self, title: &str) -> Result<(Note, EditorOutcome)> {
        let title = normalize_title(title)?;
        let path = self.resolve_path(title)?;
        fs::create_dir_all(&self.dir)?;

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists(title.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        file.write_all(initial_content(title).as_bytes())?;
        drop(file);
        tracing::info!("Created note {}", path.display());

        let outcome = EditorOutcome::from_launch(self.editor.open(&path));
        let note = load_note(&path)?;
        Ok((note, outcome))
    }

    /// Raw file content of a note
    pub fn read(&self, title: &str) -> Result<String> {
        let path = self.existing_path(title)?;
        read_note_file(&path, title)
    }

    /// Open an existing note in the editor
    pub fn open_for_edit(&self, title: &str) -> Result<EditorOutcome> {
        let path = self.existing_path(title)?;
        Ok(EditorOutcome::from_launch(self.editor.open(&path)))
    }

    /// Remove a note file
    pub fn delete(&self, title: &str) -> Result<()> {
        let path = self.existing_path(title)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!("Deleted note {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::NotFound(display_title(title)))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// All notes, sorted by file name
    pub fn list(&self) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for path in self.note_files()? {
            match load_note(&path) {
                Ok(note) => notes.push(note),
                // Removed between the directory scan and the read.
                Err(Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!("Skipping vanished note {}", path.display());
                }
                Err(error) => return Err(error),
            }
        }
        Ok(notes)
    }

    /// Paths of all note files, sorted by file name.
    ///
    /// Only files whose name maps back to a valid title are notes; a file
    /// like `_draft.md` could never be addressed by title and is skipped.
    pub fn note_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if !path
                .extension()
                .is_some_and(|extension| extension == NOTE_EXTENSION)
            {
                continue;
            }
            if is_addressable(name) {
                files.push(path);
            } else {
                tracing::debug!("Skipping {name}: not reachable by title");
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Replace or insert the status marker, leaving every other line intact
    pub fn set_status(&self, title: &str, status: &str) -> Result<Note> {
        let status: NoteStatus = status.parse()?;
        let path = self.existing_path(title)?;
        let content = read_note_file(&path, title)?;

        let updated = with_status(&content, status);
        if updated != content {
            fs::write(&path, updated)?;
            tracing::info!("Set status of {} to {status}", path.display());
        }
        load_note(&path)
    }

    fn existing_path(&self, title: &str) -> Result<PathBuf> {
        let path = self.resolve_path(title)?;
        if path.is_file() {
            tracing::debug!("Resolved '{}' to {}", title.trim(), path.display());
            Ok(path)
        } else {
            Err(Error::NotFound(display_title(title)))
        }
    }
}

fn load_note(path: &Path) -> Result<Note> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    let title = title_from_file_name(&file_name).ok_or_else(|| {
        Error::InvalidTitle(format!("'{file_name}' is not a note file"))
    })?;
    let first_line = read_first_line(path)?;
    let modified_at = DateTime::<Local>::from(fs::metadata(path)?.modified()?);

    Ok(Note {
        title,
        file_name,
        status: parse_status_marker(&first_line),
        modified_at,
    })
}

/// First line of a file, decoded lossily so a non-UTF-8 note still lists
fn read_first_line(path: &Path) -> Result<String> {
    let mut line = Vec::new();
    BufReader::new(File::open(path)?).read_until(b'\n', &mut line)?;
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// Whether `file_name` is exactly the file name of the title it decodes to
fn is_addressable(file_name: &str) -> bool {
    title_from_file_name(file_name)
        .and_then(|title| file_name_for_title(&title).ok())
        .is_some_and(|expected| expected == file_name)
}

/// Template written to a freshly created note
fn initial_content(title: &str) -> String {
    format!("{}# {title}\n\n", status_marker_line(NoteStatus::default()))
}

/// Content with line 1 set to the marker for `status`
fn with_status(content: &str, status: NoteStatus) -> String {
    let marker = status_marker_line(status);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_marker_line(first) => {
            let rest: String = lines.collect();
            format!("{marker}{rest}")
        }
        _ => format!("{marker}{content}"),
    }
}

fn read_note_file(path: &Path, title: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            Error::NotFound(display_title(title))
        } else {
            Error::Io(err)
        }
    })
}

fn display_title(title: &str) -> String {
    title.trim().to_string()
}
