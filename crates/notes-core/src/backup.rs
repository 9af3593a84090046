//! Zip backups of the notes directory.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::{Error, NoteStore, Result};

const BACKUP_FILE_PREFIX: &str = "notes_backup_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result of a backup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupSummary {
    /// Archive that was written
    pub path: PathBuf,
    /// Number of notes archived
    pub count: usize,
}

/// Archive file name for a point in time, e.g. `notes_backup_20240131_094500.zip`
pub fn backup_file_name(timestamp: &DateTime<Local>) -> String {
    format!(
        "{BACKUP_FILE_PREFIX}{}.zip",
        timestamp.format(BACKUP_TIMESTAMP_FORMAT)
    )
}

/// Writes every note of a [`NoteStore`] into a single timestamped archive
pub struct BackupAgent<'a> {
    store: &'a NoteStore,
    output_dir: PathBuf,
}

impl<'a> BackupAgent<'a> {
    pub fn new(store: &'a NoteStore, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
        }
    }

    /// Back up all notes using the current local time
    pub fn backup(&self) -> Result<BackupSummary> {
        self.backup_at(&Local::now())
    }

    /// Back up all notes into the archive named for `timestamp`.
    ///
    /// An empty store still produces a valid, empty archive.
    pub fn backup_at(&self, timestamp: &DateTime<Local>) -> Result<BackupSummary> {
        let files = self.store.note_files()?;
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(backup_file_name(timestamp));

        if let Err(error) = write_archive(&path, &files) {
            if let Err(cleanup) = fs::remove_file(&path) {
                tracing::debug!("Could not remove partial archive {}: {cleanup}", path.display());
            }
            return Err(error);
        }

        tracing::info!("Backed up {} notes to {}", files.len(), path.display());
        Ok(BackupSummary {
            path,
            count: files.len(),
        })
    }
}

/// Write `files` into a deflate-compressed zip at `path`, each entry named
/// after the file's own name.
fn write_archive(path: &Path, files: &[PathBuf]) -> Result<()> {
    let mut writer = ZipWriter::new(File::create(path)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        let name = file
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Archive(format!("unsupported file name {}", file.display())))?;
        let bytes = fs::read(file)?;
        writer.start_file(name, options).map_err(archive_error)?;
        writer.write_all(&bytes)?;
    }

    writer.finish().map_err(archive_error)?;
    Ok(())
}

#[allow(clippy::needless_pass_by_value)]
fn archive_error(error: zip::result::ZipError) -> Error {
    Error::Archive(error.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::path::Path;

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;
    use zip::ZipArchive;

    use super::*;
    use crate::editor::Editor;

    struct NoopEditor;

    impl Editor for NoopEditor {
        fn open(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 31, 9, 45, 0).unwrap()
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        names
    }

    #[test]
    fn backup_file_name_is_sortable() {
        assert_eq!(backup_file_name(&timestamp()), "notes_backup_20240131_094500.zip");
    }

    #[test]
    fn backup_archives_every_note_by_file_name() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes"), Box::new(NoopEditor)).unwrap();
        store.create("Alpha").unwrap();
        store.create("Beta gamma").unwrap();
        fs::write(store.dir().join("scratch.txt"), "not a note").unwrap();

        let out = dir.path().join("out");
        let summary = BackupAgent::new(&store, &out).backup_at(&timestamp()).unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(summary.path, out.join("notes_backup_20240131_094500.zip"));
        assert_eq!(entry_names(&summary.path), vec!["Alpha.md", "Beta_gamma.md"]);

        let mut archive = ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
        let mut content = String::new();
        archive
            .by_name("Alpha.md")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, store.read("Alpha").unwrap());
    }

    #[test]
    fn backup_of_empty_store_writes_empty_archive() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes"), Box::new(NoopEditor)).unwrap();

        let summary = BackupAgent::new(&store, dir.path().join("out"))
            .backup_at(&timestamp())
            .unwrap();

        assert_eq!(summary.count, 0);
        assert!(summary.path.is_file());
        assert!(entry_names(&summary.path).is_empty());
    }

    #[test]
    fn backup_does_not_write_into_notes_dir() {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes"), Box::new(NoopEditor)).unwrap();
        store.create("Only").unwrap();

        BackupAgent::new(&store, dir.path().join("out"))
            .backup()
            .unwrap();

        let names: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("Only.md")]);
    }
}
