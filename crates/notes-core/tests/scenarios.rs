//! End-to-end flows across the store, exporter, and backup agent.
//!
//! These tests assume single-process access to their temporary directories.

use std::fs::{self, File};
use std::path::Path;

use notes_core::backup::BackupAgent;
use notes_core::editor::Editor;
use notes_core::export::{ExportFormats, Exporter};
use notes_core::{Error, NoteStatus, NoteStore, NotesConfig, Result};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

struct NoopEditor;

impl Editor for NoopEditor {
    fn open(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

fn workspace() -> (TempDir, NotesConfig, NoteStore) {
    let dir = TempDir::new().unwrap();
    let config = NotesConfig::new(dir.path().join("notes"), dir.path().join("Downloads"));
    config.validate().unwrap();
    let store = NoteStore::open(&config.notes_dir, Box::new(NoopEditor)).unwrap();
    (dir, config, store)
}

#[test]
fn groceries_lifecycle() {
    let (_dir, config, store) = workspace();

    store.create("Groceries").unwrap();
    let content = store.read("Groceries").unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("<!-- status: open -->"));
    assert_eq!(lines.next(), Some("# Groceries"));

    store.set_status("Groceries", "done").unwrap();
    let content = store.read("Groceries").unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("<!-- status: done -->"));
    assert_eq!(lines.next(), Some("# Groceries"));

    let exported = Exporter::new(&store, &config.output_dir)
        .export_one("Groceries", ExportFormats::new(true, false))
        .unwrap();
    let html_path = config.output_dir.join("Groceries.html");
    assert_eq!(exported.html_path.as_deref(), Some(html_path.as_path()));
    assert!(fs::read_to_string(&html_path)
        .unwrap()
        .contains("<h1>Groceries</h1>"));

    store.delete("Groceries").unwrap();
    assert!(store.list().unwrap().iter().all(|note| note.title != "Groceries"));
}

#[test]
fn create_then_read_starts_with_heading() {
    let (_dir, _config, store) = workspace();
    for title in ["Plain", "Two words", "  Trimmed  ", "Q3: review?", "naïve café"] {
        store.create(title).unwrap();
        let content = store.read(title).unwrap();
        let body: Vec<&str> = content.lines().skip(1).collect();
        assert_eq!(body.first().copied(), Some(format!("# {}", title.trim()).as_str()));
    }
}

#[test]
fn list_matches_files_on_disk() {
    let (_dir, _config, store) = workspace();
    for title in ["zeta", "Alpha", "mid note", "beta"] {
        store.create(title).unwrap();
    }
    store.delete("beta").unwrap();

    let notes = store.list().unwrap();
    let file_names: Vec<&str> = notes.iter().map(|note| note.file_name.as_str()).collect();
    assert_eq!(file_names, vec!["Alpha.md", "mid_note.md", "zeta.md"]);
    assert!(notes.iter().all(|note| note.status == NoteStatus::Open));
}

#[test]
fn status_change_round_trips_body() {
    let (_dir, _config, store) = workspace();
    store.create("Plan").unwrap();
    let path = store.resolve_path("Plan").unwrap();
    fs::write(&path, "<!-- status: open -->\n# Plan\n\n1. draft\n2. review\n").unwrap();

    store.set_status("Plan", "in-progress").unwrap();

    let note = store.list().unwrap().remove(0);
    assert_eq!(note.status, NoteStatus::InProgress);
    let content = store.read("Plan").unwrap();
    let body: Vec<&str> = content.lines().skip(1).collect();
    assert_eq!(body, vec!["# Plan", "", "1. draft", "2. review"]);
}

#[test]
fn backup_of_three_notes() {
    let (_dir, config, store) = workspace();
    for title in ["one", "two", "three"] {
        store.create(title).unwrap();
    }

    let summary = BackupAgent::new(&store, &config.output_dir).backup().unwrap();
    assert_eq!(summary.count, 3);

    let archives: Vec<_> = fs::read_dir(&config.output_dir).unwrap().collect();
    assert_eq!(archives.len(), 1);

    let archive = zip::ZipArchive::new(File::open(&summary.path).unwrap()).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["one.md", "three.md", "two.md"]);
}

#[test]
fn export_all_pdf_survives_deleted_note() {
    let (_dir, config, store) = workspace();
    for title in ["n1", "n2", "n3", "n4", "n5"] {
        store.create(title).unwrap();
    }

    // Titles captured before iteration; one note disappears afterwards.
    let titles: Vec<String> = store.list().unwrap().into_iter().map(|n| n.title).collect();
    store.delete("n3").unwrap();

    let report = Exporter::new(&store, &config.output_dir)
        .export_titles(&titles, ExportFormats::new(false, true));

    assert_eq!(report.exported.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].title, "n3");
    assert!(matches!(report.failures[0].error, Error::NotFound(_)));

    for title in ["n1", "n2", "n4", "n5"] {
        let pdf = config.output_dir.join(format!("{title}.pdf"));
        assert!(fs::read(&pdf).unwrap().starts_with(b"%PDF"));
    }
    assert!(!config.output_dir.join("n3.pdf").exists());
}
