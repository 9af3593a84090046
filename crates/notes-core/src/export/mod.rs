//! Note export to HTML and PDF.
//!
//! A note is converted to HTML once; the HTML string is written as-is and/or
//! handed to a [`PdfRenderer`]. Output files are named after the note slug
//! and placed in the configured output directory.

mod html;
mod pdf;

use std::fs;
use std::path::{Path, PathBuf};

pub use html::markdown_to_html;
pub use pdf::{html_to_blocks, BlockStyle, BuiltinPdfRenderer, PdfRenderer, TextBlock};

use crate::models::{normalize_title, slug, title_from_file_name};
use crate::{Error, NoteStore, Result};

/// Which outputs to produce for each note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportFormats {
    pub html: bool,
    pub pdf: bool,
}

impl ExportFormats {
    pub const fn new(html: bool, pdf: bool) -> Self {
        Self { html, pdf }
    }

    /// True when no output format is selected
    pub const fn is_empty(self) -> bool {
        !self.html && !self.pdf
    }
}

/// Files written for one note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedNote {
    pub title: String,
    pub html_path: Option<PathBuf>,
    pub pdf_path: Option<PathBuf>,
}

/// A note that could not be exported
#[derive(Debug)]
pub struct ExportFailure {
    pub title: String,
    pub error: Error,
}

/// Outcome of a batch export
#[derive(Debug, Default)]
pub struct ExportReport {
    pub exported: Vec<ExportedNote>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    /// Number of notes attempted
    pub fn total(&self) -> usize {
        self.exported.len() + self.failures.len()
    }
}

/// Output file name for a note title (`My note`, `html` -> `My_note.html`)
pub fn export_file_name(title: &str, extension: &str) -> Result<String> {
    Ok(format!("{}.{extension}", slug(normalize_title(title)?)))
}

/// Renders notes from a [`NoteStore`] into an output directory
pub struct Exporter<'a> {
    store: &'a NoteStore,
    output_dir: PathBuf,
    pdf_renderer: Box<dyn PdfRenderer>,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a NoteStore, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            output_dir: output_dir.into(),
            pdf_renderer: Box::new(BuiltinPdfRenderer),
        }
    }

    /// Replace the PDF renderer
    #[must_use]
    pub fn with_pdf_renderer(mut self, renderer: Box<dyn PdfRenderer>) -> Self {
        self.pdf_renderer = renderer;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export a single note
    pub fn export_one(&self, title: &str, formats: ExportFormats) -> Result<ExportedNote> {
        let content = self.store.read(title)?;
        let html = markdown_to_html(&content);
        fs::create_dir_all(&self.output_dir)?;

        let html_path = if formats.html {
            let path = self.output_dir.join(export_file_name(title, "html")?);
            fs::write(&path, &html)?;
            tracing::info!("Exported HTML {}", path.display());
            Some(path)
        } else {
            None
        };

        let pdf_path = if formats.pdf {
            let path = self.output_dir.join(export_file_name(title, "pdf")?);
            let bytes = self.pdf_renderer.render(&html)?;
            fs::write(&path, bytes)?;
            tracing::info!("Exported PDF {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(ExportedNote {
            title: title.trim().to_string(),
            html_path,
            pdf_path,
        })
    }

    /// Export every note in the store; failures are collected per note.
    ///
    /// Titles come from file names alone, so a note that cannot be read is
    /// reported in [`ExportReport::failures`] instead of aborting the batch.
    pub fn export_all(&self, formats: ExportFormats) -> Result<ExportReport> {
        let titles: Vec<String> = self
            .store
            .note_files()?
            .iter()
            .filter_map(|path| path.file_name()?.to_str().and_then(title_from_file_name))
            .collect();
        Ok(self.export_titles(&titles, formats))
    }

    /// Export the given notes, continuing past individual failures
    pub fn export_titles<I, S>(&self, titles: I, formats: ExportFormats) -> ExportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = ExportReport::default();
        for title in titles {
            let title = title.as_ref();
            match self.export_one(title, formats) {
                Ok(exported) => report.exported.push(exported),
                Err(error) => {
                    tracing::warn!("Failed to export '{title}': {error}");
                    report.failures.push(ExportFailure {
                        title: title.to_string(),
                        error,
                    });
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::editor::Editor;

    struct NoopEditor;

    impl Editor for NoopEditor {
        fn open(&self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    struct FailingPdfRenderer;

    impl PdfRenderer for FailingPdfRenderer {
        fn render(&self, _html: &str) -> Result<Vec<u8>> {
            Err(Error::Render("renderer offline".to_string()))
        }
    }

    fn setup(titles: &[&str]) -> (TempDir, NoteStore) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes"), Box::new(NoopEditor)).unwrap();
        for title in titles {
            store.create(title).unwrap();
        }
        (dir, store)
    }

    #[test]
    fn export_file_name_uses_slug() {
        assert_eq!(export_file_name("My note", "html").unwrap(), "My_note.html");
        assert!(export_file_name("a/b", "pdf").is_err());
    }

    #[test]
    fn export_one_writes_html_only() {
        let (dir, store) = setup(&["Groceries"]);
        let out = dir.path().join("out");
        let exporter = Exporter::new(&store, &out);

        let exported = exporter
            .export_one("Groceries", ExportFormats::new(true, false))
            .unwrap();

        assert_eq!(exported.html_path, Some(out.join("Groceries.html")));
        assert_eq!(exported.pdf_path, None);
        let html = fs::read_to_string(out.join("Groceries.html")).unwrap();
        assert!(html.contains("<h1>Groceries</h1>"));
        assert!(!out.join("Groceries.pdf").exists());
    }

    #[test]
    fn export_one_pdf_does_not_need_html_file() {
        let (dir, store) = setup(&["Report card"]);
        let out = dir.path().join("out");
        let exporter = Exporter::new(&store, &out);

        let exported = exporter
            .export_one("Report card", ExportFormats::new(false, true))
            .unwrap();

        assert_eq!(exported.pdf_path, Some(out.join("Report_card.pdf")));
        assert!(!out.join("Report_card.html").exists());
        assert!(fs::read(out.join("Report_card.pdf")).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn export_one_missing_note_is_not_found() {
        let (dir, store) = setup(&[]);
        let exporter = Exporter::new(&store, dir.path().join("out"));
        let err = exporter
            .export_one("Ghost", ExportFormats::new(true, true))
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn export_all_collects_failures_and_continues() {
        let (dir, store) = setup(&["one", "two"]);
        let exporter = Exporter::new(&store, dir.path().join("out"))
            .with_pdf_renderer(Box::new(FailingPdfRenderer));

        let report = exporter
            .export_all(ExportFormats::new(true, true))
            .unwrap();

        assert_eq!(report.total(), 2);
        assert!(report.exported.is_empty());
        let failed: Vec<&str> = report.failures.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(failed, vec!["one", "two"]);
        // HTML is written before the PDF step fails.
        assert!(dir.path().join("out/one.html").exists());
    }

    #[test]
    fn export_titles_reports_missing_note() {
        let (dir, store) = setup(&["a", "b", "c"]);
        let titles: Vec<String> = store.list().unwrap().into_iter().map(|n| n.title).collect();
        store.delete("b").unwrap();

        let exporter = Exporter::new(&store, dir.path().join("out"));
        let report = exporter.export_titles(&titles, ExportFormats::new(true, false));

        assert_eq!(report.exported.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].title, "b");
        assert!(matches!(report.failures[0].error, Error::NotFound(_)));
    }

    #[test]
    fn export_all_reports_unreadable_note_and_exports_the_rest() {
        let (dir, store) = setup(&["alpha", "beta", "gamma", "delta"]);
        fs::write(store.dir().join("latin1.md"), b"# caf\xe9\n").unwrap();
        let out = dir.path().join("out");

        let report = Exporter::new(&store, &out)
            .export_all(ExportFormats::new(true, false))
            .unwrap();

        assert_eq!(report.exported.len(), 4);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].title, "latin1");
        assert!(matches!(report.failures[0].error, Error::Io(_)));
        for title in ["alpha", "beta", "gamma", "delta"] {
            assert!(out.join(format!("{title}.html")).is_file());
        }
    }

    #[test]
    fn export_all_on_empty_store() {
        let (dir, store) = setup(&[]);
        let exporter = Exporter::new(&store, dir.path().join("out"));
        let report = exporter.export_all(ExportFormats::new(true, false)).unwrap();
        assert_eq!(report.total(), 0);
    }
}
