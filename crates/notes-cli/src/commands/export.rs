use notes_core::export::{ExportReport, ExportedNote, Exporter};
use notes_core::{NoteStore, NotesConfig};

use crate::cli::ExportArgs;
use crate::error::CliError;

pub fn run_export(
    args: &ExportArgs,
    store: &NoteStore,
    config: &NotesConfig,
) -> Result<ExportReport, CliError> {
    let formats = args.formats();
    if formats.is_empty() {
        return Err(CliError::NoExportFormat);
    }
    let exporter = Exporter::new(store, &config.output_dir);

    if args.all {
        let report = exporter.export_all(formats)?;
        if report.total() == 0 {
            println!("No notes to export.");
            return Ok(report);
        }
        for exported in &report.exported {
            for line in format_exported(exported) {
                println!("{line}");
            }
        }
        for failure in &report.failures {
            eprintln!("Failed to export '{}': {}", failure.title, failure.error);
        }
        if !report.failures.is_empty() {
            println!("{}", format_export_summary(&report));
        }
        Ok(report)
    } else if let Some(title) = args.title.as_deref() {
        let exported = exporter.export_one(title, formats)?;
        for line in format_exported(&exported) {
            println!("{line}");
        }
        Ok(ExportReport {
            exported: vec![exported],
            failures: Vec::new(),
        })
    } else {
        Err(CliError::MissingExportTarget)
    }
}

pub fn format_exported(exported: &ExportedNote) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(path) = &exported.html_path {
        lines.push(format!("Exported to HTML: {}", path.display()));
    }
    if let Some(path) = &exported.pdf_path {
        lines.push(format!("Exported to PDF: {}", path.display()));
    }
    lines
}

pub fn format_export_summary(report: &ExportReport) -> String {
    format!(
        "Exported {} of {} notes ({} failed)",
        report.exported.len(),
        report.total(),
        report.failures.len()
    )
}
