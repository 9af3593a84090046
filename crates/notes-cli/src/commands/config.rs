use std::path::{Path, PathBuf};

use notes_core::editor::SystemEditor;
use notes_core::NotesConfig;

use crate::config::{normalize_text_option, CliConfig, Settings};
use crate::error::CliError;

pub fn run_config_show(settings: &Settings, config_path: &Path) -> Result<(), CliError> {
    for line in format_settings(settings, config_path) {
        println!("{line}");
    }
    Ok(())
}

pub fn format_settings(settings: &Settings, config_path: &Path) -> Vec<String> {
    let editor = SystemEditor::from_env(settings.editor.as_deref());
    vec![
        format!("config file: {}", config_path.display()),
        format!("notes dir:   {}", settings.notes.notes_dir.display()),
        format!("output dir:  {}", settings.notes.output_dir.display()),
        format!("editor:      {}", editor.command()),
    ]
}

pub fn run_config_init(
    config_path: &Path,
    notes_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    editor: Option<String>,
) -> Result<CliConfig, CliError> {
    let mut config = CliConfig::load_from_path(config_path)?;

    if let Some(notes_dir) = notes_dir {
        config.notes_dir = Some(notes_dir);
    }
    if let Some(output_dir) = output_dir {
        config.output_dir = Some(output_dir);
    }
    if let Some(editor) = normalize_text_option(editor) {
        config.editor = Some(editor);
    }

    if let (Some(notes_dir), Some(output_dir)) = (&config.notes_dir, &config.output_dir) {
        NotesConfig::new(notes_dir, output_dir).validate()?;
    }

    config.save_to_path(config_path)?;
    println!("Saved config to {}", config_path.display());
    Ok(config)
}
