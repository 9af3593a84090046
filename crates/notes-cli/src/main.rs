//! notes CLI - plain-text Markdown notes from the command line
//!
//! Notes live as `<title>.md` files in a single directory and are edited in
//! the user's own editor.

mod cli;
mod commands;
mod config;
mod error;


use std::path::{Path, PathBuf};

use clap::Parser;
use notes_core::NoteStore;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::add::run_add;
use crate::commands::backup::run_backup;
use crate::commands::common::open_store;
use crate::commands::config::{run_config_init, run_config_show};
use crate::commands::delete::run_delete;
use crate::commands::edit::run_edit;
use crate::commands::export::run_export;
use crate::commands::list::run_list;
use crate::commands::show::run_show;
use crate::commands::status::run_status;
use crate::config::{default_config_path, CliConfig, Settings};
use crate::error::CliError;

fn main() {
    // Argument errors exit here, before anything touches the filesystem.
    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Cli {
        command,
        notes_dir,
        output_dir,
    } = cli;

    match command {
        Commands::Add { title } => {
            with_store(notes_dir, output_dir, |store, _| run_add(&title, store))
        }
        Commands::Edit { title } => {
            with_store(notes_dir, output_dir, |store, _| run_edit(&title, store))
        }
        Commands::Show { title } => {
            with_store(notes_dir, output_dir, |store, _| run_show(&title, store))
        }
        Commands::Delete { title } => {
            with_store(notes_dir, output_dir, |store, _| run_delete(&title, store))
        }
        Commands::List { json } => with_store(notes_dir, output_dir, |store, _| run_list(json, store)),
        Commands::Status { title, status } => with_store(notes_dir, output_dir, |store, _| {
            run_status(&title, status.into(), store)
        }),
        Commands::Export(args) => with_store(notes_dir, output_dir, |store, settings| {
            run_export(&args, store, &settings.notes).map(|_| ())
        }),
        Commands::Backup => with_store(notes_dir, output_dir, |store, settings| {
            run_backup(store, &settings.notes).map(|_| ())
        }),
        Commands::Config {
            command: ConfigCommands::Show,
        } => {
            let config_path = default_config_path()?;
            let settings = load_settings(&config_path, notes_dir, output_dir)?;
            run_config_show(&settings, &config_path)
        }
        Commands::Config {
            command: ConfigCommands::Init { editor },
        } => {
            let config_path = default_config_path()?;
            run_config_init(&config_path, notes_dir, output_dir, editor).map(|_| ())
        }
    }
}

fn load_settings(
    config_path: &Path,
    notes_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<Settings, CliError> {
    let settings = CliConfig::load_from_path(config_path)?.resolve(notes_dir, output_dir)?;
    tracing::debug!(
        "notes dir {}, output dir {}",
        settings.notes.notes_dir.display(),
        settings.notes.output_dir.display()
    );
    Ok(settings)
}

fn with_store(
    notes_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    command: impl FnOnce(&NoteStore, &Settings) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let settings = load_settings(&default_config_path()?, notes_dir, output_dir)?;
    let store = open_store(&settings)?;
    command(&store, &settings)
}
