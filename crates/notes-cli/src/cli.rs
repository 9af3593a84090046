use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use notes_core::export::ExportFormats;
use notes_core::NoteStatus;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Plain-text Markdown notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the note files
    #[arg(long, global = true, value_name = "PATH")]
    pub notes_dir: Option<PathBuf>,

    /// Directory for exports and backups
    #[arg(long, global = true, value_name = "PATH")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new note and open it in the editor
    #[command(alias = "new")]
    Add {
        /// Title of the note
        #[arg(long)]
        title: String,
    },
    /// Edit an existing note
    Edit {
        /// Title of the note
        #[arg(long)]
        title: String,
    },
    /// Print a note to stdout
    #[command(alias = "read")]
    Show {
        /// Title of the note
        #[arg(long)]
        title: String,
    },
    /// Delete an existing note
    Delete {
        /// Title of the note
        #[arg(long)]
        title: String,
    },
    /// List all notes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the status of a note
    Status {
        /// Title of the note
        #[arg(long)]
        title: String,
        /// New status
        #[arg(long = "set", value_enum, value_name = "STATUS")]
        status: StatusArg,
    },
    /// Export notes as HTML and/or PDF
    Export(ExportArgs),
    /// Back up all notes as a zip file
    Backup,
    /// Inspect or update the CLI configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["title", "all"])))]
#[command(group(ArgGroup::new("format").required(true).multiple(true).args(["html", "pdf"])))]
pub struct ExportArgs {
    /// Title of the note to export
    #[arg(long)]
    pub title: Option<String>,
    /// Export every note
    #[arg(long)]
    pub all: bool,
    /// Write an HTML file
    #[arg(long)]
    pub html: bool,
    /// Write a PDF file
    #[arg(long)]
    pub pdf: bool,
}

impl ExportArgs {
    pub const fn formats(&self) -> ExportFormats {
        ExportFormats::new(self.html, self.pdf)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum StatusArg {
    Open,
    #[value(alias = "in progress")]
    InProgress,
    Done,
}

impl From<StatusArg> for NoteStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Open => Self::Open,
            StatusArg::InProgress => Self::InProgress,
            StatusArg::Done => Self::Done,
        }
    }
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write the config file; combine with --notes-dir / --output-dir
    Init {
        /// Editor command, e.g. "code --wait"
        #[arg(long, value_name = "COMMAND")]
        editor: Option<String>,
    },
}
