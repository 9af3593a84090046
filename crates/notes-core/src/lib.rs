//! notes-core - Core library for notes
//!
//! This crate owns the on-disk note collection (one Markdown file per note),
//! the status marker embedded on the first line of each note, and the export
//! and backup flows built on top of it. The `notes` CLI is a thin layer over
//! these types.

pub mod backup;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod models;
pub mod store;

pub use config::NotesConfig;
pub use error::{Error, Result};
pub use models::{Note, NoteStatus};
pub use store::NoteStore;
