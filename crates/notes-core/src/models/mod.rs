//! Data models for notes

mod note;
mod status;

pub use note::{file_name_for_title, normalize_title, title_from_file_name, Note, NOTE_EXTENSION};
pub(crate) use note::slug;
pub(crate) use status::is_marker_line;
pub use status::{
    parse_status_marker, status_marker_line, NoteStatus, STATUS_MARKER_PREFIX, STATUS_MARKER_SUFFIX,
};
