//! Writing extracted sections out as separate notes.
//!
//! Everything here works directly on the filesystem. Names that are not
//! portable file names are replaced by generated fallbacks rather than
//! reported as errors.

pub mod export;
pub mod naming;
pub mod writer;

use std::path::PathBuf;

use thiserror::Error;

use crate::markdown_ast::MarkdownAstError;

pub use export::{ExportOptions, ExportedNote, export_heading};
pub use naming::{fallback_name, is_valid_file_name};
pub use writer::{append_section, appended_content, ensure_folder, ensure_note};

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("note has no parent directory: {0}")]
    NoParent(PathBuf),

    #[error(transparent)]
    Render(#[from] MarkdownAstError),
}
