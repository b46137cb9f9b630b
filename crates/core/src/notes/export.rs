//! Export heading sections of a note into separate notes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::notes::NoteError;
use crate::notes::writer::{append_section, ensure_folder, ensure_note};
use crate::refactor::{ExtractedSection, RefactorHandle};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportOptions {
    /// Prefix for notes whose heading is not a valid file name.
    #[serde(default = "default_note_prefix")]
    pub invalid_note_prefix: String,
    /// Prefix for folders whose name is not a valid file name.
    #[serde(default = "default_folder_prefix")]
    pub invalid_folder_prefix: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { invalid_note_prefix: default_note_prefix(), invalid_folder_prefix: default_folder_prefix() }
    }
}

fn default_note_prefix() -> String {
    "invalid_note_title".to_string()
}

fn default_folder_prefix() -> String {
    "invalid_folder_title".to_string()
}

/// A note written by [`export_heading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedNote {
    pub path: PathBuf,
    /// False when the note already ended with the section.
    pub changed: bool,
}

/// Copy the section under the heading at `line` of `source` into its own note.
///
/// Without `peers`, one note named after the heading is placed next to
/// `source`. With `peers`, a folder named after `source` receives one note
/// per sibling section. Notes are written one at a time, in document order.
/// The source note itself is not modified.
pub fn export_heading(
    source: &Path,
    line: usize,
    peers: bool,
    options: &ExportOptions,
) -> Result<Vec<ExportedNote>, NoteError> {
    let text = fs::read_to_string(source).map_err(|e| NoteError::Io { path: source.to_path_buf(), source: e })?;
    let parent = source.parent().ok_or_else(|| NoteError::NoParent(source.to_path_buf()))?;
    let handle = RefactorHandle::parse(&text);

    if peers {
        let sections = handle.contents_of_peer_headings_by_line(line)?;
        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let stem = source.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
        let folder = ensure_folder(parent, &stem, &options.invalid_folder_prefix)?;
        sections.iter().map(|section| write_section(&folder, section, options)).collect()
    } else {
        let section = handle.content_of_heading_by_line(line)?;
        if section.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![write_section(parent, &section, options)?])
    }
}

fn write_section(dir: &Path, section: &ExtractedSection, options: &ExportOptions) -> Result<ExportedNote, NoteError> {
    let path = ensure_note(dir, &section.title, &options.invalid_note_prefix)?;
    let changed = append_section(&path, &section.content)?;
    tracing::info!(path = %path.display(), changed, "exported section");
    Ok(ExportedNote { path, changed })
}
