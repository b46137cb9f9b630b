//! Create notes and folders, and append extracted sections to notes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::notes::NoteError;
use crate::notes::naming::{fallback_name, is_valid_file_name};

/// Content that already ends in a rule (or is blank) needs no separator.
static SEPARATED_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\n---+\s*$|^\s*$").unwrap());

const SECTION_SEPARATOR: &str = "\n\n---\n";

/// Return the path of `<title>.md` in `dir`, creating an empty note if needed.
///
/// Titles that are not valid file names fall back to `<fallback_prefix>_<N>.md`.
pub fn ensure_note(dir: &Path, title: &str, fallback_prefix: &str) -> Result<PathBuf, NoteError> {
    let file_name = format!("{title}.md");
    let mut path = dir.join(&file_name);

    if !path.is_file() {
        if !is_valid_file_name(&file_name) {
            let fallback = fallback_name(dir, fallback_prefix, Some("md"))?;
            tracing::warn!(title, fallback = %fallback, "note title is not a valid file name");
            path = dir.join(fallback);
        }
        tracing::debug!(path = %path.display(), "creating note");
        fs::write(&path, "").map_err(|source| NoteError::Io { path: path.clone(), source })?;
    }

    Ok(path)
}

/// Return the path of folder `name` in `dir`, creating it if needed.
pub fn ensure_folder(dir: &Path, name: &str, fallback_prefix: &str) -> Result<PathBuf, NoteError> {
    let mut path = dir.join(name);

    if !path.is_dir() {
        if !is_valid_file_name(name) {
            let fallback = fallback_name(dir, fallback_prefix, None)?;
            tracing::warn!(name, fallback = %fallback, "folder name is not a valid file name");
            path = dir.join(fallback);
        }
        tracing::debug!(path = %path.display(), "creating folder");
        fs::create_dir_all(&path).map_err(|source| NoteError::Io { path: path.clone(), source })?;
    }

    Ok(path)
}

/// What `existing` becomes after appending `addition`, or `None` if it
/// already ends with it.
pub fn appended_content(existing: &str, addition: &str) -> Option<String> {
    if existing.trim_end().ends_with(addition.trim_end()) {
        return None;
    }

    let mut content = String::with_capacity(existing.len() + addition.len() + SECTION_SEPARATOR.len());
    content.push_str(existing);
    if !SEPARATED_END_RE.is_match(existing) {
        content.push_str(SECTION_SEPARATOR);
    }
    content.push_str(addition);
    Some(content)
}

/// Append `addition` to the note at `path`. Returns whether the note changed.
pub fn append_section(path: &Path, addition: &str) -> Result<bool, NoteError> {
    let existing = fs::read_to_string(path).map_err(|source| NoteError::Io { path: path.to_path_buf(), source })?;

    let Some(content) = appended_content(&existing, addition) else {
        tracing::debug!(path = %path.display(), "note already ends with section");
        return Ok(false);
    };

    fs::write(path, content).map_err(|source| NoteError::Io { path: path.to_path_buf(), source })?;
    Ok(true)
}
