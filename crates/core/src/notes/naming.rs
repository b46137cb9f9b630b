//! File name validation and fallback name generation.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::notes::NoteError;

/// Windows-safe name: no reserved characters or control codes, and no
/// trailing whitespace or dot.
static VALID_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[^<>:"/\\|?*\x00-\x1F]*[^<>:"/\\|?*\x00-\x1F\s.]$"#).unwrap()
});

/// Check whether `name` is usable as a file or folder name on every platform.
pub fn is_valid_file_name(name: &str) -> bool {
    VALID_NAME_RE.is_match(name)
}

/// Smallest unused `<prefix>_<N>` (plus `extension`) in `dir`.
///
/// The directory is listed on every call. A missing directory counts as empty.
pub fn fallback_name(dir: &Path, prefix: &str, extension: Option<&str>) -> Result<String, NoteError> {
    let taken = existing_names(dir)?;

    let name_for = |n: usize| match extension {
        Some(ext) => format!("{prefix}_{n}.{ext}"),
        None => format!("{prefix}_{n}"),
    };

    let name = (0..)
        .map(&name_for)
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| name_for(taken.len()));
    Ok(name)
}

fn existing_names(dir: &Path) -> Result<HashSet<String>, NoteError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
        Err(source) => return Err(NoteError::Io { path: dir.to_path_buf(), source }),
    };

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|source| NoteError::Io { path: dir.to_path_buf(), source })?;
        names.insert(entry.file_name().to_string_lossy().into_owned());
    }
    Ok(names)
}
