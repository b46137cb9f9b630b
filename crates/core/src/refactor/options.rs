//! Numbering options shared by `format_index` and the configuration file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::markdown_ast::MAX_HEADING_DEPTH;

/// Heading depth from which dotted index prefixes are written.
///
/// Serialized as an integer: `1..=6` for a depth, `7` for "never".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IndexFrom {
    Depth(u8),
    /// Never write a prefix; existing prefixes are stripped.
    Never,
}

impl Default for IndexFrom {
    fn default() -> Self {
        IndexFrom::Depth(1)
    }
}

impl TryFrom<u8> for IndexFrom {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=MAX_HEADING_DEPTH => Ok(IndexFrom::Depth(value)),
            7 => Ok(IndexFrom::Never),
            other => Err(format!("heading index depth must be 1-7, got {other}")),
        }
    }
}

impl From<IndexFrom> for u8 {
    fn from(value: IndexFrom) -> Self {
        match value {
            IndexFrom::Depth(depth) => depth,
            IndexFrom::Never => MAX_HEADING_DEPTH + 1,
        }
    }
}

/// How ordered list numbering is rewritten by `format_index`.
///
/// Unknown method names are kept and treated as no-ops so newer settings
/// files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ListNumbering {
    #[default]
    Disabled,
    /// Every ordered list restarts at 1.
    IncreaseFromOne,
    Other(String),
}

impl From<String> for ListNumbering {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Disabled" => ListNumbering::Disabled,
            "Increase from 1" => ListNumbering::IncreaseFromOne,
            _ => ListNumbering::Other(value),
        }
    }
}

impl From<ListNumbering> for String {
    fn from(value: ListNumbering) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ListNumbering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListNumbering::Disabled => f.write_str("Disabled"),
            ListNumbering::IncreaseFromOne => f.write_str("Increase from 1"),
            ListNumbering::Other(name) => f.write_str(name),
        }
    }
}

/// Options for `format_index`.
///
/// The default leaves list numbers alone and only strips heading prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub add_heading_index_from: IndexFrom,
    pub list_index_handle_method: ListNumbering,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            add_heading_index_from: IndexFrom::Never,
            list_index_handle_method: ListNumbering::Disabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_from_accepts_sentinel() {
        assert_eq!(IndexFrom::try_from(3), Ok(IndexFrom::Depth(3)));
        assert_eq!(IndexFrom::try_from(7), Ok(IndexFrom::Never));
        assert!(IndexFrom::try_from(0).is_err());
        assert!(IndexFrom::try_from(8).is_err());
        assert_eq!(u8::from(IndexFrom::Never), 7);
    }

    #[test]
    fn list_numbering_keeps_unknown_methods() {
        assert_eq!(ListNumbering::from("Increase from 1".to_string()), ListNumbering::IncreaseFromOne);
        assert_eq!(ListNumbering::from("Disabled".to_string()), ListNumbering::Disabled);
        let other = ListNumbering::from("Increase from Any".to_string());
        assert_eq!(other.to_string(), "Increase from Any");
    }
}
