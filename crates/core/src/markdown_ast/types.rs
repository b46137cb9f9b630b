use comrak::nodes::NodeValue;
use serde::Serialize;
use thiserror::Error;

/// Deepest heading level Markdown can express.
pub const MAX_HEADING_DEPTH: u8 = 6;

/// Returns true for depths a heading can carry (1-6).
pub fn is_heading_depth(depth: i32) -> bool {
    (1..=i32::from(MAX_HEADING_DEPTH)).contains(&depth)
}

/// Source span of a parsed node, 1-based and inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub start_line: usize,
    pub end_line: usize,
}

impl Position {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }

    pub fn contains(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Owned copy of a comrak subtree the refactoring core does not look inside.
///
/// Rendered back through comrak's CommonMark formatter, so whatever it holds
/// comes out exactly as the default renderer would write it.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub value: NodeValue,
    pub children: Vec<Fragment>,
}

/// Inline content of headings and paragraphs.
#[derive(Debug, Clone)]
pub enum Inline {
    /// Literal text, already unescaped.
    Text(String),
    SoftBreak,
    LineBreak,
    /// Emphasis, code spans, links and every other inline kind.
    Other(Fragment),
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Heading {
    /// Heading level, 1 (highest) to 6.
    pub depth: u8,
    pub content: Vec<Inline>,
    pub position: Option<Position>,
}

impl Heading {
    pub fn new(depth: u8, content: Vec<Inline>) -> Self {
        Self { depth, content, position: None }
    }

    /// The first text child, which holds the visible title and its index prefix.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(Inline::as_text)
    }

    /// Title exactly as written, index prefix included.
    pub fn raw_title(&self) -> String {
        self.first_text().unwrap_or_default().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct Paragraph {
    pub content: Vec<Inline>,
    pub position: Option<Position>,
}

impl Paragraph {
    pub fn new(content: Vec<Inline>) -> Self {
        Self { content, position: None }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Inline::text(text)])
    }
}

#[derive(Debug, Clone)]
pub struct List {
    pub ordered: bool,
    /// First number of an ordered list. Ignored for bullet lists.
    pub start: usize,
    pub tight: bool,
    pub items: Vec<ListItem>,
    pub position: Option<Position>,
}

impl List {
    /// A fresh tight ordered list numbered from 1.
    pub fn ordered() -> Self {
        Self { ordered: true, start: 1, tight: true, items: Vec::new(), position: None }
    }
}

#[derive(Debug, Clone)]
pub struct ListItem {
    pub children: Vec<Block>,
    pub position: Option<Position>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children, position: None }
    }
}

/// A block kind the core passes through untouched (code, quotes, tables, ...).
#[derive(Debug, Clone)]
pub struct Opaque {
    pub fragment: Fragment,
    pub position: Option<Position>,
}

/// A block-level node of the document tree.
#[derive(Debug, Clone)]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    Other(Opaque),
}

impl Block {
    pub fn position(&self) -> Option<Position> {
        match self {
            Block::Heading(h) => h.position,
            Block::Paragraph(p) => p.position,
            Block::List(l) => l.position,
            Block::Other(o) => o.position,
        }
    }

    /// True when this node came from parsed text and its span covers `line`.
    pub fn spans(&self, line: usize) -> bool {
        self.position().is_some_and(|pos| pos.contains(line))
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_heading_mut(&mut self) -> Option<&mut Heading> {
        match self {
            Block::Heading(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Block::List(l) => Some(l),
            _ => None,
        }
    }

    /// Heading depth, if this block is a heading.
    pub fn heading_depth(&self) -> Option<u8> {
        self.as_heading().map(|h| h.depth)
    }
}

/// A parsed Markdown document: the ordered top-level block sequence.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub children: Vec<Block>,
}

impl Document {
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }
}

#[derive(Debug, Error)]
pub enum MarkdownAstError {
    #[error("failed to render markdown: {0}")]
    RenderError(#[from] std::io::Error),

    #[error("renderer produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_contains_is_inclusive() {
        let pos = Position::new(3, 5);
        assert!(!pos.contains(2));
        assert!(pos.contains(3));
        assert!(pos.contains(5));
        assert!(!pos.contains(6));
    }

    #[test]
    fn synthetic_blocks_span_nothing() {
        let block = Block::Paragraph(Paragraph::from_text("x"));
        assert!(!block.spans(1));
    }

    #[test]
    fn heading_depth_bounds() {
        assert!(!is_heading_depth(0));
        assert!(is_heading_depth(1));
        assert!(is_heading_depth(6));
        assert!(!is_heading_depth(7));
    }
}
