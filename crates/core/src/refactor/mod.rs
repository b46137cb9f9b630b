//! Structural refactoring of markdown documents.
//!
//! A [`RefactorHandle`] owns one parsed document for the length of a
//! transform chain. Line-targeted operations take 1-based source lines and
//! silently do nothing when no node covers the line.

pub mod cascade;
pub mod extract;
pub mod heading_index;
pub mod heading_to_list;
pub mod list_index;
pub mod list_to_heading;
pub mod options;
pub mod state;

use crate::markdown_ast::{self, Block, Document, MarkdownAstError, MAX_HEADING_DEPTH};

pub use extract::ExtractedSection;
pub use heading_index::{HeadingIndexTracker, plain_title, strip_index_prefix};
pub use list_index::{ListIndexTracker, ListState};
pub use options::{FormatOptions, IndexFrom, ListNumbering};
pub use state::{LineState, NodeKind};

/// Shallowest and deepest heading depth among top-level headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRange {
    pub min: u8,
    pub max: u8,
}

/// Single-owner handle over a parsed document.
#[derive(Debug, Clone, Default)]
pub struct RefactorHandle {
    document: Document,
}

impl RefactorHandle {
    pub fn parse(text: &str) -> Self {
        Self { document: markdown_ast::parse(text) }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn render(&self) -> Result<String, MarkdownAstError> {
        markdown_ast::render(&self.document)
    }

    /// Convert the section whose heading starts at `line` into a nested list.
    pub fn heading_to_list_by_line(&mut self, line: usize, modify_peers: bool) -> &mut Self {
        if let Some(index) = heading_at_line(&self.document.children, line) {
            heading_to_list::heading_to_list(&mut self.document.children, index, modify_peers, false);
        }
        self
    }

    /// Convert the list owning `line` into headings below the current heading.
    ///
    /// The nesting depth of the line inside the list decides how many levels
    /// are lifted, capped so no heading passes depth 6.
    pub fn list_to_heading_by_line(&mut self, line: usize) -> &mut Self {
        let blocks = &mut self.document.children;
        let Some(state) = state::locate_state(blocks, line) else {
            return self;
        };
        if state.node_kind != NodeKind::List {
            return self;
        }

        let available = usize::from(MAX_HEADING_DEPTH - state.heading_depth.min(MAX_HEADING_DEPTH));
        let flatten_count = state.list.depth.min(available);
        tracing::debug!(line, heading_depth = state.heading_depth, flatten_count, "list to heading");

        let index = state.node_index;
        if let Block::List(list) = blocks.remove(index) {
            let contents = list_to_heading::list_to_heading(state.heading_depth + 1, flatten_count, list);
            blocks.splice(index..index, contents);
        }
        self
    }

    /// Move the heading at `line` to `new_depth`, cascading to its subsections.
    pub fn heading_to_heading_by_line(&mut self, line: usize, new_depth: u8, modify_peers: bool) -> &mut Self {
        cascade::retarget_heading(&mut self.document.children, line, new_depth, modify_peers);
        self
    }

    /// Renumber heading prefixes and ordered lists.
    pub fn format_index(&mut self, options: &FormatOptions) -> &mut Self {
        let min_depth = self.min_max_heading_depth().map(|range| range.min);
        let mut headings = HeadingIndexTracker::numbering(options.add_heading_index_from, min_depth);
        let lists = ListIndexTracker::new(options.list_index_handle_method.clone());

        for block in &mut self.document.children {
            match block {
                Block::Heading(heading) => headings.observe(heading),
                Block::List(list) => lists.observe(list),
                _ => {}
            }
        }
        self
    }

    pub fn check_state_by_line(&self, line: usize) -> Option<LineState> {
        state::locate_state(&self.document.children, line)
    }

    pub fn min_max_heading_depth(&self) -> Option<DepthRange> {
        self.document.children.iter().filter_map(Block::heading_depth).fold(None, |range, depth| {
            Some(match range {
                None => DepthRange { min: depth, max: depth },
                Some(DepthRange { min, max }) => DepthRange { min: min.min(depth), max: max.max(depth) },
            })
        })
    }

    pub fn content_of_heading_by_line(&self, line: usize) -> Result<ExtractedSection, MarkdownAstError> {
        extract::extract_under_heading(&self.document.children, line)
    }

    pub fn contents_of_peer_headings_by_line(
        &self,
        line: usize,
    ) -> Result<Vec<ExtractedSection>, MarkdownAstError> {
        extract::extract_peer_sections(&self.document.children, line)
    }
}

/// Index of the top-level heading whose source starts exactly at `line`.
pub(crate) fn heading_at_line(blocks: &[Block], line: usize) -> Option<usize> {
    blocks.iter().position(|block| {
        matches!(block, Block::Heading(h) if h.position.is_some_and(|pos| pos.start_line == line))
    })
}

/// Walk back from `index` to the earliest same-depth heading in the
/// enclosing section.
pub(crate) fn first_peer(blocks: &[Block], index: usize, depth: u8) -> usize {
    let mut first = index;
    for candidate in (0..index).rev() {
        match blocks[candidate].heading_depth() {
            Some(d) if d == depth => first = candidate,
            Some(d) if d < depth => break,
            _ => {}
        }
    }
    first
}
