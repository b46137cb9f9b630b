//! Resolve which top-level node, heading and list position a line belongs to.

use serde::Serialize;

use crate::markdown_ast::{Block, Heading};
use crate::refactor::heading_index::{Counters, HeadingIndexTracker};
use crate::refactor::list_index::{ListIndexTracker, ListState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Heading,
    Paragraph,
    List,
    Other,
}

impl From<&Block> for NodeKind {
    fn from(block: &Block) -> Self {
        match block {
            Block::Heading(_) => NodeKind::Heading,
            Block::Paragraph(_) => NodeKind::Paragraph,
            Block::List(_) => NodeKind::List,
            Block::Other(_) => NodeKind::Other,
        }
    }
}

/// Position-dependent state of a single line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineState {
    /// Heading counters after every heading up to and including the owning node.
    pub heading_index: Counters,
    /// Depth of the nearest heading at or above the line, 0 if none.
    pub heading_depth: u8,
    pub list: ListState,
    /// Handle of the owning node: its index among the top-level nodes the
    /// state was located in. Resolve it with [`LineState::node`].
    pub node_index: usize,
    pub node_kind: NodeKind,
}

impl LineState {
    /// The owning node, looked up in the same block slice passed to [`locate_state`].
    pub fn node<'a>(&self, blocks: &'a [Block]) -> Option<&'a Block> {
        blocks.get(self.node_index)
    }

    /// The owning node when it is a heading.
    pub fn heading<'a>(&self, blocks: &'a [Block]) -> Option<&'a Heading> {
        self.node(blocks).and_then(Block::as_heading)
    }
}

/// Find the top-level node whose source span contains `line`.
///
/// Returns `None` when no parsed node covers the line, e.g. blank lines
/// between blocks or lines past the end of the document.
pub fn locate_state(blocks: &[Block], line: usize) -> Option<LineState> {
    let mut headings = HeadingIndexTracker::new();

    for (node_index, block) in blocks.iter().enumerate() {
        if let Block::Heading(heading) = block {
            headings.advance(heading.depth);
        }

        if !block.spans(line) {
            continue;
        }

        let list = match block {
            Block::List(list) => ListIndexTracker::locate(list, line),
            _ => ListState::default(),
        };

        return Some(LineState {
            heading_index: headings.counters(),
            heading_depth: headings.depth(),
            list,
            node_index,
            node_kind: NodeKind::from(block),
        });
    }

    None
}
