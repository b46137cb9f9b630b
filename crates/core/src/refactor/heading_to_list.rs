//! Flatten heading sections into a nested ordered list.

use std::iter;

use crate::markdown_ast::{Block, List, ListItem, Paragraph};
use crate::refactor::first_peer;
use crate::refactor::heading_index::plain_title;

/// Output of flattening a run of heading sections.
#[derive(Debug, Clone)]
pub struct Flattened {
    /// One top-level item per converted heading.
    pub list: List,
    /// Nodes a list item cannot hold, in document order.
    pub tail: Vec<Block>,
    /// Index one past the last node the conversion consumed.
    pub end: usize,
}

/// Flatten the heading at `index` (and, with `peers`, its same-depth siblings
/// from `first` onwards) without touching `blocks`.
///
/// Returns `None` when `index` is not a heading.
pub fn flatten_sections(blocks: &[Block], first: usize, index: usize, peers: bool) -> Option<Flattened> {
    let depth = blocks.get(index)?.heading_depth()?;
    let mut list = List::ordered();
    let mut tail = Vec::new();

    let end = if peers {
        let mut cursor = first;
        while cursor < blocks.len() {
            match blocks[cursor].heading_depth() {
                Some(d) if d == depth => {
                    cursor = flatten_heading(blocks, cursor, &mut list.items, &mut tail);
                }
                Some(d) if d < depth => break,
                _ => cursor += 1,
            }
        }
        cursor
    } else {
        flatten_heading(blocks, index, &mut list.items, &mut tail)
    };

    Some(Flattened { list, tail, end })
}

/// Replace the section at `index` with its list form, in place.
///
/// With `modify_peers`, every same-depth sibling in the enclosing section is
/// converted too; `only_below_peers` restricts that to siblings after `index`.
pub fn heading_to_list(blocks: &mut Vec<Block>, index: usize, modify_peers: bool, only_below_peers: bool) {
    let Some(depth) = blocks.get(index).and_then(Block::heading_depth) else {
        return;
    };
    let first = if modify_peers && !only_below_peers { first_peer(blocks, index, depth) } else { index };

    let Some(Flattened { list, tail, end }) = flatten_sections(blocks, first, index, modify_peers) else {
        return;
    };

    tracing::debug!(first, end, depth, items = list.items.len(), tail = tail.len(), "heading to list");
    blocks.splice(first..end, iter::once(Block::List(list)).chain(tail));
}

/// Convert the heading at `index` into an item appended to `into`.
///
/// Returns the index of the first node the section does not own.
fn flatten_heading(blocks: &[Block], index: usize, into: &mut Vec<ListItem>, tail: &mut Vec<Block>) -> usize {
    let Some(heading) = blocks[index].as_heading() else {
        return index + 1;
    };
    let depth = heading.depth;
    let title = plain_title(heading);

    let mut nested = List::ordered();
    let mut lists_seen = 0;
    let mut cursor = index + 1;

    while cursor < blocks.len() {
        match &blocks[cursor] {
            Block::Heading(child) if child.depth > depth => {
                cursor = flatten_heading(blocks, cursor, &mut nested.items, tail);
                continue;
            }
            Block::Heading(_) => break,
            Block::Paragraph(paragraph) => {
                nested.items.push(ListItem::new(vec![Block::Paragraph(paragraph.clone())]));
            }
            Block::List(list) => {
                lists_seen += 1;
                let label = Paragraph::from_text(format!("{title}-list{lists_seen}"));
                nested.items.push(ListItem::new(vec![Block::Paragraph(label), Block::List(list.clone())]));
            }
            other => tail.push(other.clone()),
        }
        cursor += 1;
    }

    into.push(ListItem::new(vec![Block::Paragraph(Paragraph::from_text(title)), Block::List(nested)]));
    cursor
}
