//! Change a heading's depth and carry the shift down to its subsections.

use crate::markdown_ast::{Block, is_heading_depth};
use crate::refactor::heading_to_list::heading_to_list;
use crate::refactor::{first_peer, heading_at_line};

/// Move the heading starting at `line` to `new_depth`.
///
/// Every following heading deeper than the old depth (or equal to it, with
/// `modify_peers`) is shifted by the same delta, until the first heading that
/// falls outside. A heading pushed past depth 6 is converted, together with
/// its following peers and their sections, into a list instead.
pub fn retarget_heading(blocks: &mut Vec<Block>, line: usize, new_depth: u8, modify_peers: bool) {
    if !is_heading_depth(i32::from(new_depth)) {
        return;
    }
    let Some(index) = heading_at_line(blocks, line) else {
        return;
    };
    let Some(depth) = blocks[index].heading_depth() else {
        return;
    };

    let first = if modify_peers { first_peer(blocks, index, depth) } else { index };
    let Some(selected) = blocks[first].as_heading_mut() else {
        return;
    };
    let old_depth = selected.depth;
    selected.depth = new_depth;
    let delta = i32::from(new_depth) - i32::from(old_depth);

    tracing::debug!(line, old_depth, new_depth, modify_peers, "retarget heading");

    let mut cursor = first + 1;
    while cursor < blocks.len() {
        let Some(heading) = blocks[cursor].as_heading_mut() else {
            cursor += 1;
            continue;
        };

        let inside = if modify_peers { heading.depth >= old_depth } else { heading.depth > old_depth };
        if !inside {
            break;
        }

        let shifted = i32::from(heading.depth) + delta;
        if is_heading_depth(shifted) {
            // bounds checked above
            heading.depth = shifted as u8;
        } else {
            tracing::debug!(cursor, shifted, "heading depth overflow, converting to list");
            heading_to_list(blocks, cursor, true, true);
        }
        cursor += 1;
    }
}
