//! Unflatten a (possibly nested) list back into heading sections.

use crate::markdown_ast::{Block, Heading, List, MAX_HEADING_DEPTH};

/// Turn `list` into a heading sequence, one nesting level per round.
///
/// Round `r` turns each item's leading paragraph into a heading at
/// `start_depth + r`. Rounds are capped so no heading goes past depth 6;
/// anything nested deeper stays a list.
pub fn list_to_heading(start_depth: u8, flatten_count: usize, list: List) -> Vec<Block> {
    let start_depth = start_depth.max(1);
    let available = usize::from(MAX_HEADING_DEPTH).saturating_sub(usize::from(start_depth) - 1);
    let rounds = flatten_count.min(available);

    let mut contents = vec![Block::List(list)];
    for round in 0..rounds {
        // rounds <= 6, so the cast cannot truncate
        contents = flatten_round(contents, start_depth + round as u8);
    }
    contents
}

fn flatten_round(contents: Vec<Block>, depth: u8) -> Vec<Block> {
    let mut flattened = Vec::with_capacity(contents.len());

    for block in contents {
        let Block::List(list) = block else {
            flattened.push(block);
            continue;
        };

        for item in list.items {
            let mut children = item.children.into_iter();
            match children.next() {
                Some(Block::Paragraph(title)) => {
                    flattened.push(Block::Heading(Heading::new(depth, title.content)));
                }
                Some(first) => flattened.push(first),
                None => {}
            }
            flattened.extend(children);
        }
    }

    flattened
}
