//! List numbering policy and per-line list position lookup.

use serde::Serialize;

use crate::markdown_ast::{Block, List};
use crate::refactor::options::ListNumbering;

/// Deepest list nesting tracked by [`ListState`].
pub const MAX_LIST_DEPTH: usize = 6;

/// Where a line sits inside a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ListState {
    /// 1-based item counter per nesting depth. Slot 0 is unused.
    pub index: [u32; MAX_LIST_DEPTH + 1],
    /// Nesting depth of the innermost list containing the line, 0 outside lists.
    pub depth: usize,
}

impl ListState {
    /// Item numbers from the outermost list down to `depth`.
    pub fn path(&self) -> &[u32] {
        &self.index[1..=self.depth]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListIndexTracker {
    numbering: ListNumbering,
}

impl ListIndexTracker {
    pub fn new(numbering: ListNumbering) -> Self {
        Self { numbering }
    }

    /// Apply the numbering policy to a top-level list.
    pub fn observe(&self, list: &mut List) {
        match self.numbering {
            ListNumbering::IncreaseFromOne if list.ordered => list.start = 1,
            _ => {}
        }
    }

    /// Compute which item, at each nesting depth, contains `line`.
    ///
    /// Counters are rebuilt from the list root on every call; nothing is cached.
    pub fn locate(list: &List, line: usize) -> ListState {
        let mut state = ListState::default();
        descend(list, line, &mut state);
        state
    }
}

fn descend(list: &List, line: usize, state: &mut ListState) {
    if state.depth == MAX_LIST_DEPTH {
        return;
    }
    state.depth += 1;
    let depth = state.depth;

    for item in &list.items {
        state.index[depth] += 1;
        for counter in &mut state.index[depth + 1..] {
            *counter = 0;
        }

        if !item.position.is_some_and(|pos| pos.contains(line)) {
            continue;
        }

        let nested = item.children.iter().filter_map(Block::as_list).find(|child| {
            child.position.is_some_and(|pos| pos.contains(line))
        });
        if let Some(nested) = nested {
            descend(nested, line, state);
        }
        return;
    }
}
