//! Running heading counters and dotted index prefixes.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::markdown_ast::{Heading, Inline, MAX_HEADING_DEPTH};
use crate::refactor::options::IndexFrom;

/// Leading `1.2.` style prefix, including any whitespace between and after groups.
static INDEX_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.\s*)*\s*").unwrap());

/// Counter slots, indexed by depth. Slot 0 is unused.
pub type Counters = [u32; MAX_HEADING_DEPTH as usize + 1];

/// Title text with any index prefix removed.
pub fn strip_index_prefix(title: &str) -> &str {
    let prefix_len = INDEX_PREFIX_RE.find(title).map_or(0, |m| m.end());
    &title[prefix_len..]
}

/// A heading's visible title without its index prefix.
pub fn plain_title(heading: &Heading) -> String {
    strip_index_prefix(heading.first_text().unwrap_or_default()).to_string()
}

/// Tracks heading numbering while headings are visited in document order.
#[derive(Debug, Clone, Default)]
pub struct HeadingIndexTracker {
    counters: Counters,
    depth: u8,
    /// When set, observed headings get their prefix rewritten.
    index_from: Option<IndexFrom>,
    /// Shallowest heading depth in the document.
    min_depth: Option<u8>,
}

impl HeadingIndexTracker {
    /// A tracker that only counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// A tracker that also rewrites title prefixes.
    pub fn numbering(index_from: IndexFrom, min_depth: Option<u8>) -> Self {
        Self { index_from: Some(index_from), min_depth, ..Self::default() }
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Depth of the last observed heading, 0 before any.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Advance the counters for a heading at `depth`.
    ///
    /// Skipped shallower levels are back-filled to 1 so an H1 followed by an
    /// H3 numbers the H3 as `1.1.1`.
    pub fn advance(&mut self, depth: u8) {
        let depth = usize::from(depth.clamp(1, MAX_HEADING_DEPTH));

        for counter in &mut self.counters[1..depth] {
            if *counter < 1 {
                *counter = 1;
            }
        }
        self.counters[depth] += 1;
        for counter in &mut self.counters[depth + 1..] {
            *counter = 0;
        }

        self.depth = depth as u8;
    }

    /// Advance the counters and, when numbering is on, refresh the title prefix.
    pub fn observe(&mut self, heading: &mut Heading) {
        self.advance(heading.depth);

        let Some(index_from) = self.index_from else {
            return;
        };
        let prefix = self.prefix(index_from);

        if let Some(Inline::Text(text)) = heading.content.first_mut() {
            let replaced = INDEX_PREFIX_RE.replace(text.as_str(), NoExpand(&prefix)).into_owned();
            *text = replaced;
        } else if !prefix.is_empty() {
            heading.content.insert(0, Inline::Text(prefix));
        }
    }

    fn prefix(&self, index_from: IndexFrom) -> String {
        let start = match (index_from, self.min_depth) {
            (IndexFrom::Never, _) => return String::new(),
            (IndexFrom::Depth(from), Some(min)) if min > from => min,
            (IndexFrom::Depth(from), _) => from,
        };

        let mut prefix: String = (start..=self.depth)
            .map(|level| format!("{}.", self.counters[usize::from(level)]))
            .collect();
        if !prefix.is_empty() {
            prefix.push(' ');
        }
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(depth: u8, title: &str) -> Heading {
        Heading::new(depth, vec![Inline::text(title)])
    }

    #[test]
    fn strip_prefix_variants() {
        assert_eq!(strip_index_prefix("2.1. Intro"), "Intro");
        assert_eq!(strip_index_prefix("1. 2. Intro"), "Intro");
        assert_eq!(strip_index_prefix("Intro"), "Intro");
        assert_eq!(strip_index_prefix("  Intro"), "Intro");
        assert_eq!(strip_index_prefix("2024 plans"), "2024 plans");
    }

    #[test]
    fn counters_reset_deeper_levels() {
        let mut tracker = HeadingIndexTracker::new();
        tracker.advance(1);
        tracker.advance(2);
        tracker.advance(2);
        tracker.advance(3);
        tracker.advance(1);
        assert_eq!(tracker.counters(), [0, 2, 0, 0, 0, 0, 0]);
        assert_eq!(tracker.depth(), 1);
    }

    #[test]
    fn skipped_levels_backfill_to_one() {
        let mut tracker = HeadingIndexTracker::new();
        tracker.advance(3);
        assert_eq!(tracker.counters(), [0, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn observe_writes_prefix() {
        let mut tracker = HeadingIndexTracker::numbering(IndexFrom::Depth(1), Some(1));
        let mut a = heading(1, "A");
        let mut b = heading(2, "9.9. B");
        tracker.observe(&mut a);
        tracker.observe(&mut b);
        assert_eq!(a.raw_title(), "1. A");
        assert_eq!(b.raw_title(), "1.1. B");
    }

    #[test]
    fn observe_starts_at_shallowest_heading() {
        let mut tracker = HeadingIndexTracker::numbering(IndexFrom::Depth(1), Some(2));
        let mut b = heading(2, "B");
        let mut c = heading(3, "C");
        tracker.observe(&mut b);
        tracker.observe(&mut c);
        assert_eq!(b.raw_title(), "1. B");
        assert_eq!(c.raw_title(), "1.1. C");
    }

    #[test]
    fn never_strips_existing_prefix() {
        let mut tracker = HeadingIndexTracker::numbering(IndexFrom::Never, Some(1));
        let mut a = heading(1, "3. A");
        tracker.observe(&mut a);
        assert_eq!(a.raw_title(), "A");
    }

    #[test]
    fn headings_above_start_lose_prefix() {
        let mut tracker = HeadingIndexTracker::numbering(IndexFrom::Depth(2), Some(1));
        let mut a = heading(1, "1. A");
        let mut b = heading(2, "B");
        tracker.observe(&mut a);
        tracker.observe(&mut b);
        assert_eq!(a.raw_title(), "A");
        assert_eq!(b.raw_title(), "1. B");
    }

    #[test]
    fn prefix_is_inserted_before_leading_markup() {
        let mut tracker = HeadingIndexTracker::numbering(IndexFrom::Depth(1), Some(1));
        let mut h = Heading::new(1, vec![Inline::SoftBreak]);
        tracker.observe(&mut h);
        assert_eq!(h.first_text(), Some("1. "));
    }
}
