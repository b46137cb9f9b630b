//! Slice heading sections out as standalone documents.

use serde::Serialize;

use crate::markdown_ast::{Block, Document, MarkdownAstError, render};
use crate::refactor::first_peer;
use crate::refactor::state::locate_state;

/// A section rendered on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedSection {
    /// The owning heading's title as written, index prefix included.
    pub title: String,
    pub content: String,
}

impl ExtractedSection {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }
}

/// Extract everything under the heading that owns `line`.
///
/// Contained headings are shifted up by the owner's depth. Returns an empty
/// section when the line is not on a heading.
pub fn extract_under_heading(blocks: &[Block], line: usize) -> Result<ExtractedSection, MarkdownAstError> {
    let Some(state) = locate_state(blocks, line) else {
        return Ok(ExtractedSection::default());
    };
    let Some(owner) = state.heading(blocks) else {
        return Ok(ExtractedSection::default());
    };

    let mut section = Vec::new();
    for block in &blocks[state.node_index + 1..] {
        if block.heading_depth().is_some_and(|d| d <= owner.depth) {
            break;
        }
        section.push(renormalized(block, owner.depth));
    }

    Ok(ExtractedSection { title: owner.raw_title(), content: render(&Document::new(section))? })
}

/// Extract every same-depth sibling section of the heading that owns `line`.
///
/// All sections are renormalized by the selected heading's depth.
pub fn extract_peer_sections(blocks: &[Block], line: usize) -> Result<Vec<ExtractedSection>, MarkdownAstError> {
    let Some(state) = locate_state(blocks, line) else {
        return Ok(Vec::new());
    };
    let Some(owner) = state.heading(blocks) else {
        return Ok(Vec::new());
    };
    let depth = owner.depth;
    let first = first_peer(blocks, state.node_index, depth);

    let mut sections: Vec<(String, Vec<Block>)> = Vec::new();
    for block in &blocks[first..] {
        match block {
            Block::Heading(heading) if heading.depth < depth => break,
            Block::Heading(heading) if heading.depth == depth => {
                sections.push((heading.raw_title(), Vec::new()));
            }
            _ => {
                if let Some((_, children)) = sections.last_mut() {
                    children.push(renormalized(block, depth));
                }
            }
        }
    }

    sections
        .into_iter()
        .map(|(title, children)| {
            Ok(ExtractedSection { title, content: render(&Document::new(children))? })
        })
        .collect()
}

fn renormalized(block: &Block, owner_depth: u8) -> Block {
    let mut block = block.clone();
    if let Block::Heading(heading) = &mut block {
        heading.depth = heading.depth.saturating_sub(owner_depth).max(1);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_ast::parse;

    #[test]
    fn section_is_renormalized() {
        let doc = parse("### Owner\n\nintro\n\n##### Deep\n\nbody\n\n### Next\n");
        let section = extract_under_heading(&doc.children, 1).unwrap();
        assert_eq!(section.title, "Owner");
        assert_eq!(section.content, "intro\n\n## Deep\n\nbody\n");
    }

    #[test]
    fn title_keeps_index_prefix() {
        let doc = parse("# 1. Owner\ntext\n");
        let section = extract_under_heading(&doc.children, 1).unwrap();
        assert_eq!(section.title, "1. Owner");
        assert_eq!(section.content, "text\n");
    }

    #[test]
    fn non_heading_line_gives_empty_section() {
        let doc = parse("# A\n\ntext\n");
        assert!(extract_under_heading(&doc.children, 3).unwrap().is_empty());
        assert!(extract_under_heading(&doc.children, 40).unwrap().is_empty());
    }

    #[test]
    fn extraction_leaves_tree_untouched() {
        let doc = parse("# A\n## B\n");
        extract_under_heading(&doc.children, 1).unwrap();
        assert_eq!(doc.children[1].heading_depth(), Some(2));
    }

    #[test]
    fn peer_sections_cover_all_siblings() {
        let doc = parse("# Top\n## A\na text\n### A1\n## B\nb text\n# Next\n## X\n");
        let sections = extract_peer_sections(&doc.children, 5).unwrap();
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(sections[0].content, "a text\n\n# A1\n");
        assert_eq!(sections[1].content, "b text\n");
    }

    #[test]
    fn peer_sections_of_non_heading_is_empty() {
        let doc = parse("text\n");
        assert!(extract_peer_sections(&doc.children, 1).unwrap().is_empty());
    }
}
