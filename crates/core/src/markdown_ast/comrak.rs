use std::cell::RefCell;

use comrak::arena_tree::Node;
use comrak::nodes::{Ast, AstNode, LineColumn, ListType, NodeHeading, NodeValue};
use comrak::{Arena, Options, format_commonmark, parse_document};

use crate::markdown_ast::types::*;

/// Parse markdown into the owned document tree.
///
/// Headings, paragraphs and lists become typed nodes carrying their source
/// line span; everything else is kept as an opaque comrak fragment.
pub fn parse(input: &str) -> Document {
    let arena = Arena::new();
    let options = default_options();
    let root = parse_document(&arena, input, &options);

    Document::new(root.children().map(convert_block).collect())
}

/// Serialize a document back to markdown.
///
/// Lists are written with `-` bullets and tab indentation. Headings,
/// paragraphs and every other block go through comrak's CommonMark formatter.
pub fn render(document: &Document) -> Result<String, MarkdownAstError> {
    let body = render_sequence(&document.children, |_, _| "\n\n")?;
    if body.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("{body}\n"))
}

// --- Parsing ---

fn convert_block<'a>(node: &'a AstNode<'a>) -> Block {
    let ast = node.data.borrow();
    let position = Some(Position::new(ast.sourcepos.start.line, ast.sourcepos.end.line));

    match &ast.value {
        NodeValue::Heading(heading) => Block::Heading(Heading {
            depth: heading.level,
            content: convert_inlines(node),
            position,
        }),
        NodeValue::Paragraph => {
            Block::Paragraph(Paragraph { content: convert_inlines(node), position })
        }
        NodeValue::List(list) => Block::List(List {
            ordered: matches!(list.list_type, ListType::Ordered),
            start: list.start,
            tight: list.tight,
            items: node.children().filter_map(convert_item).collect(),
            position,
        }),
        _ => Block::Other(Opaque { fragment: fragment_of(node), position }),
    }
}

fn convert_item<'a>(node: &'a AstNode<'a>) -> Option<ListItem> {
    let ast = node.data.borrow();
    if !matches!(ast.value, NodeValue::Item(_)) {
        return None;
    }

    Some(ListItem {
        children: node.children().map(convert_block).collect(),
        position: Some(Position::new(ast.sourcepos.start.line, ast.sourcepos.end.line)),
    })
}

fn convert_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut inlines: Vec<Inline> = Vec::new();

    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => {
                // Adjacent text runs are merged so the title lives in one node.
                if let Some(Inline::Text(last)) = inlines.last_mut() {
                    last.push_str(text);
                } else {
                    inlines.push(Inline::Text(text.to_string()));
                }
            }
            NodeValue::SoftBreak => inlines.push(Inline::SoftBreak),
            NodeValue::LineBreak => inlines.push(Inline::LineBreak),
            _ => inlines.push(Inline::Other(fragment_of(child))),
        }
    }

    inlines
}

fn fragment_of<'a>(node: &'a AstNode<'a>) -> Fragment {
    Fragment {
        value: node.data.borrow().value.clone(),
        children: node.children().map(fragment_of).collect(),
    }
}

// --- Rendering ---

/// Render a run of sibling blocks, joined by `separator(prev, next)`.
///
/// Empty renders (lists without items) are dropped. Two lists of the same kind
/// that end up adjacent alternate their marker so they stay separate lists.
fn render_sequence(
    blocks: &[Block],
    separator: impl Fn(&Block, &Block) -> &'static str,
) -> Result<String, MarkdownAstError> {
    let mut out = String::new();
    let mut last: Option<(&Block, bool)> = None;

    for block in blocks {
        let alternate = match (last, block) {
            (Some((Block::List(prev), prev_alt)), Block::List(list))
                if prev.ordered == list.ordered =>
            {
                !prev_alt
            }
            _ => false,
        };

        let rendered = render_block(block, alternate)?;
        if rendered.is_empty() {
            continue;
        }

        if let Some((prev, _)) = last {
            out.push_str(separator(prev, block));
        }
        out.push_str(&rendered);
        last = Some((block, alternate));
    }

    Ok(out)
}

fn render_block(block: &Block, alternate: bool) -> Result<String, MarkdownAstError> {
    match block {
        Block::Heading(heading) => render_heading(heading),
        Block::Paragraph(paragraph) => render_paragraph(paragraph),
        Block::List(list) => render_list(list, alternate),
        Block::Other(opaque) => render_fragment(&opaque.fragment),
    }
}

fn render_heading(heading: &Heading) -> Result<String, MarkdownAstError> {
    let arena = Arena::new();
    let level = heading.depth.clamp(1, MAX_HEADING_DEPTH);
    let node = alloc(&arena, NodeValue::Heading(NodeHeading { level, setext: false }));

    let mut content = heading.content.iter();
    if let Some(Inline::Text(text)) = heading.content.first() {
        // The formatter would escape the `.` of a leading `1. ` index prefix,
        // which cannot start a block inside a heading anyway.
        let (prefix, rest) = text.split_at(index_prefix_len(text));
        if !prefix.is_empty() {
            node.append(alloc(&arena, NodeValue::Raw(prefix.to_string())));
        }
        if !rest.is_empty() {
            node.append(alloc(&arena, NodeValue::Text(rest.to_string())));
        }
        content.next();
    }
    for inline in content {
        node.append(inline_node(&arena, inline));
    }

    Ok(format_block(&arena, node)?.trim_end().to_string())
}

fn render_paragraph(paragraph: &Paragraph) -> Result<String, MarkdownAstError> {
    let arena = Arena::new();
    let node = alloc(&arena, NodeValue::Paragraph);
    for inline in &paragraph.content {
        node.append(inline_node(&arena, inline));
    }
    format_block(&arena, node)
}

/// Byte length of a leading run of digits, dots and spaces.
fn index_prefix_len(text: &str) -> usize {
    text.len() - text.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ' ').len()
}

fn render_list(list: &List, alternate: bool) -> Result<String, MarkdownAstError> {
    let mut items = Vec::with_capacity(list.items.len());

    for (offset, item) in list.items.iter().enumerate() {
        let marker = match (list.ordered, alternate) {
            (true, false) => format!("{}.", list.start + offset),
            (true, true) => format!("{})", list.start + offset),
            (false, false) => "-".to_string(),
            (false, true) => "*".to_string(),
        };

        let tight = list.tight;
        let body = render_sequence(&item.children, |_, next| {
            if tight && matches!(next, Block::List(_)) { "\n" } else { "\n\n" }
        })?;

        items.push(indent_item(&marker, &body));
    }

    Ok(items.join(if list.tight { "\n" } else { "\n\n" }))
}

/// Put the marker on the first line and indent the rest with tabs.
///
/// Continuation lines need to reach the item's content column, one past
/// the marker and its space, so wide markers like `100.` take two tabs.
fn indent_item(marker: &str, body: &str) -> String {
    let indent = "\t".repeat(marker.len() / 4 + 1);
    let mut out = String::from(marker);

    for (index, line) in body.lines().enumerate() {
        if index == 0 {
            out.push(' ');
        } else {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&indent);
            }
        }
        out.push_str(line);
    }

    out
}

fn inline_node<'a>(arena: &'a Arena<AstNode<'a>>, inline: &Inline) -> &'a AstNode<'a> {
    match inline {
        Inline::Text(text) => alloc(arena, NodeValue::Text(text.clone())),
        Inline::SoftBreak => alloc(arena, NodeValue::SoftBreak),
        Inline::LineBreak => alloc(arena, NodeValue::LineBreak),
        Inline::Other(fragment) => build(arena, fragment),
    }
}

/// Format an opaque block through comrak.
fn render_fragment(fragment: &Fragment) -> Result<String, MarkdownAstError> {
    let arena = Arena::new();
    let node = build(&arena, fragment);
    format_block(&arena, node)
}

/// Format a single block inside a throwaway document.
fn format_block<'a>(
    arena: &'a Arena<AstNode<'a>>,
    block: &'a AstNode<'a>,
) -> Result<String, MarkdownAstError> {
    let root = alloc(arena, NodeValue::Document);
    root.append(block);

    let options = default_options();
    let mut output = Vec::new();
    format_commonmark(root, &options, &mut output)?;
    let text = String::from_utf8(output)?;

    Ok(text.trim_end_matches('\n').to_string())
}

fn alloc<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(Node::new(RefCell::new(Ast::new(value, LineColumn { line: 1, column: 1 }))))
}

fn build<'a>(arena: &'a Arena<AstNode<'a>>, fragment: &Fragment) -> &'a AstNode<'a> {
    let node = alloc(arena, fragment.value.clone());
    for child in &fragment.children {
        node.append(build(arena, child));
    }
    node
}

fn default_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.parse.smart = false;

    // Fragments pass through the formatter, so raw HTML must survive it.
    options.render.unsafe_ = true;
    options.render.github_pre_lang = true;

    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_records_line_spans() {
        let doc = parse("# A\n## B\ntext\nmore\n## C\n");
        let spans: Vec<_> = doc.children.iter().map(|b| b.position().unwrap()).collect();
        assert_eq!(
            spans,
            vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 4), Position::new(5, 5)]
        );
    }

    #[test]
    fn parse_classifies_blocks() {
        let doc = parse("# Title\n\npara\n\n1. one\n2. two\n\n```\ncode\n```\n");
        assert!(matches!(doc.children[0], Block::Heading(ref h) if h.depth == 1));
        assert!(matches!(doc.children[1], Block::Paragraph(_)));
        assert!(matches!(doc.children[2], Block::List(ref l) if l.ordered && l.items.len() == 2));
        assert!(matches!(doc.children[3], Block::Other(_)));
    }

    #[test]
    fn render_uses_dash_bullets_and_tabs() {
        let doc = parse("* a\n  * b\n* c\n");
        assert_eq!(render(&doc).unwrap(), "- a\n\t- b\n- c\n");
    }

    #[test]
    fn render_keeps_ordered_start() {
        let doc = parse("3. a\n4. b\n");
        assert_eq!(render(&doc).unwrap(), "3. a\n4. b\n");
    }

    #[test]
    fn render_separates_blocks_with_blank_line() {
        let doc = parse("# A\ntext\n## B\n");
        assert_eq!(render(&doc).unwrap(), "# A\n\ntext\n\n## B\n");
    }

    #[test]
    fn render_empty_document() {
        assert_eq!(render(&Document::default()).unwrap(), "");
    }

    #[test]
    fn render_skips_empty_lists() {
        let mut item = ListItem::new(vec![Block::Paragraph(Paragraph::from_text("a"))]);
        item.children.push(Block::List(List::ordered()));
        let mut list = List::ordered();
        list.items.push(item);
        let doc = Document::new(vec![Block::List(list)]);
        assert_eq!(render(&doc).unwrap(), "1. a\n");
    }

    #[test]
    fn render_adjacent_lists_alternate_marker() {
        let mut first = List::ordered();
        first.items.push(ListItem::new(vec![Block::Paragraph(Paragraph::from_text("a"))]));
        let second = first.clone();
        let doc = Document::new(vec![Block::List(first), Block::List(second)]);
        assert_eq!(render(&doc).unwrap(), "1. a\n\n1) a\n");
    }

    #[test]
    fn wide_markers_keep_nested_blocks_inside_item() {
        let doc = parse("100. x\n     - c\n");
        let rendered = render(&doc).unwrap();
        assert_eq!(rendered, "100. x\n\t\t- c\n");

        let reparsed = parse(&rendered);
        let Block::List(list) = &reparsed.children[0] else { panic!("expected a list") };
        assert_eq!(list.items.len(), 1);
        assert!(matches!(list.items[0].children.as_slice(), [Block::Paragraph(_), Block::List(_)]));
    }

    #[test]
    fn heading_index_prefix_is_not_escaped() {
        let doc = parse("# 1. A\n\n## 2.1. B\n");
        assert_eq!(render(&doc).unwrap(), "# 1. A\n\n## 2.1. B\n");
    }

    #[test]
    fn escaped_brackets_stay_literal() {
        for input in ["\\[a\\]: /url\n", "\\[a\\](b)\n", "\\!\\[x\\](y.png)\n", "a\n\n\\[^1\\]: note\n"] {
            let before = parse(input);
            let after = parse(&render(&before).unwrap());
            assert_eq!(after.children.len(), before.children.len(), "{input:?}");
            for block in &after.children {
                let Block::Paragraph(paragraph) = block else { panic!("{input:?} lost a paragraph") };
                assert!(paragraph.content.iter().all(|i| matches!(i, Inline::Text(_))), "{input:?}");
            }
        }
    }

    #[test]
    fn paragraph_start_hazards_are_escaped() {
        let paragraph = Paragraph::from_text("1. not a list");
        let rendered = render(&Document::new(vec![Block::Paragraph(paragraph)])).unwrap();
        assert!(matches!(parse(&rendered).children[0], Block::Paragraph(_)));
    }

    #[test]
    fn round_trip_preserves_inline_markup() {
        let input = "# 1. Title with **bold**\n\nSome `code` and [a link](https://example.com).\n";
        let rendered = render(&parse(input)).unwrap();
        assert_eq!(rendered, input);
    }

    #[test]
    fn round_trip_keeps_code_blocks_opaque() {
        let input = "# A\n\n```rust\nfn main() {}\n```\n";
        let rendered = render(&parse(input)).unwrap();
        assert!(rendered.starts_with("# A\n\n```"));
        assert!(rendered.contains("fn main() {}"));
        assert!(matches!(parse(&rendered).children[1], Block::Other(_)));
    }
}
