pub mod comrak;
pub mod types;

// Re-export primary API
pub use comrak::{parse, render};
pub use types::{
    Block, Document, Fragment, Heading, Inline, List, ListItem, MAX_HEADING_DEPTH,
    MarkdownAstError, Opaque, Paragraph, Position, is_heading_depth,
};
