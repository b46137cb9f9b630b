//! Line-targeted rewrites of a markdown file.

use std::fs;
use std::path::Path;

use mdrefactor_core::RefactorHandle;

use super::{setup, Overrides};
use crate::TargetArgs;

/// One rewrite requested on the command line. Every rewrite is followed by
/// index formatting.
#[derive(Debug, Clone, Copy)]
pub enum Transform {
    Format,
    HeadingToList { line: usize, peers: bool },
    ListToHeading { line: usize },
    HeadingDepth { line: usize, depth: u8, peers: bool },
}

impl Transform {
    fn line(&self) -> Option<usize> {
        match *self {
            Transform::Format => None,
            Transform::HeadingToList { line, .. }
            | Transform::ListToHeading { line }
            | Transform::HeadingDepth { line, .. } => Some(line),
        }
    }

    fn apply(&self, handle: &mut RefactorHandle) {
        match *self {
            Transform::Format => {}
            Transform::HeadingToList { line, peers } => {
                handle.heading_to_list_by_line(line, peers);
            }
            Transform::ListToHeading { line } => {
                handle.list_to_heading_by_line(line);
            }
            Transform::HeadingDepth { line, depth, peers } => {
                handle.heading_to_heading_by_line(line, depth, peers);
            }
        }
    }
}

pub fn run(config: Option<&Path>, overrides: &Overrides, transform: Transform, args: &TargetArgs) {
    let rc = setup(config, overrides);

    let original = match fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.file.display());
            std::process::exit(1);
        }
    };

    let mut handle = RefactorHandle::parse(&original);

    if let Some(line) = transform.line() {
        if handle.check_state_by_line(line).is_none() {
            tracing::warn!(line, "no markdown node at line, only formatting is applied");
        }
    }

    tracing::debug!(?transform, file = %args.file.display(), "applying transform");
    transform.apply(&mut handle);
    handle.format_index(&rc.format_options());

    let rendered = match handle.render() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if args.dry_run {
        print!("{rendered}");
        return;
    }

    if rendered == original {
        println!("Unchanged: {}", args.file.display());
        return;
    }

    if let Err(e) = fs::write(&args.file, &rendered) {
        eprintln!("Error writing {}: {e}", args.file.display());
        std::process::exit(1);
    }
    tracing::info!(file = %args.file.display(), "rewrote note");
    println!("Updated: {}", args.file.display());
}
