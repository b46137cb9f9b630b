//! Report the position-dependent state of a line.

use std::fs;
use std::path::Path;

use mdrefactor_core::refactor::{LineState, NodeKind};
use mdrefactor_core::RefactorHandle;
use serde::Serialize;

use super::{setup, Overrides};
use crate::StateArgs;

/// State of a line as printed by `mdr state --json`.
#[derive(Debug, Serialize)]
pub struct StateOutput {
    pub line: usize,
    pub node_kind: NodeKind,
    pub node_index: usize,
    pub heading_depth: u8,
    /// Dotted heading index, e.g. `2.1`, empty before the first heading.
    pub heading_index: String,
    pub list_depth: usize,
    pub list_index: Vec<u32>,
}

impl StateOutput {
    fn new(line: usize, state: &LineState) -> Self {
        let depth = usize::from(state.heading_depth);
        Self {
            line,
            node_kind: state.node_kind,
            node_index: state.node_index,
            heading_depth: state.heading_depth,
            heading_index: dotted(&state.heading_index[1..=depth]),
            list_depth: state.list.depth,
            list_index: state.list.path().to_vec(),
        }
    }
}

fn dotted(counters: &[u32]) -> String {
    counters.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(".")
}

pub fn run(config: Option<&Path>, overrides: &Overrides, args: &StateArgs) {
    setup(config, overrides);

    let text = match fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {e}", args.file.display());
            std::process::exit(1);
        }
    };

    let handle = RefactorHandle::parse(&text);
    let output = handle.check_state_by_line(args.line).map(|state| StateOutput::new(args.line, &state));

    if args.json {
        match serde_json::to_string_pretty(&output) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error serializing state: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let Some(output) = output else {
        println!("line {}: no markdown node", args.line);
        return;
    };

    println!("line:     {}", output.line);
    println!("node:     {:?} (#{})", output.node_kind, output.node_index);
    if output.heading_depth == 0 {
        println!("heading:  (none)");
    } else {
        println!("heading:  depth {}, index {}", output.heading_depth, output.heading_index);
    }
    if output.list_depth == 0 {
        println!("list:     (none)");
    } else {
        println!("list:     depth {}, index {}", output.list_depth, dotted(&output.list_index));
    }
}
