use std::path::Path;

use mdrefactor_core::notes::export_heading;

use super::{setup, Overrides};
use crate::ExportArgs;

pub fn run(config: Option<&Path>, overrides: &Overrides, args: &ExportArgs) {
    let rc = setup(config, overrides);

    let notes = match export_heading(&args.file, args.line, args.peers, &rc.export) {
        Ok(notes) => notes,
        Err(e) => {
            eprintln!("Error exporting from {}: {e}", args.file.display());
            std::process::exit(1);
        }
    };

    if notes.is_empty() {
        println!("(no heading at line {})", args.line);
        return;
    }

    for note in &notes {
        let status = if note.changed { "Exported" } else { "Unchanged" };
        println!("{status}: {}", note.path.display());
    }
}
