use std::path::Path;

use mdrefactor_core::config::loader::default_config_path;

use super::{resolve, start_logging, Overrides};

pub fn run(config: Option<&Path>, overrides: &Overrides) {
    let rc = match resolve(config, overrides) {
        Ok(rc) => rc,
        Err(e) => {
            println!("FAIL mdr doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    };
    start_logging(&rc, overrides);

    println!("OK   mdr doctor");
    println!("build: {}", mdrefactor_core::doctor_stub());
    match rc.source {
        Some(ref path) => println!("path: {}", path.display()),
        None => println!("path: (defaults, no file at {})", default_config_path().display()),
    }
    println!("index.add_heading_index_from: {}", u8::from(rc.index.add_heading_index_from));
    println!("index.list_index_handle_method: {}", rc.index.list_index_handle_method);
    println!("export.invalid_note_prefix: {}", rc.export.invalid_note_prefix);
    println!("export.invalid_folder_prefix: {}", rc.export.invalid_folder_prefix);
    println!("logging.level: {}", rc.logging.level);
    if let Some(ref file) = rc.logging.file {
        println!("logging.file: {}", file.display());
    }
    tracing::debug!("doctor finished");
}
