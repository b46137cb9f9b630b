pub mod doctor;
pub mod export;
pub mod state;
pub mod transform;

use std::path::Path;

use mdrefactor_core::config::loader::ConfigLoader;
use mdrefactor_core::config::types::ResolvedConfig;
use mdrefactor_core::refactor::{IndexFrom, ListNumbering};

/// Settings given on the command line that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub index_from: Option<u8>,
    pub list_method: Option<String>,
    pub verbose: bool,
}

impl Overrides {
    fn apply(&self, rc: &mut ResolvedConfig) -> Result<(), String> {
        if let Some(depth) = self.index_from {
            rc.index.add_heading_index_from = IndexFrom::try_from(depth)?;
        }
        if let Some(ref method) = self.list_method {
            rc.index.list_index_handle_method = ListNumbering::from(method.clone());
        }
        Ok(())
    }
}

/// Load the config file and apply command line overrides.
pub fn resolve(config: Option<&Path>, overrides: &Overrides) -> Result<ResolvedConfig, String> {
    let mut rc = ConfigLoader::load(config).map_err(|e| e.to_string())?;
    overrides.apply(&mut rc)?;
    Ok(rc)
}

/// Start logging for a resolved configuration. Exits with status 1 on failure.
pub fn start_logging(rc: &ResolvedConfig, overrides: &Overrides) {
    if let Err(e) = crate::logging::init(&rc.logging, overrides.verbose) {
        eprintln!("Error: failed to open log file: {e}");
        std::process::exit(1);
    }

    if let ListNumbering::Other(ref method) = rc.index.list_index_handle_method {
        tracing::warn!(method = %method, "unknown list numbering method, lists are left as is");
    }
}

/// Resolve settings and start logging. Exits with status 1 on failure.
pub fn setup(config: Option<&Path>, overrides: &Overrides) -> ResolvedConfig {
    let rc = match resolve(config, overrides) {
        Ok(rc) => rc,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            std::process::exit(1);
        }
    };
    start_logging(&rc, overrides);
    rc
}
