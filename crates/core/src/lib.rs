#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod markdown_ast;
pub mod notes;
pub mod refactor;

pub use refactor::RefactorHandle;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// One-line build summary printed by `mdr doctor`.
pub fn doctor_stub() -> String {
    format!("mdrefactor-core v{} on {}", version(), std::env::consts::OS)
}
