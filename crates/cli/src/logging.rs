use mdrefactor_core::config::types::LoggingConfig;
use std::fs::{self, File};
use std::io;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> =
    Mutex::new(None);

/// Install the console layer and, when `[logging] file` is set, a file layer.
///
/// `verbose` lowers the console threshold to debug regardless of the
/// configured level. `RUST_LOG` still takes precedence over both.
pub fn init(cfg: &LoggingConfig, verbose: bool) -> io::Result<()> {
    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        parse_level(&cfg.level).unwrap_or(LevelFilter::INFO)
    };

    let console_filter =
        EnvFilter::builder().with_default_directive(console_level.into()).from_env_lossy();

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(true)
        .with_target(false)
        .without_time()
        .with_filter(console_filter);

    let registry = tracing_subscriber::registry().with(console_layer);

    let Some(ref path) = cfg.file else {
        registry.init();
        return Ok(());
    };

    let file_level = cfg
        .file_level
        .as_deref()
        .and_then(parse_level)
        .or_else(|| parse_level(&cfg.level))
        .unwrap_or(LevelFilter::DEBUG);

    let file_filter =
        EnvFilter::builder().with_default_directive(file_level.into()).from_env_lossy();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    // Dropping the guard stops the writer thread.
    if let Ok(mut g) = LOG_GUARD.lock() {
        *g = Some(guard);
    }

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(file_filter);

    registry.with(file_layer).init();
    Ok(())
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" | "warning" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level(" Debug "), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("warning"), Some(LevelFilter::WARN));
    }

    #[test]
    fn parse_level_rejects_unknown() {
        assert_eq!(parse_level("loud"), None);
        assert_eq!(parse_level(""), None);
    }
}
