use obs2prompt_core::config::LoggingConfig;
use std::fs::File;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;

/// Install the global subscriber.
///
/// `debug` forces debug-level tracing on stdout; otherwise the configured
/// level goes to stderr. A configured log file gets its own level; the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn init(cfg: &LoggingConfig, debug: bool) -> Option<WorkerGuard> {
    let console_level = if debug {
        LevelFilter::DEBUG
    } else {
        parse_level(&cfg.level).unwrap_or(LevelFilter::INFO)
    };

    let console_filter =
        EnvFilter::builder().with_default_directive(console_level.into()).from_env_lossy();

    let writer = if debug {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let console_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(true)
        .with_target(false)
        .with_filter(console_filter);

    let registry = tracing_subscriber::registry().with(console_layer);

    if let Some(ref path) = cfg.file {
        let file_level_str = cfg.file_level.as_deref().unwrap_or(&cfg.level);
        let file_level = parse_level(file_level_str).unwrap_or(LevelFilter::DEBUG);

        let file_filter = EnvFilter::builder()
            .with_default_directive(file_level.into())
            .from_env_lossy();

        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };

        let (non_blocking, guard) = tracing_appender::non_blocking(file);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(file_filter);

        registry.with(file_layer).init();
        Some(guard)
    } else {
        registry.init();
        None
    }
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
