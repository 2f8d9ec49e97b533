//! Subscriber setup for the binary.
//!
//! Two layers share one registry: a console layer filtered by the requested
//! level (or `RUST_LOG`), and a file layer that records everything from
//! DEBUG up into a size-rotated log file.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Log file written next to the working directory unless overridden.
pub const DEFAULT_LOG_FILE: &str = "conversion_and_gif_creation.log";

/// Size at which the log file is rotated.
pub const LOG_FILE_MAX_BYTES: u64 = 1024 * 1024;

/// Rotated files kept besides the active one.
pub const LOG_FILE_ARCHIVES: usize = 5;

#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Console level, e.g. `info` or `debug`
    pub level: String,
    /// Emit console events as JSON
    pub json: bool,
    /// File log target; `None` disables the file layer
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
        }
    }
}

/// Map a level name to a [`Level`], defaulting to INFO.
pub fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Install the global subscriber. Fails if one is already installed or the
/// log file cannot be opened.
pub fn init_logging(options: &LoggingOptions) -> Result<()> {
    let mut layers: Vec<BoxedLayer> = vec![console_layer(options)];
    if let Some(path) = &options.log_file {
        layers.push(file_layer(path)?);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to install tracing subscriber")
}

fn console_layer(options: &LoggingOptions) -> BoxedLayer {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(parse_level(&options.level).as_str().to_lowercase()));

    if options.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_filter(filter).boxed()
    }
}

fn file_layer(path: &Path) -> Result<BoxedLayer> {
    let appender = BasicRollingFileAppender::new(
        path,
        RollingConditionBasic::new().max_size(LOG_FILE_MAX_BYTES),
        LOG_FILE_ARCHIVES,
    )
    .with_context(|| format!("Failed to open log file {}", path.display()))?;

    Ok(fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(appender))
        .with_filter(LevelFilter::DEBUG)
        .boxed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_default_options() {
        let options = LoggingOptions::default();
        assert_eq!(options.level, "info");
        assert!(!options.json);
        assert_eq!(options.log_file.as_deref(), Some(Path::new(DEFAULT_LOG_FILE)));
    }

    #[test]
    fn test_file_layer_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let layer = file_layer(&path).unwrap();

        let subscriber = tracing_subscriber::registry().with(vec![layer]);
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(path = "a.tif", "Converting to PNG");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Converting to PNG"));
        assert!(contents.contains("DEBUG"));
    }
}
