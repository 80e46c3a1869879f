//! Logging Infrastructure
//!
//! Structured logging setup shared by every binary. Filtering comes
//! from `RUST_LOG` (falling back to the caller's default directive),
//! output is either human-readable or JSON, and an optional directory
//! receives a daily rolling file instead of stdout.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Logger options, usually read from the environment
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub default_filter: String,
    /// Emit JSON lines instead of the pretty format
    pub json: bool,
    /// Write to a daily rolling file in this directory
    pub log_dir: Option<String>,
    /// File prefix for the rolling file
    pub file_prefix: String,
}

impl LogConfig {
    /// Read `LOG_FORMAT` and `LOG_DIR` from the environment
    pub fn from_env(service: &str) -> Self {
        let crate_target = service.replace('-', "_");
        Self {
            default_filter: format!("{crate_target}=info,resource_server=info,gateway=info,tower_http=info,http_access=info"),
            json: std::env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            log_dir: crate::util::env_string("LOG_DIR"),
            file_prefix: service.to_string(),
        }
    }
}

/// Initialize the global subscriber.
///
/// Returns the appender guard when logging to a file; it must be held
/// for the lifetime of the process or buffered lines are lost.
pub fn init_logger(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if let Some(dir) = config.log_dir.as_deref() {
        let log_path = Path::new(dir);
        if std::fs::create_dir_all(log_path).is_ok() {
            let file_appender = tracing_appender::rolling::daily(log_path, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let builder = builder.with_writer(writer).with_ansi(false);
            let result = if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            };
            if result.is_err() {
                eprintln!("logger already initialized");
            }
            return Some(guard);
        }
        eprintln!("cannot create log directory {dir}, logging to stdout");
    }

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        eprintln!("logger already initialized");
    }
    None
}
