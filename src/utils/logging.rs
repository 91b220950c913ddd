use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_appender::non_blocking::WorkerGuard;
use anyhow::Result;

/// Initializes the logging system for the bridge
///
/// This function sets up the logging subscriber and layers based on the provided configuration
/// It supports logging to both the console and a daily rolling log file (if a directory is provided)
/// The log files are named `plc-shadow-bridge.log.{date}` and live in the specified directory
/// The logging level is taken from the environment variable `RUST_LOG` or falls back to `default_level`
/// `hyper` and `reqwest` are held at "warn" to keep per-request noise out of the log
/// Records emitted through the `log` facade are forwarded to the same subscriber
///
/// # Arguments
///
/// * `default_level`: The filter directive used when `RUST_LOG` is not set (e.g. "info")
/// * `log_file_path`: An optional `PathBuf` specifying the directory where the log file should be created
///
/// # Returns
///
/// * `Ok(Some(WorkerGuard))`: If logging is initialized successfully with a file appender, the `WorkerGuard` is returned
/// * `Ok(None)`: If logging is initialized successfully without a file appender (console only)
/// * `Err(anyhow::Error)`: If there's an error initializing the logging system
pub fn init_logger(default_level: &str, log_file_path: Option<PathBuf>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},hyper=warn,reqwest=warn", default_level)))?;

    let format = fmt::format()
        .with_timer(fmt::time::LocalTime::rfc_3339())
        .compact()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if let Some(path) = log_file_path {
        std::fs::create_dir_all(&path)?;

        let file_appender = RollingFileAppender::new(Rotation::DAILY, &path, "plc-shadow-bridge.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = fmt::Layer::default()
            .event_format(format.clone())
            .with_writer(non_blocking);

        let console_layer = fmt::Layer::default()
            .event_format(format.with_ansi(true))
            .with_writer(std::io::stdout);

        subscriber.with(file_layer).with(console_layer).try_init()?;

        tracing::info!("Logging initialized successfully in {}", path.display());
        Ok(Some(guard))
    } else {
        let console_layer = fmt::Layer::default()
            .event_format(format.with_ansi(true))
            .with_writer(std::io::stdout);

        subscriber.with(console_layer).try_init()?;

        tracing::info!("Logging initialized successfully (console only)");
        Ok(None)
    }
}
