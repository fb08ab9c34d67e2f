use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_FILE_NAME: &str = "scramble.log";

/// Install a subscriber that writes to `<log_dir>/scramble.log`.
///
/// The terminal is owned by the UI, so nothing is ever written to stdout or
/// stderr. Filtering follows `RUST_LOG` and defaults to `info`. Keep the
/// returned guard alive for as long as events should be flushed.
pub fn setup_logging(log_dir: &Path) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    // another subscriber may already be installed (tests); keep it
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init();

    tracing::info!("log file: {}", log_dir.join(LOG_FILE_NAME).display());

    Ok(guard)
}
