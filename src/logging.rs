use anyhow::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "STATUS_CONTEXT_LOG";

/// File name used inside the log directory
pub const LOG_FILE: &str = "status-context.log";

/// Initialize the logging system
///
/// With a log directory, logs go to a daily rotated file there. Without one
/// they go to stderr. Stdout is never written: it carries the hook result.
pub fn init_logging(log_dir: Option<&Path>) -> Result<()> {
    let env_filter = build_filter();

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE);

            let file_layer = fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .try_init()?;

            tracing::debug!("Log files location: {}", dir.join(LOG_FILE).display());
        }
        None => {
            let stderr_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .try_init()?;
        }
    }

    Ok(())
}

/// `STATUS_CONTEXT_LOG`, then `RUST_LOG`, then `warn`
fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}
