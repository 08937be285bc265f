//! Logging setup

use std::path::Path;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "hr_api=info,tower_http=info";

/// Initialize the global subscriber.
///
/// `RUST_LOG` overrides the default filter. When `log_dir` names an existing
/// directory, output goes to a daily rotating `hr-api` file there instead of
/// stdout.
pub fn init_logger(log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .with_target(false);

    if let Some(dir) = log_dir {
        if Path::new(dir).is_dir() {
            let file_appender = tracing_appender::rolling::daily(dir, "hr-api");
            subscriber.with_ansi(false).with_writer(file_appender).init();
            return;
        }
        subscriber.init();
        tracing::warn!(dir = %dir, "LOG_DIR is not a directory, logging to stdout");
        return;
    }

    subscriber.init();
}
