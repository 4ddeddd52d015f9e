// src/logging.rs
use crate::config::LogConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// One-shot runs: human-readable lines on stderr, stdout stays clean for the report.
    Stderr,
    /// The TUI draws on the terminal, so only the rolling file is written.
    FileOnly,
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
/// Keep the returned guard alive until exit or buffered lines are lost.
/// Fails if a global subscriber is already installed.
pub fn init(config: &LogConfig, target: LogTarget) -> Result<Option<WorkerGuard>, TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (file_layer, guard) = match &config.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "the_shield.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = match target {
        LogTarget::Stderr => Some(fmt::layer().with_writer(std::io::stderr).with_target(false)),
        LogTarget::FileOnly => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_reports_the_installed_subscriber() {
        let config = LogConfig::default();
        // Another test may have installed one already; either way the next call must fail.
        let _ = init(&config, LogTarget::FileOnly);
        assert!(init(&config, LogTarget::FileOnly).is_err());
    }
}
