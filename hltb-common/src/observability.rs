//! Logging set-up shared by the service binary and the integration tests.
//!
//! Events go to a daily-rolling file under the resolved log directory and,
//! unless disabled, to stderr as well. [`init_logging`] installs the global
//! subscriber once; later calls return the first call's log file path.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

const LOG_DIR_ENV: &str = "HLTB_LOG_DIR";

/// Line encoding for both sinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Used as the log file stem and the default directory name.
    pub app_name: &'static str,
    /// Wins over `HLTB_LOG_DIR` and `~/.local/share/<app_name>`.
    pub log_dir: Option<PathBuf>,
    pub emit_stderr: bool,
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is unset, e.g. `"info,hltb=debug"`.
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "hltb",
            log_dir: None,
            emit_stderr: true,
            format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

/// Install the global subscriber and return today's log file path.
pub fn init_logging(config: LogConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = resolve_log_dir(config.app_name, config.log_dir.as_deref());
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let stem = format!("{}.log", config.app_name);
    let path = dir.join(format!("{stem}.{}", Local::now().format("%Y-%m-%d")));

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, &stem));
    let _ = LOG_GUARD.set(guard);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let file_layer = match config.format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    };
    let stderr_layer = config.emit_stderr.then(|| match config.format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(path.clone());
    Ok(path)
}

fn resolve_log_dir(app_name: &str, explicit: Option<&Path>) -> PathBuf {
    let configured = explicit
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from));
    match configured {
        Some(dir) => expand_home(&dir),
        None => home_dir()
            .map(|home| home.join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(app_name),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = resolve_log_dir("hltb", Some(tmp.path()));
        assert_eq!(dir, tmp.path());
    }

    #[test]
    fn tilde_is_expanded_against_home() {
        if let Ok(home) = std::env::var("HOME") {
            let dir = expand_home(Path::new("~/logs/hltb"));
            assert_eq!(dir, PathBuf::from(home).join("logs/hltb"));
        }
    }

    #[test]
    fn default_dir_ends_with_app_name() {
        if std::env::var_os(LOG_DIR_ENV).is_none() {
            assert!(resolve_log_dir("hltb-x", None).ends_with("hltb-x"));
        }
    }

    #[test]
    fn relative_paths_are_left_alone() {
        assert_eq!(expand_home(Path::new("logs")), PathBuf::from("logs"));
    }
}
