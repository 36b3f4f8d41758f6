use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use waka_core::settings::APP_DIR_NAME;

/// File name of the default log inside `~/.waka-dashboard/logs/`.
pub const LOG_FILE_NAME: &str = "waka-dashboard.log";

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the `~/.waka-dashboard/` directory hierarchy exists and return the
/// application directory.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.waka-dashboard/`
/// - `~/.waka-dashboard/logs/`
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(APP_DIR_NAME);
    std::fs::create_dir_all(app_dir.join("logs"))
        .with_context(|| format!("cannot create {}", app_dir.display()))?;
    Ok(app_dir)
}

/// Default log file inside `app_dir`.
pub fn default_log_path(app_dir: &Path) -> PathBuf {
    app_dir.join("logs").join(LOG_FILE_NAME)
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to a `tracing` filter directive.
///
/// Unknown names pass through unchanged so `RUST_LOG`-style directives work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// With `log_file` set, output is appended to that file without ANSI colours;
/// otherwise it goes to stderr.  The interactive views always pass a file so
/// log lines never land on the alternate screen.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, stderr_layer) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), None)
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr);
            (None, Some(layer))
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .context("tracing subscriber already initialised")?;

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let app_dir = result.expect("ensure_directories should succeed");
        assert_eq!(app_dir, tmp.path().join(".waka-dashboard"));
        assert!(app_dir.is_dir(), ".waka-dashboard dir must exist");
        assert!(app_dir.join("logs").is_dir(), "logs subdir must exist");
    }

    #[test]
    fn test_default_log_path() {
        let path = default_log_path(Path::new("/home/dev/.waka-dashboard"));
        assert_eq!(
            path,
            PathBuf::from("/home/dev/.waka-dashboard/logs/waka-dashboard.log")
        );
    }

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("info"), "info");
        assert_eq!(level_directive("WARNING"), "warn");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("waka_data=trace"), "waka_data=trace");
    }

    #[test]
    fn test_setup_logging_writes_to_file() {
        let tmp = TempDir::new().expect("tempdir");
        let log = tmp.path().join("nested").join("test.log");

        setup_logging("INFO", Some(&log)).expect("first init succeeds");
        tracing::info!("hello from the dashboard");

        let contents = std::fs::read_to_string(&log).expect("log file exists");
        assert!(contents.contains("hello from the dashboard"), "got: {contents}");

        // A second global subscriber is rejected.
        assert!(setup_logging("INFO", None).is_err());
    }
}
