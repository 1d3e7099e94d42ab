use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the `~/.music-timeline/` hierarchy exists and return its root.
///
/// Creates the following directories if absent:
/// - `~/.music-timeline/` (preferences and the user category table)
/// - `~/.music-timeline/logs/`
pub fn ensure_directories() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let app_dir = home.join(".music-timeline");
    std::fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

/// Where log output goes.
///
/// An explicit `--log-file` always wins. While the TUI owns the terminal,
/// logs go to `<app_dir>/logs/music-timeline.log` so they never land on the
/// dashboard; otherwise `None` selects stderr.
pub fn resolve_log_file(explicit: Option<&Path>, tui: bool, app_dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if tui => Some(app_dir.join("logs").join("music-timeline.log")),
        None => None,
    }
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` value to an [`EnvFilter`] directive.
///
/// Unknown values pass through unchanged so `RUST_LOG`-style directives such
/// as `timeline_data=debug` also work.
pub fn filter_directive(log_level: &str) -> String {
    let upper = log_level.to_uppercase();
    match upper.as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Writes to stderr, or appends to `log_file` without ANSI colours when one
/// is given. Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(filter_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        None => {
            let layer = fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

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

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        let dir = result.expect("ensure_directories should succeed");
        assert_eq!(dir, tmp.path().join(".music-timeline"));
        assert!(dir.is_dir(), ".music-timeline dir must exist");
        assert!(dir.join("logs").is_dir(), "logs subdir must exist");
    }

    #[test]
    fn test_filter_directive_maps_level_names() {
        assert_eq!(filter_directive("DEBUG"), "debug");
        assert_eq!(filter_directive("critical"), "error");
        assert_eq!(filter_directive("CRITICAL"), "error");
        assert_eq!(filter_directive("INFO"), "info");
        assert_eq!(filter_directive("WARNING"), "warn");
        assert_eq!(filter_directive("ERROR"), "error");
        assert_eq!(filter_directive("timeline_data=trace"), "timeline_data=trace");
    }

    #[test]
    fn test_resolve_log_file_prefers_explicit_path() {
        let app_dir = Path::new("/home/u/.music-timeline");
        let explicit = Path::new("/tmp/timeline.log");
        assert_eq!(
            resolve_log_file(Some(explicit), true, app_dir),
            Some(explicit.to_path_buf())
        );
        assert_eq!(
            resolve_log_file(Some(explicit), false, app_dir),
            Some(explicit.to_path_buf())
        );
    }

    #[test]
    fn test_resolve_log_file_keeps_tui_logs_off_screen() {
        let app_dir = Path::new("/home/u/.music-timeline");
        assert_eq!(
            resolve_log_file(None, true, app_dir),
            Some(app_dir.join("logs").join("music-timeline.log"))
        );
        assert_eq!(resolve_log_file(None, false, app_dir), None);
    }
}
