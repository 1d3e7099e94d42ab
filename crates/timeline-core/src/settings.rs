use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::categories::CategoryTable;
use crate::error::Result;
use crate::models::{CategoryFilter, Granularity};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Chart a playlist export's listening history by artist category
#[derive(Parser, Debug, Clone)]
#[command(
    name = "music-timeline",
    about = "Chart a playlist export's listening history by artist category",
    version
)]
pub struct Settings {
    /// Playlist export JSON file
    pub file: Option<PathBuf>,

    /// Playlist to show (defaults to the first playlist with items)
    #[arg(long)]
    pub playlist: Option<String>,

    /// Category filter: all, tv, internet, mainstream (full labels accepted)
    #[arg(long, default_value = "all", value_parser = parse_category_filter)]
    pub category: CategoryFilter,

    /// Group the timeline by year or by month
    #[arg(long, default_value = "year", value_parser = parse_granularity)]
    pub view: Granularity,

    /// Output mode
    #[arg(long, default_value = "tui", value_parser = ["tui", "json"])]
    pub output: String,

    /// Category table JSON file (defaults to ~/.music-timeline/categories.json when present)
    #[arg(long)]
    pub categories: Option<PathBuf>,

    /// Print the active category table as JSON and exit
    #[arg(long)]
    pub dump_categories: bool,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved preferences
    #[arg(long)]
    pub clear: bool,
}

fn parse_category_filter(s: &str) -> std::result::Result<CategoryFilter, String> {
    s.parse().map_err(|e: crate::error::TimelineError| e.to_string())
}

fn parse_granularity(s: &str) -> std::result::Result<Granularity, String> {
    s.parse().map_err(|e: crate::error::TimelineError| e.to_string())
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Display preferences saved to `~/.music-timeline/last_used.json`.
///
/// Only view preferences are kept; uploaded playlist data never is.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LastUsedParams {
    /// Return the default path to the persisted preferences file.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".music-timeline").join("last_used.json")
    }

    /// Load persisted params from an explicit path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load_from(path: &Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &Path) -> std::result::Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used preferences where no
    /// explicit CLI value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation. Accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(args: Vec<std::ffi::OsString>, config_path: &Path) -> Self {
        let matches = Settings::command().get_matches_from(args.clone());
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            if let Err(e) = LastUsedParams::clear_at(config_path) {
                tracing::warn!("Failed to clear saved preferences: {}", e);
            }
            return Self::resolve_overrides(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // CLI always wins; unparseable persisted values are ignored.
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "view") {
            if let Some(v) = last.view.and_then(|v| v.parse().ok()) {
                settings.view = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "category") {
            if let Some(v) = last.category.and_then(|v| v.parse().ok()) {
                settings.category = v;
            }
        }

        settings = Self::resolve_overrides(settings);

        if let Err(e) = LastUsedParams::from(&settings).save_to(config_path) {
            tracing::warn!("Failed to save preferences: {}", e);
        }

        settings
    }

    /// Apply the `--debug` flag.
    fn resolve_overrides(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// `true` when results should be printed as JSON instead of opening the TUI.
    pub fn json_output(&self) -> bool {
        self.output == "json"
    }

    /// Resolve the category table: `--categories` when given, otherwise the
    /// user table under `~/.music-timeline/` when it exists, otherwise the
    /// built-in table.
    pub fn category_table(&self) -> Result<CategoryTable> {
        self.category_table_in(&CategoryTable::default_path())
    }

    /// Same as [`Self::category_table`] with an explicit default path.
    pub fn category_table_in(&self, default_path: &Path) -> Result<CategoryTable> {
        if let Some(ref path) = self.categories {
            return CategoryTable::load_from(path);
        }
        if default_path.exists() {
            tracing::info!("Using category table {}", default_path.display());
            return CategoryTable::load_from(default_path);
        }
        Ok(CategoryTable::default())
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            view: Some(s.view.label().to_string()),
            category: Some(s.category.slug().to_string()),
        }
    }
}

/// Returns `true` when `name` was supplied explicitly on the command line.
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
