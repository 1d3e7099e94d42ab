use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the music timeline crates.
#[derive(Error, Debug)]
pub enum TimelineError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The uploaded playlist export is not valid JSON or has the wrong shape.
    #[error("Error parsing JSON file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A category table file names a label outside the fixed set, or cannot
    /// be decoded.
    #[error("Invalid category table: {0}")]
    CategoryTable(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimelineError {
    /// `true` for errors caused by the content of an uploaded file rather
    /// than by the environment.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, TimelineError::Parse(_))
    }
}

/// Convenience alias used throughout the timeline crates.
pub type Result<T> = std::result::Result<T, TimelineError>;
