//! Playlist export loading.
//!
//! Parses the uploaded JSON document into a [`PlaylistExport`] and picks the
//! playlist shown by default.

use std::path::Path;

use timeline_core::error::{Result, TimelineError};
use timeline_core::models::{Playlist, PlaylistExport};
use timeline_core::time_utils;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse raw export text.
///
/// Malformed JSON and well-formed JSON of the wrong shape (for example a
/// top-level array) both yield [`TimelineError::Parse`]. Nothing is returned
/// on failure, so callers never see partial state.
pub fn load(raw_text: &str) -> Result<PlaylistExport> {
    let export: PlaylistExport = serde_json::from_str(raw_text)?;

    let items: usize = export.playlists.iter().map(|p| p.items.len()).sum();
    let odd_dates = export
        .playlists
        .iter()
        .flat_map(|p| p.items.iter())
        .filter_map(|item| item.usable())
        .filter(|(_, added)| !time_utils::is_well_formed(added))
        .count();

    debug!(
        "Loaded export: {} playlists, {} items",
        export.playlists.len(),
        items
    );
    if odd_dates > 0 {
        debug!(
            "{} items have an addedDate without a YYYY-MM-DD prefix; grouping uses the raw prefix",
            odd_dates
        );
    }

    Ok(export)
}

/// Read `path` asynchronously and parse it with [`load`].
pub async fn read_export(path: &Path) -> Result<PlaylistExport> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TimelineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", raw.len(), path.display());
    load(&raw)
}

/// Name of the first playlist, in document order, that has at least one item.
pub fn default_playlist(export: &PlaylistExport) -> Option<&str> {
    export
        .playlists
        .iter()
        .find(|p| p.has_items())
        .map(|p| p.name.as_str())
}

/// Every playlist with at least one item, in document order.
pub fn playlist_options(export: &PlaylistExport) -> Vec<&Playlist> {
    export.playlists.iter().filter(|p| p.has_items()).collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
