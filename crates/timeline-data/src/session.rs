//! View state over a loaded export, with the last result memoized.
//!
//! [`TimelineSession`] holds the four inputs of the aggregation (export,
//! selected playlist, category filter, granularity) and recomputes the
//! [`AggregationResult`] only when one of them changes.

use timeline_core::categories::CategoryTable;
use timeline_core::error::Result;
use timeline_core::models::{CategoryFilter, Granularity, Playlist, PlaylistExport};

use crate::aggregator::{AggregationResult, TimelineAggregator};
use crate::reader;

/// Inputs a cached result was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    generation: u64,
    playlist: Option<String>,
    filter: CategoryFilter,
    granularity: Granularity,
}

/// Loaded data plus the user's current selection.
pub struct TimelineSession {
    table: CategoryTable,
    export: Option<PlaylistExport>,
    /// Bumped whenever a new export is adopted.
    generation: u64,
    selected_playlist: Option<String>,
    filter: CategoryFilter,
    granularity: Granularity,
    memo: Option<(MemoKey, AggregationResult)>,
    empty: AggregationResult,
}

impl Default for TimelineSession {
    fn default() -> Self {
        Self::new(CategoryTable::default())
    }
}

impl TimelineSession {
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table,
            export: None,
            generation: 0,
            selected_playlist: None,
            filter: CategoryFilter::All,
            granularity: Granularity::Year,
            memo: None,
            empty: AggregationResult::empty(),
        }
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Parse `raw_text` and adopt it.
    ///
    /// On success the default playlist is selected; if the new export has no
    /// playlist with items the previous selection is kept. On a parse error
    /// nothing changes and the error is returned.
    pub fn upload(&mut self, raw_text: &str) -> Result<()> {
        let export = reader::load(raw_text)?;
        self.adopt(export);
        Ok(())
    }

    /// Adopt an already-parsed export (see [`Self::upload`]).
    pub fn adopt(&mut self, export: PlaylistExport) {
        if let Some(name) = reader::default_playlist(&export) {
            self.selected_playlist = Some(name.to_string());
        }
        tracing::info!(
            playlists = export.playlists.len(),
            selected = self.selected_playlist.as_deref().unwrap_or("-"),
            "playlist export adopted"
        );
        self.export = Some(export);
        self.generation += 1;
    }

    pub fn has_data(&self) -> bool {
        self.export.is_some()
    }

    pub fn export(&self) -> Option<&PlaylistExport> {
        self.export.as_ref()
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn selected_playlist(&self) -> Option<&str> {
        self.selected_playlist.as_deref()
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Playlists with items, in document order.
    pub fn playlist_options(&self) -> Vec<&Playlist> {
        self.export
            .as_ref()
            .map(reader::playlist_options)
            .unwrap_or_default()
    }

    /// Select a playlist by name. Any name is accepted; an unknown one
    /// aggregates to the empty result.
    pub fn select_playlist(&mut self, name: impl Into<String>) {
        self.selected_playlist = Some(name.into());
    }

    /// Move to the next playlist with items, wrapping around.
    pub fn next_playlist(&mut self) {
        let next = {
            let options = self.playlist_options();
            if options.is_empty() {
                return;
            }
            let current = self
                .selected_playlist
                .as_deref()
                .and_then(|sel| options.iter().position(|p| p.name == sel));
            let idx = match current {
                Some(i) => (i + 1) % options.len(),
                None => 0,
            };
            options[idx].name.clone()
        };
        self.selected_playlist = Some(next);
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.granularity = granularity;
    }

    pub fn toggle_granularity(&mut self) {
        self.granularity = self.granularity.toggle();
    }

    // ── Result ────────────────────────────────────────────────────────────────

    /// The aggregation for the current inputs, recomputed only when they
    /// differ from the last call.
    pub fn result(&mut self) -> &AggregationResult {
        let (Some(export), Some(playlist)) = (self.export.as_ref(), self.selected_playlist.as_deref())
        else {
            return &self.empty;
        };

        let key = MemoKey {
            generation: self.generation,
            playlist: Some(playlist.to_string()),
            filter: self.filter,
            granularity: self.granularity,
        };

        let stale = !matches!(&self.memo, Some((cached, _)) if *cached == key);
        if stale {
            tracing::debug!("recomputing timeline");
            let result = TimelineAggregator::new(&self.table).aggregate(
                export,
                playlist,
                self.filter,
                self.granularity,
            );
            self.memo = Some((key, result));
        }

        match &self.memo {
            Some((_, result)) => result,
            None => &self.empty,
        }
    }

    /// `true` when the next [`Self::result`] call will reuse the cache.
    pub fn is_cached(&self) -> bool {
        match (&self.memo, self.selected_playlist.as_ref()) {
            (Some((key, _)), Some(playlist)) => {
                key.generation == self.generation
                    && key.playlist.as_ref() == Some(playlist)
                    && key.filter == self.filter
                    && key.granularity == self.granularity
            }
            _ => false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
