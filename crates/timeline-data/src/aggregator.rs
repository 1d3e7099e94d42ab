//! Timeline aggregation: classify, filter, group by period, rank artists.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use timeline_core::categories::CategoryTable;
use timeline_core::models::{
    CategoryCounts, CategoryFilter, EnrichedSong, Granularity, PlaylistExport, PlaylistItem,
};

/// Number of entries in [`Stats::top_artists`].
pub const TOP_ARTISTS: usize = 5;

// ── Result types ──────────────────────────────────────────────────────────────

/// Per-category counts for one period; serializes flat as
/// `{ "period": "2015", "TV Soundtrack": 1, ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineRow {
    pub period: String,
    #[serde(flatten)]
    pub counts: CategoryCounts,
}

impl TimelineRow {
    fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            counts: CategoryCounts::default(),
        }
    }
}

/// An artist and how many filtered songs they appear on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistCount {
    pub artist: String,
    pub count: usize,
}

/// Summary statistics over the filtered songs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub by_category: CategoryCounts,
    pub top_artists: Vec<ArtistCount>,
}

/// Everything the presentation layer needs for one view.
///
/// The empty value is fully populated (zeros, empty lists), never absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    pub timeline_data: Vec<TimelineRow>,
    pub stats: Stats,
    pub songs: Vec<EnrichedSong>,
}

impl AggregationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Largest per-period total, used to scale chart bars.
    pub fn max_period_total(&self) -> usize {
        self.timeline_data
            .iter()
            .map(|row| row.counts.total())
            .max()
            .unwrap_or(0)
    }
}

// ── TimelineAggregator ────────────────────────────────────────────────────────

/// Stateless aggregation over a borrowed category table.
#[derive(Debug, Clone, Copy)]
pub struct TimelineAggregator<'a> {
    table: &'a CategoryTable,
}

impl Default for TimelineAggregator<'static> {
    fn default() -> Self {
        Self::new(CategoryTable::builtin())
    }
}

impl<'a> TimelineAggregator<'a> {
    pub fn new(table: &'a CategoryTable) -> Self {
        Self { table }
    }

    /// Build the timeline and stats for `playlist_name`.
    ///
    /// An unknown playlist, or one without items, yields
    /// [`AggregationResult::empty`]. Never mutates `export`.
    pub fn aggregate(
        &self,
        export: &PlaylistExport,
        playlist_name: &str,
        filter: CategoryFilter,
        granularity: Granularity,
    ) -> AggregationResult {
        let Some(playlist) = export.playlist(playlist_name).filter(|p| p.has_items()) else {
            return AggregationResult::empty();
        };

        let songs: Vec<EnrichedSong> = self
            .enrich(&playlist.items)
            .into_iter()
            .filter(|song| filter.matches(song.category))
            .collect();

        let timeline_data = Self::group_by_period(&songs, granularity);
        let stats = Self::calculate_stats(&songs);

        tracing::debug!(
            playlist = playlist_name,
            filter = filter.label(),
            view = granularity.label(),
            songs = songs.len(),
            periods = timeline_data.len(),
            "timeline aggregated"
        );

        AggregationResult {
            timeline_data,
            stats,
            songs,
        }
    }

    /// Enrich every usable item (track and non-empty added date present).
    pub fn enrich(&self, items: &[PlaylistItem]) -> Vec<EnrichedSong> {
        items
            .iter()
            .filter_map(PlaylistItem::usable)
            .map(|(track, added)| {
                EnrichedSong::new(track, added, self.table.categorize(&track.artist_name))
            })
            .collect()
    }

    /// Count songs per category for each period, sorted by period key.
    ///
    /// Keys are compared as strings, which is chronological for `YYYY` and
    /// `YYYY-MM`.
    pub fn group_by_period(songs: &[EnrichedSong], granularity: Granularity) -> Vec<TimelineRow> {
        let mut map: BTreeMap<&str, TimelineRow> = BTreeMap::new();

        for song in songs {
            let key = granularity.period_of(song);
            map.entry(key)
                .or_insert_with(|| TimelineRow::new(key))
                .counts
                .increment(song.category);
        }

        map.into_values().collect()
    }

    /// Total, per-category counts and top artists over `songs`.
    pub fn calculate_stats(songs: &[EnrichedSong]) -> Stats {
        let mut by_category = CategoryCounts::default();
        for song in songs {
            by_category.increment(song.category);
        }

        Stats {
            total: songs.len(),
            by_category,
            top_artists: Self::top_artists(songs, TOP_ARTISTS),
        }
    }

    /// The `n` most frequent artists. Equal counts keep first-seen order.
    pub fn top_artists(songs: &[EnrichedSong], n: usize) -> Vec<ArtistCount> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut ranked: Vec<ArtistCount> = Vec::new();

        for song in songs {
            let artist = song.artist_name();
            match index.get(artist) {
                Some(&i) => ranked[i].count += 1,
                None => {
                    index.insert(artist, ranked.len());
                    ranked.push(ArtistCount {
                        artist: artist.to_string(),
                        count: 1,
                    });
                }
            }
        }

        // `sort_by` is stable, so ties stay in insertion order.
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(n);
        ranked
    }
}

/// Aggregate with the built-in category table.
pub fn aggregate(
    export: &PlaylistExport,
    playlist_name: &str,
    filter: CategoryFilter,
    granularity: Granularity,
) -> AggregationResult {
    TimelineAggregator::default().aggregate(export, playlist_name, filter, granularity)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
