use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimelineError;

// ── CategoryLabel ──────────────────────────────────────────────────────────────

/// Classification bucket applied to every track based on its artist name.
///
/// Declaration order is the display and stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "TV Soundtrack")]
    TvSoundtrack,
    #[serde(rename = "YouTube/Internet")]
    YoutubeInternet,
    /// Catch-all for artists that match no curated list.
    #[serde(rename = "Mainstream")]
    Mainstream,
}

impl CategoryLabel {
    /// Every label, in display order.
    pub const ALL: [CategoryLabel; 3] = [
        CategoryLabel::TvSoundtrack,
        CategoryLabel::YoutubeInternet,
        CategoryLabel::Mainstream,
    ];

    /// Human-readable label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            CategoryLabel::TvSoundtrack => "TV Soundtrack",
            CategoryLabel::YoutubeInternet => "YouTube/Internet",
            CategoryLabel::Mainstream => "Mainstream",
        }
    }

    /// Short command-line spelling.
    pub fn slug(self) -> &'static str {
        match self {
            CategoryLabel::TvSoundtrack => "tv",
            CategoryLabel::YoutubeInternet => "internet",
            CategoryLabel::Mainstream => "mainstream",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryLabel {
    type Err = TimelineError;

    /// Accepts the full label (`"TV Soundtrack"`) or a short slug (`"tv"`),
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "tv soundtrack" | "tv-soundtrack" | "tv" => Ok(CategoryLabel::TvSoundtrack),
            "youtube/internet" | "youtube-internet" | "youtube" | "internet" => {
                Ok(CategoryLabel::YoutubeInternet)
            }
            "mainstream" => Ok(CategoryLabel::Mainstream),
            _ => Err(TimelineError::Config(format!("unknown category: {}", s))),
        }
    }
}

// ── CategoryFilter ─────────────────────────────────────────────────────────────

/// Which songs the aggregation keeps: everything, or a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryLabel),
}

impl CategoryFilter {
    /// Returns `true` when a song of `category` passes the filter.
    pub fn matches(self, category: CategoryLabel) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => label == category,
        }
    }

    /// Cycle `All → TV Soundtrack → YouTube/Internet → Mainstream → All`.
    pub fn next(self) -> Self {
        match self {
            CategoryFilter::All => CategoryFilter::Only(CategoryLabel::TvSoundtrack),
            CategoryFilter::Only(CategoryLabel::TvSoundtrack) => {
                CategoryFilter::Only(CategoryLabel::YoutubeInternet)
            }
            CategoryFilter::Only(CategoryLabel::YoutubeInternet) => {
                CategoryFilter::Only(CategoryLabel::Mainstream)
            }
            CategoryFilter::Only(CategoryLabel::Mainstream) => CategoryFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(label) => label.label(),
        }
    }

    /// Short command-line spelling, used when persisting preferences.
    pub fn slug(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(label) => label.slug(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<CategoryLabel>().map(CategoryFilter::Only)
    }
}

// ── Granularity ────────────────────────────────────────────────────────────────

/// Time-bucketing unit for the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Year,
    Month,
}

impl Granularity {
    /// The period key of `song` at this granularity.
    pub fn period_of(self, song: &EnrichedSong) -> &str {
        match self {
            Granularity::Year => &song.year,
            Granularity::Month => &song.month,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Granularity::Year => Granularity::Month,
            Granularity::Month => Granularity::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "yearly" => Ok(Granularity::Year),
            "month" | "monthly" => Ok(Granularity::Month),
            _ => Err(TimelineError::Config(format!("unknown view: {}", s))),
        }
    }
}

// ── Export document ────────────────────────────────────────────────────────────

/// Root of an uploaded playlist export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlaylistExport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub playlists: Vec<Playlist>,
}

impl PlaylistExport {
    /// Find a playlist by exact name.
    pub fn playlist(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }
}

/// A saved playlist and its track history.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Playlist {
    /// Selection key; assumed unique among playlists with items.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Absent, `null` and `[]` all decode to an empty list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<PlaylistItem>,
}

impl Playlist {
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }
}

/// One entry of a playlist.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track: Option<Track>,
    /// Expected to start with `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
}

impl PlaylistItem {
    /// The track and added date, when both are present and the date is not
    /// empty. Items without them carry no usable data.
    pub fn usable(&self) -> Option<(&Track, &str)> {
        let track = self.track.as_ref()?;
        let added = self.added_date.as_deref().filter(|d| !d.is_empty())?;
        Some((track, added))
    }
}

/// Track metadata. Fields other than `artistName` are carried through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_uri: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Track {
    pub fn new(artist_name: impl Into<String>) -> Self {
        Self {
            artist_name: artist_name.into(),
            ..Default::default()
        }
    }
}

// ── EnrichedSong ───────────────────────────────────────────────────────────────

/// A track merged with its added date and the derived category and periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedSong {
    #[serde(flatten)]
    pub track: Track,
    pub added_date: String,
    pub category: CategoryLabel,
    /// First 4 characters of `added_date`.
    pub year: String,
    /// First 7 characters of `added_date` (`YYYY-MM`).
    pub month: String,
}

/// Keys an [`EnrichedSong`] writes itself; same-named unknown track fields
/// are dropped so the derived values win.
const DERIVED_KEYS: [&str; 4] = ["addedDate", "category", "year", "month"];

impl EnrichedSong {
    pub fn new(track: &Track, added_date: &str, category: CategoryLabel) -> Self {
        let mut track = track.clone();
        for key in DERIVED_KEYS {
            track.extra.remove(key);
        }
        Self {
            track,
            added_date: added_date.to_string(),
            category,
            year: char_prefix(added_date, 4).to_string(),
            month: char_prefix(added_date, 7).to_string(),
        }
    }

    pub fn artist_name(&self) -> &str {
        &self.track.artist_name
    }
}

// ── CategoryCounts ─────────────────────────────────────────────────────────────

/// A count for each of the three labels. All three are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryCounts {
    #[serde(rename = "TV Soundtrack")]
    pub tv_soundtrack: usize,
    #[serde(rename = "YouTube/Internet")]
    pub youtube_internet: usize,
    #[serde(rename = "Mainstream")]
    pub mainstream: usize,
}

impl CategoryCounts {
    pub fn get(&self, label: CategoryLabel) -> usize {
        match label {
            CategoryLabel::TvSoundtrack => self.tv_soundtrack,
            CategoryLabel::YoutubeInternet => self.youtube_internet,
            CategoryLabel::Mainstream => self.mainstream,
        }
    }

    pub fn increment(&mut self, label: CategoryLabel) {
        match label {
            CategoryLabel::TvSoundtrack => self.tv_soundtrack += 1,
            CategoryLabel::YoutubeInternet => self.youtube_internet += 1,
            CategoryLabel::Mainstream => self.mainstream += 1,
        }
    }

    /// Sum across all three labels.
    pub fn total(&self) -> usize {
        self.tv_soundtrack + self.youtube_internet + self.mainstream
    }

    /// `(label, count)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (CategoryLabel, usize)> + '_ {
        CategoryLabel::ALL.into_iter().map(move |l| (l, self.get(l)))
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────────

/// The first `n` characters of `s`, or all of `s` when it is shorter.
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Decode `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ── Tests ──────────────────────────────────────────────────────────────────────
