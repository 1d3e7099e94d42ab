//! Artist classification driven by an ordered, editable category table.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::models::CategoryLabel;

/// Curated artist-name substrings for the TV soundtrack bucket.
const TV_SOUNDTRACK_ARTISTS: &[&str] = &[
    "Big Time Rush",
    "Victorious Cast",
    "Drake Bell",
    "Selena Gomez",
    "Olivia Holt",
    "Adam Hicks",
    "Demi Lovato",
    "Nick Jonas",
    "Christopher Wilde",
    "Aly & AJ",
    "iCarly & Victorious Casts",
    "Victoria Justice",
];

/// Curated artist-name substrings for the YouTube / internet bucket.
const INTERNET_ARTISTS: &[&str] = &["ImDontai", "Ski Mask The Slump God"];

/// One row of the table: a label and the artist-name substrings that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: CategoryLabel,
    #[serde(default)]
    pub artists: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: CategoryLabel, artists: &[&str]) -> Self {
        Self {
            label,
            artists: artists.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Case-sensitive substring match against any listed name.
    ///
    /// Containment rather than equality, so `"Drake Bell (feat. X)"` matches
    /// `"Drake Bell"`. An unrelated artist whose name contains a listed name
    /// matches as well.
    pub fn matches(&self, artist_name: &str) -> bool {
        self.artists
            .iter()
            .any(|a| !a.is_empty() && artist_name.contains(a.as_str()))
    }
}

/// Ordered category definitions. The first matching rule wins; no match
/// falls through to [`CategoryLabel::Mainstream`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(CategoryLabel::TvSoundtrack, TV_SOUNDTRACK_ARTISTS),
                CategoryRule::new(CategoryLabel::YoutubeInternet, INTERNET_ARTISTS),
                CategoryRule::new(CategoryLabel::Mainstream, &[]),
            ],
        }
    }
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// The built-in table, shared.
    pub fn builtin() -> &'static CategoryTable {
        static BUILTIN: OnceLock<CategoryTable> = OnceLock::new();
        BUILTIN.get_or_init(CategoryTable::default)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Classify `artist_name`. Total: every input yields exactly one label.
    pub fn categorize(&self, artist_name: &str) -> CategoryLabel {
        self.rules
            .iter()
            .find(|rule| rule.matches(artist_name))
            .map(|rule| rule.label)
            .unwrap_or(CategoryLabel::Mainstream)
    }

    /// Default location of a user-edited table: `~/.music-timeline/categories.json`.
    pub fn default_path() -> PathBuf {
        Self::default_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Table path rooted at `base_dir` (used for testing).
    pub fn default_path_in(base_dir: &Path) -> PathBuf {
        base_dir.join(".music-timeline").join("categories.json")
    }

    /// Load a table from a JSON array of `{ "label", "artists" }` objects.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| TimelineError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Decode a table from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        let table: CategoryTable = serde_json::from_str(content)
            .map_err(|e| TimelineError::CategoryTable(e.to_string()))?;
        tracing::debug!(rules = table.rules.len(), "category table loaded");
        Ok(table)
    }

    /// Write the table as pretty JSON, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Classify `artist_name` with the built-in table.
pub fn categorize(artist_name: &str) -> CategoryLabel {
    CategoryTable::builtin().categorize(artist_name)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_every_curated_tv_name_classifies_as_tv() {
        for name in TV_SOUNDTRACK_ARTISTS {
            assert_eq!(categorize(name), CategoryLabel::TvSoundtrack, "{name}");
        }
    }

    #[test]
    fn test_tv_substring_wins_regardless_of_surrounding_text() {
        assert_eq!(
            categorize("Big Time Rush (feat. Jordin Sparks)"),
            CategoryLabel::TvSoundtrack
        );
        assert_eq!(categorize("The Demi Lovato Experience"), CategoryLabel::TvSoundtrack);
    }

    #[test]
    fn test_internet_names() {
        assert_eq!(categorize("ImDontai"), CategoryLabel::YoutubeInternet);
        assert_eq!(
            categorize("Ski Mask The Slump God, XXXTENTACION"),
            CategoryLabel::YoutubeInternet
        );
    }

    #[test]
    fn test_unmatched_is_mainstream() {
        assert_eq!(categorize("Drake"), CategoryLabel::Mainstream);
        assert_eq!(categorize(""), CategoryLabel::Mainstream);
        assert_eq!(categorize("Taylor Swift"), CategoryLabel::Mainstream);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(categorize("big time rush"), CategoryLabel::Mainstream);
        assert_eq!(categorize("IMDONTAI"), CategoryLabel::Mainstream);
    }

    #[test]
    fn test_substring_false_positive_is_preserved() {
        assert_eq!(
            categorize("Selena Gomez Tribute Band"),
            CategoryLabel::TvSoundtrack
        );
    }

    #[test]
    fn test_first_rule_wins_when_several_match() {
        assert_eq!(
            categorize("Drake Bell & ImDontai"),
            CategoryLabel::TvSoundtrack
        );

        let reordered = CategoryTable::new(vec![
            CategoryRule::new(CategoryLabel::YoutubeInternet, &["ImDontai"]),
            CategoryRule::new(CategoryLabel::TvSoundtrack, &["Drake Bell"]),
        ]);
        assert_eq!(
            reordered.categorize("Drake Bell & ImDontai"),
            CategoryLabel::YoutubeInternet
        );
    }

    #[test]
    fn test_empty_listed_name_never_matches() {
        let table = CategoryTable::new(vec![CategoryRule::new(CategoryLabel::TvSoundtrack, &[""])]);
        assert_eq!(table.categorize("Anyone"), CategoryLabel::Mainstream);
    }

    #[test]
    fn test_table_json_round_trip_through_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = CategoryTable::default_path_in(tmp.path());

        CategoryTable::default().save_to(&path).expect("save");
        let loaded = CategoryTable::load_from(&path).expect("load");
        assert_eq!(loaded, CategoryTable::default());
    }

    #[test]
    fn test_from_json_custom_table() {
        let json = r#"[
            {"label": "YouTube/Internet", "artists": ["Lil Dicky"]},
            {"label": "Mainstream"}
        ]"#;
        let table = CategoryTable::from_json(json).unwrap();
        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.categorize("Lil Dicky"), CategoryLabel::YoutubeInternet);
        assert_eq!(table.categorize("Big Time Rush"), CategoryLabel::Mainstream);
    }

    #[test]
    fn test_from_json_unknown_label_is_error() {
        let json = r#"[{"label": "Jazz", "artists": ["Miles Davis"]}]"#;
        let err = CategoryTable::from_json(json).unwrap_err();
        assert!(matches!(err, TimelineError::CategoryTable(_)));
    }

    #[test]
    fn test_load_from_missing_file_is_file_read_error() {
        let tmp = TempDir::new().expect("tempdir");
        let err = CategoryTable::load_from(&tmp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TimelineError::FileRead { .. }));
    }
}
