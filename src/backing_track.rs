//! # Backing Track Search
//!
//! Builds video search queries for practice backing tracks from an
//! instrument, style, key and optional tempo, plus the preset table, recent
//! searches and favorites that sit around the search box.
//!
//! ```rust
//! use tonehouse::backing_track::{TrackInstrument, TrackRequest, TrackStyle};
//!
//! let request = TrackRequest::new(TrackInstrument::Guitar, TrackStyle::Blues, "A", Some(90))?;
//! assert_eq!(request.query(), "blues backing track in A 90 bpm no lead guitar");
//! # Ok::<(), tonehouse::TheoryError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TheoryError;

pub const MIN_TEMPO: u16 = 40;
pub const MAX_TEMPO: u16 = 240;

const SEARCH_BASE: &str = "https://www.youtube.com/results";
const MAX_RECENT: usize = 8;
const MAX_FAVORITES: usize = 20;

/// Keys offered for backing tracks. Flats are kept as written since they
/// appear verbatim in the query.
pub const KEYS: [&str; 34] = [
    "C", "Cm", "C#", "C#m", "Db", "Dbm", "D", "Dm", "D#", "D#m", "Eb", "Ebm", "E", "Em", "F",
    "Fm", "F#", "F#m", "Gb", "Gbm", "G", "Gm", "G#", "G#m", "Ab", "Abm", "A", "Am", "A#", "A#m",
    "Bb", "Bbm", "B", "Bm",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackInstrument {
    #[default]
    Guitar,
    Bass,
    Piano,
    Drums,
}

impl TrackInstrument {
    pub const ALL: [TrackInstrument; 4] = [
        TrackInstrument::Guitar,
        TrackInstrument::Bass,
        TrackInstrument::Piano,
        TrackInstrument::Drums,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrackInstrument::Guitar => "Guitar",
            TrackInstrument::Bass => "Bass",
            TrackInstrument::Piano => "Piano/Keys",
            TrackInstrument::Drums => "Drums",
        }
    }

    /// Search nudges for the instrument; only the first goes into a query.
    pub fn hints(self) -> &'static [&'static str] {
        match self {
            TrackInstrument::Guitar => &["no lead guitar", "rhythm"],
            TrackInstrument::Bass => &["bass backing track", "no bass"],
            TrackInstrument::Piano => &["piano backing track", "instrumental"],
            TrackInstrument::Drums => &["drumless", "practice"],
        }
    }
}

impl fmt::Display for TrackInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TrackInstrument {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guitar" => Ok(TrackInstrument::Guitar),
            "bass" => Ok(TrackInstrument::Bass),
            "piano" | "keys" | "piano/keys" => Ok(TrackInstrument::Piano),
            "drums" => Ok(TrackInstrument::Drums),
            _ => Err(TheoryError::UnknownInstrument(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackStyle {
    #[default]
    Blues,
    Rock,
    Funk,
    Jazz,
    Metal,
    Pop,
    Ballad,
    Acoustic,
}

impl TrackStyle {
    pub const ALL: [TrackStyle; 8] = [
        TrackStyle::Blues,
        TrackStyle::Rock,
        TrackStyle::Funk,
        TrackStyle::Jazz,
        TrackStyle::Metal,
        TrackStyle::Pop,
        TrackStyle::Ballad,
        TrackStyle::Acoustic,
    ];

    /// Lowercase form used in queries.
    pub fn value(self) -> &'static str {
        match self {
            TrackStyle::Blues => "blues",
            TrackStyle::Rock => "rock",
            TrackStyle::Funk => "funk",
            TrackStyle::Jazz => "jazz",
            TrackStyle::Metal => "metal",
            TrackStyle::Pop => "pop",
            TrackStyle::Ballad => "ballad",
            TrackStyle::Acoustic => "acoustic",
        }
    }
}

impl fmt::Display for TrackStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.value())
    }
}

impl FromStr for TrackStyle {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TrackStyle::ALL
            .into_iter()
            .find(|style| style.value() == lower)
            .ok_or_else(|| TheoryError::UnknownTrackStyle(s.to_string()))
    }
}

/// Look up a key in [`KEYS`], ignoring case; returns the listed spelling.
pub fn parse_key(key: &str) -> Result<&'static str, TheoryError> {
    let trimmed = key.trim();
    KEYS.iter()
        .copied()
        .find(|k| k.eq_ignore_ascii_case(trimmed))
        .ok_or_else(|| TheoryError::UnknownKey(key.to_string()))
}

/// Normalize free-form tempo input: round, then clamp to 40–240 BPM.
///
/// Empty or non-numeric input means "any tempo".
///
/// ```rust
/// use tonehouse::backing_track::normalize_tempo;
///
/// assert_eq!(normalize_tempo("99.6"), Some(100));
/// assert_eq!(normalize_tempo("500"), Some(240));
/// assert_eq!(normalize_tempo(""), None);
/// ```
pub fn normalize_tempo(input: &str) -> Option<u16> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(value.round().clamp(MIN_TEMPO as f64, MAX_TEMPO as f64) as u16)
}

/// One backing track search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub instrument: TrackInstrument,
    pub style: TrackStyle,
    pub key: String,
    /// `None` searches for any tempo.
    pub tempo: Option<u16>,
}

impl Default for TrackRequest {
    fn default() -> Self {
        TrackRequest {
            instrument: TrackInstrument::Guitar,
            style: TrackStyle::Blues,
            key: "A".to_string(),
            tempo: None,
        }
    }
}

impl TrackRequest {
    /// Validates the key and clamps the tempo.
    pub fn new(
        instrument: TrackInstrument,
        style: TrackStyle,
        key: &str,
        tempo: Option<u16>,
    ) -> Result<Self, TheoryError> {
        Ok(TrackRequest {
            instrument,
            style,
            key: parse_key(key)?.to_string(),
            tempo: tempo.map(|t| t.clamp(MIN_TEMPO, MAX_TEMPO)),
        })
    }

    /// Search text: style, "backing track in", key, tempo, then the first
    /// instrument hint. Jazz in Bb with no tempo asks for swing.
    pub fn query(&self) -> String {
        let tempo = self.tempo.map(|bpm| format!("{} bpm", bpm));
        let swing = self.style == TrackStyle::Jazz && self.key == "Bb" && self.tempo.is_none();

        let mut parts: Vec<&str> = vec![self.style.value(), "backing track", "in", self.key.as_str()];
        if let Some(tempo) = tempo.as_deref() {
            parts.push(tempo);
        }
        if swing {
            parts.push("swing");
        }
        if let Some(hint) = self.instrument.hints().first() {
            parts.push(hint);
        }
        parts.join(" ")
    }
}

/// Search results page for a query.
pub fn search_url(query: &str) -> Result<Url, TheoryError> {
    Url::parse_with_params(SEARCH_BASE, &[("search_query", query)])
        .map_err(|e| TheoryError::InvalidUrl(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    pub label: &'static str,
    pub instrument: TrackInstrument,
    pub style: TrackStyle,
    pub key: &'static str,
    pub tempo: Option<u16>,
}

impl Preset {
    pub fn request(&self) -> TrackRequest {
        TrackRequest {
            instrument: self.instrument,
            style: self.style,
            key: self.key.to_string(),
            tempo: self.tempo,
        }
    }
}

const fn guitar(label: &'static str, style: TrackStyle, key: &'static str, tempo: Option<u16>) -> Preset {
    Preset { label, instrument: TrackInstrument::Guitar, style, key, tempo }
}

pub const PRESETS: [Preset; 6] = [
    guitar("Blues in A (90 bpm)", TrackStyle::Blues, "A", Some(90)),
    guitar("Rock in E (120 bpm)", TrackStyle::Rock, "E", Some(120)),
    guitar("Funk in Am (100 bpm)", TrackStyle::Funk, "Am", Some(100)),
    guitar("Metal in Em (140 bpm)", TrackStyle::Metal, "Em", Some(140)),
    guitar("Jazz in Bb (swing)", TrackStyle::Jazz, "Bb", None),
    guitar("Pop in C (100 bpm)", TrackStyle::Pop, "C", Some(100)),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub label: String,
    pub request: TrackRequest,
    pub query: String,
}

/// Recent searches (newest first, no duplicates) and favorites keyed by query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchHistory {
    pub recent: Vec<String>,
    pub favorites: Vec<Favorite>,
}

impl SearchHistory {
    pub fn push_recent(&mut self, query: &str) {
        self.recent.retain(|q| q != query);
        self.recent.insert(0, query.to_string());
        self.recent.truncate(MAX_RECENT);
    }

    pub fn is_favorite(&self, query: &str) -> bool {
        self.favorites.iter().any(|f| f.query == query)
    }

    /// Add the request to favorites, or remove it if its query is already
    /// there. Returns whether it is a favorite afterwards.
    pub fn toggle_favorite(&mut self, label: &str, request: &TrackRequest) -> bool {
        let query = request.query();
        if self.is_favorite(&query) {
            self.favorites.retain(|f| f.query != query);
            return false;
        }
        self.favorites.insert(
            0,
            Favorite {
                label: label.to_string(),
                request: request.clone(),
                query,
            },
        );
        self.favorites.truncate(MAX_FAVORITES);
        true
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_with_tempo() {
        let request =
            TrackRequest::new(TrackInstrument::Drums, TrackStyle::Funk, "am", Some(100)).unwrap();
        assert_eq!(request.key, "Am");
        assert_eq!(request.query(), "funk backing track in Am 100 bpm drumless");
    }

    #[test]
    fn test_jazz_in_b_flat_swings_without_tempo() {
        let any = TrackRequest::new(TrackInstrument::Piano, TrackStyle::Jazz, "Bb", None).unwrap();
        assert_eq!(any.query(), "jazz backing track in Bb swing piano backing track");

        let timed = TrackRequest { tempo: Some(120), ..any.clone() };
        assert_eq!(timed.query(), "jazz backing track in Bb 120 bpm piano backing track");

        let sharp = TrackRequest { key: "A#".to_string(), ..any };
        assert!(!sharp.query().contains("swing"));
    }

    #[test]
    fn test_tempo_normalization() {
        assert_eq!(normalize_tempo("90"), Some(90));
        assert_eq!(normalize_tempo(" 120.4 "), Some(120));
        assert_eq!(normalize_tempo("10"), Some(40));
        assert_eq!(normalize_tempo("-5"), Some(40));
        assert_eq!(normalize_tempo("1e3"), Some(240));
        assert_eq!(normalize_tempo("fast"), None);
        assert_eq!(normalize_tempo("inf"), None);
        assert_eq!(normalize_tempo("   "), None);

        let request =
            TrackRequest::new(TrackInstrument::Bass, TrackStyle::Rock, "E", Some(300)).unwrap();
        assert_eq!(request.tempo, Some(240));
    }

    #[test]
    fn test_keys() {
        assert_eq!(KEYS.len(), 34);
        assert_eq!(parse_key("dbm").unwrap(), "Dbm");
        assert_eq!(parse_key("F#").unwrap(), "F#");
        assert_eq!(parse_key("H"), Err(TheoryError::UnknownKey("H".to_string())));
        assert!(parse_key("Cb").is_err());
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Metal".parse::<TrackStyle>().unwrap(), TrackStyle::Metal);
        assert!("polka".parse::<TrackStyle>().is_err());
        assert_eq!("keys".parse::<TrackInstrument>().unwrap(), TrackInstrument::Piano);
        assert!("tuba".parse::<TrackInstrument>().is_err());
    }

    #[test]
    fn test_presets() {
        let queries: Vec<String> = PRESETS.iter().map(|p| p.request().query()).collect();
        assert_eq!(queries[0], "blues backing track in A 90 bpm no lead guitar");
        assert_eq!(queries[4], "jazz backing track in Bb swing no lead guitar");
        for preset in PRESETS {
            assert!(KEYS.contains(&preset.key));
        }
    }

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("jazz backing track in Bb swing").unwrap();
        assert_eq!(url.host_str(), Some("www.youtube.com"));
        let (name, value) = url.query_pairs().next().unwrap();
        assert_eq!(name, "search_query");
        assert_eq!(value, "jazz backing track in Bb swing");
        assert!(search_url("C# rock").unwrap().as_str().contains("C%23"));
    }

    #[test]
    fn test_recent_searches() {
        let mut history = SearchHistory::default();
        for i in 0..10 {
            history.push_recent(&format!("query {}", i));
        }
        assert_eq!(history.recent.len(), 8);
        assert_eq!(history.recent[0], "query 9");

        history.push_recent("query 5");
        assert_eq!(history.recent[0], "query 5");
        assert_eq!(history.recent.iter().filter(|q| *q == "query 5").count(), 1);

        history.clear_recent();
        assert!(history.recent.is_empty());
    }

    #[test]
    fn test_favorites_toggle() {
        let mut history = SearchHistory::default();
        let request = PRESETS[0].request();
        assert!(history.toggle_favorite("Blues", &request));
        assert!(history.is_favorite(&request.query()));
        assert!(!history.toggle_favorite("Blues again", &request));
        assert!(history.favorites.is_empty());

        for tempo in 40..70 {
            let request = TrackRequest { tempo: Some(tempo), ..TrackRequest::default() };
            history.toggle_favorite("tempo", &request);
        }
        assert_eq!(history.favorites.len(), 20);
        assert_eq!(history.favorites[0].request.tempo, Some(69));
    }
}
