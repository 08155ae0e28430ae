//! # Chord Builder
//!
//! Maps a root and a [`ChordQuality`] to its chord tones using fixed semitone
//! templates.
//!
//! ```rust
//! use tonehouse::{build_chord, chord_name, ChordQuality, PitchClass};
//!
//! let tones = build_chord(PitchClass::G, ChordQuality::Dominant7);
//! let names: Vec<String> = tones.iter().map(|p| p.to_string()).collect();
//! assert_eq!(names, vec!["G", "B", "D", "F"]);
//!
//! assert_eq!(chord_name(PitchClass::A, ChordQuality::Minor), "Am");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::note::PitchClass;

/// Interval pattern that defines a chord's character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    #[serde(rename = "Dominant 7")]
    Dominant7,
    #[serde(rename = "Major 7")]
    Major7,
    #[serde(rename = "Minor 7")]
    Minor7,
    Sus2,
    Sus4,
    Diminished,
    Augmented,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dominant7,
        ChordQuality::Major7,
        ChordQuality::Minor7,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Diminished,
        ChordQuality::Augmented,
    ];

    /// Ascending semitone offsets from the root.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Diminished => &[0, 3, 6],
            ChordQuality::Augmented => &[0, 4, 8],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Dominant7 => "Dominant 7",
            ChordQuality::Major7 => "Major 7",
            ChordQuality::Minor7 => "Minor 7",
            ChordQuality::Sus2 => "Sus2",
            ChordQuality::Sus4 => "Sus4",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
        }
    }

    /// Suffix appended to the root in a chord symbol (`""` for a major triad).
    pub fn symbol(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for ChordQuality {
    type Err = TheoryError;

    /// Accepts display labels ("Dominant 7") and chord symbols ("7", "m7", "°").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // Symbols are case-sensitive: "M7" and "m7" differ.
        let by_symbol = match trimmed {
            "M" | "maj" => Some(ChordQuality::Major),
            "m" | "min" | "-" => Some(ChordQuality::Minor),
            "7" | "dom7" => Some(ChordQuality::Dominant7),
            "maj7" | "M7" => Some(ChordQuality::Major7),
            "m7" | "min7" | "-7" => Some(ChordQuality::Minor7),
            "dim" | "°" => Some(ChordQuality::Diminished),
            "aug" | "+" => Some(ChordQuality::Augmented),
            _ => None,
        };
        if let Some(quality) = by_symbol {
            return Ok(quality);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "major" => Ok(ChordQuality::Major),
            "minor" => Ok(ChordQuality::Minor),
            "dominant7" | "dominant" => Ok(ChordQuality::Dominant7),
            "major7" => Ok(ChordQuality::Major7),
            "minor7" => Ok(ChordQuality::Minor7),
            "sus2" => Ok(ChordQuality::Sus2),
            "sus4" | "sus" => Ok(ChordQuality::Sus4),
            "diminished" => Ok(ChordQuality::Diminished),
            "augmented" => Ok(ChordQuality::Augmented),
            _ => Err(TheoryError::UnknownChordQuality(s.to_string())),
        }
    }
}

/// Build the chord tones for `root` and `quality`, root first.
pub fn build_chord(root: PitchClass, quality: ChordQuality) -> Vec<PitchClass> {
    quality
        .intervals()
        .iter()
        .map(|&offset| root.transpose(offset as i32))
        .collect()
}

/// Name-based chord lookup. Unknown names yield an empty vector.
pub fn chord_tones(root: &str, quality: &str) -> Vec<PitchClass> {
    match (root.parse::<PitchClass>(), quality.parse::<ChordQuality>()) {
        (Ok(root), Ok(quality)) => build_chord(root, quality),
        (root, quality) => {
            tracing::debug!(?root, ?quality, "chord lookup miss");
            Vec::new()
        }
    }
}

/// Human-readable chord symbol, e.g. `C`, `Am`, `Bdim`, `G7`, `Fmaj7`, `Dm7`.
pub fn chord_name(root: PitchClass, quality: ChordQuality) -> String {
    format!("{}{}", root, quality.symbol())
}

/// Inversions of a chord, each a rotation of the tones.
///
/// Triads get the first inversion only; seventh chords also get the second.
/// Fewer than three tones have no inversions.
pub fn inversions(tones: &[PitchClass]) -> Vec<Vec<PitchClass>> {
    if tones.len() < 3 {
        return Vec::new();
    }
    let rotate = |n: usize| -> Vec<PitchClass> {
        tones[n..].iter().chain(&tones[..n]).copied().collect()
    };

    let mut result = vec![rotate(1)];
    if tones.len() > 3 {
        result.push(rotate(2));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tones: &[PitchClass]) -> Vec<&'static str> {
        tones.iter().map(|p| p.name()).collect()
    }

    #[test]
    fn test_build_chord_templates() {
        assert_eq!(names(&build_chord(PitchClass::C, ChordQuality::Major)), vec!["C", "E", "G"]);
        assert_eq!(names(&build_chord(PitchClass::D, ChordQuality::Minor)), vec!["D", "F", "A"]);
        assert_eq!(
            names(&build_chord(PitchClass::A, ChordQuality::Major7)),
            vec!["A", "C#", "E", "G#"]
        );
        assert_eq!(
            names(&build_chord(PitchClass::B, ChordQuality::Diminished)),
            vec!["B", "D", "F"]
        );
        assert_eq!(
            names(&build_chord(PitchClass::GSharp, ChordQuality::Augmented)),
            vec!["G#", "C", "E"]
        );
        assert_eq!(names(&build_chord(PitchClass::D, ChordQuality::Sus4)), vec!["D", "G", "A"]);
    }

    #[test]
    fn test_every_chord_starts_on_root() {
        for root in PitchClass::ALL {
            for quality in ChordQuality::ALL {
                let tones = build_chord(root, quality);
                assert_eq!(tones.len(), quality.intervals().len());
                assert!(tones.len() == 3 || tones.len() == 4);
                assert_eq!(tones[0], root);
            }
        }
    }

    #[test]
    fn test_chord_tones_fail_soft() {
        assert_eq!(names(&chord_tones("E", "Minor")), vec!["E", "G", "B"]);
        assert_eq!(names(&chord_tones("Eb", "7")), vec!["D#", "G", "A#", "C#"]);
        assert!(chord_tones("H", "Major").is_empty());
        assert!(chord_tones("C", "Mystery").is_empty());
    }

    #[test]
    fn test_chord_names() {
        assert_eq!(chord_name(PitchClass::C, ChordQuality::Major), "C");
        assert_eq!(chord_name(PitchClass::A, ChordQuality::Minor), "Am");
        assert_eq!(chord_name(PitchClass::B, ChordQuality::Diminished), "Bdim");
        assert_eq!(chord_name(PitchClass::G, ChordQuality::Dominant7), "G7");
        assert_eq!(chord_name(PitchClass::F, ChordQuality::Major7), "Fmaj7");
        assert_eq!(chord_name(PitchClass::D, ChordQuality::Minor7), "Dm7");
        assert_eq!(chord_name(PitchClass::CSharp, ChordQuality::Sus2), "C#sus2");
    }

    #[test]
    fn test_quality_parsing() {
        assert_eq!("Dominant 7".parse::<ChordQuality>().unwrap(), ChordQuality::Dominant7);
        assert_eq!("major7".parse::<ChordQuality>().unwrap(), ChordQuality::Major7);
        assert_eq!("M7".parse::<ChordQuality>().unwrap(), ChordQuality::Major7);
        assert_eq!("m7".parse::<ChordQuality>().unwrap(), ChordQuality::Minor7);
        assert_eq!("°".parse::<ChordQuality>().unwrap(), ChordQuality::Diminished);
        assert_eq!("sus-2".parse::<ChordQuality>().unwrap(), ChordQuality::Sus2);
        for quality in ChordQuality::ALL {
            assert_eq!(quality.label().parse::<ChordQuality>().unwrap(), quality);
        }
        assert!("".parse::<ChordQuality>().is_err());
        assert!("13b9".parse::<ChordQuality>().is_err());
    }

    #[test]
    fn test_inversions() {
        let triad = build_chord(PitchClass::C, ChordQuality::Major);
        let inv = inversions(&triad);
        assert_eq!(inv.len(), 1);
        assert_eq!(names(&inv[0]), vec!["E", "G", "C"]);

        let seventh = build_chord(PitchClass::G, ChordQuality::Dominant7);
        let inv = inversions(&seventh);
        assert_eq!(inv.len(), 2);
        assert_eq!(names(&inv[0]), vec!["B", "D", "F", "G"]);
        assert_eq!(names(&inv[1]), vec!["D", "F", "G", "B"]);

        assert!(inversions(&[PitchClass::C, PitchClass::G]).is_empty());
    }
}
