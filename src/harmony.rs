//! # Diatonic Harmony
//!
//! The seven scale-degree triads of a major or minor key, with their Roman
//! numerals.
//!
//! ```rust
//! use tonehouse::{build_diatonic_chords, PitchClass, Tonality};
//!
//! let degrees = build_diatonic_chords(PitchClass::G, Tonality::Major);
//! assert_eq!(degrees[4].numeral, "V");
//! assert_eq!(degrees[4].root, PitchClass::D);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::ChordQuality;
use crate::chord::ChordQuality::{Diminished as Dim, Major as Maj, Minor as Min};
use crate::error::TheoryError;
use crate::note::PitchClass;
use crate::scale::{build_scale, ScaleQuality};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tonality {
    #[default]
    Major,
    Minor,
}

const MAJOR_TRIADS: [ChordQuality; 7] = [Maj, Min, Min, Maj, Maj, Min, Dim];
const MINOR_TRIADS: [ChordQuality; 7] = [Min, Dim, Maj, Min, Min, Maj, Maj];

const MAJOR_NUMERALS: [&str; 7] = ["I", "ii", "iii", "IV", "V", "vi", "vii°"];
const MINOR_NUMERALS: [&str; 7] = ["i", "ii°", "III", "iv", "v", "VI", "VII"];

impl Tonality {
    /// Scale the diatonic triads are stacked on.
    pub fn scale(self) -> ScaleQuality {
        match self {
            Tonality::Major => ScaleQuality::MajorIonian,
            Tonality::Minor => ScaleQuality::NaturalMinorAeolian,
        }
    }

    pub fn triad_qualities(self) -> &'static [ChordQuality; 7] {
        match self {
            Tonality::Major => &MAJOR_TRIADS,
            Tonality::Minor => &MINOR_TRIADS,
        }
    }

    pub fn numerals(self) -> &'static [&'static str; 7] {
        match self {
            Tonality::Major => &MAJOR_NUMERALS,
            Tonality::Minor => &MINOR_NUMERALS,
        }
    }
}

impl fmt::Display for Tonality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tonality::Major => f.pad("Major"),
            Tonality::Minor => f.pad("Minor"),
        }
    }
}

impl FromStr for Tonality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(Tonality::Major),
            "minor" | "min" => Ok(Tonality::Minor),
            _ => Err(TheoryError::UnknownTonality(s.to_string())),
        }
    }
}

/// One scale degree of a key: its numeral, root and triad quality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiatonicDegree {
    pub numeral: &'static str,
    pub root: PitchClass,
    pub quality: ChordQuality,
}

/// Build the seven diatonic triads of `root` in `tonality`, tonic first.
pub fn build_diatonic_chords(root: PitchClass, tonality: Tonality) -> Vec<DiatonicDegree> {
    build_scale(root, tonality.scale())
        .into_iter()
        .zip(tonality.triad_qualities())
        .zip(tonality.numerals())
        .map(|((root, &quality), &numeral)| DiatonicDegree {
            numeral,
            root,
            quality,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::chord_name;

    #[test]
    fn test_major_numerals() {
        for root in PitchClass::ALL {
            let degrees = build_diatonic_chords(root, Tonality::Major);
            let numerals: Vec<&str> = degrees.iter().map(|d| d.numeral).collect();
            assert_eq!(numerals, vec!["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
            assert_eq!(degrees[0].root, root);
        }
    }

    #[test]
    fn test_minor_numerals() {
        for root in PitchClass::ALL {
            let degrees = build_diatonic_chords(root, Tonality::Minor);
            let numerals: Vec<&str> = degrees.iter().map(|d| d.numeral).collect();
            assert_eq!(numerals, vec!["i", "ii°", "III", "iv", "v", "VI", "VII"]);
            assert_eq!(degrees[0].root, root);
        }
    }

    #[test]
    fn test_c_major_chords() {
        let chords: Vec<String> = build_diatonic_chords(PitchClass::C, Tonality::Major)
            .iter()
            .map(|d| chord_name(d.root, d.quality))
            .collect();
        assert_eq!(chords, vec!["C", "Dm", "Em", "F", "G", "Am", "Bdim"]);
    }

    #[test]
    fn test_a_minor_chords() {
        let chords: Vec<String> = build_diatonic_chords(PitchClass::A, Tonality::Minor)
            .iter()
            .map(|d| chord_name(d.root, d.quality))
            .collect();
        assert_eq!(chords, vec!["Am", "Bdim", "C", "Dm", "Em", "F", "G"]);
    }

    #[test]
    fn test_idempotent() {
        let first = build_diatonic_chords(PitchClass::FSharp, Tonality::Minor);
        let second = build_diatonic_chords(PitchClass::FSharp, Tonality::Minor);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tonality_parsing() {
        assert_eq!("minor".parse::<Tonality>().unwrap(), Tonality::Minor);
        assert_eq!("Major".parse::<Tonality>().unwrap(), Tonality::Major);
        assert!("dorian".parse::<Tonality>().is_err());
    }
}
