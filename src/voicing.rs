//! # Instrument Voicings
//!
//! Turns chord and scale pitch classes into something playable on a given
//! instrument: octave-placed voicings, common guitar shapes, bass positions and
//! fretboard diagrams.
//!
//! ```rust
//! use tonehouse::voicing::{instrument_voicing, Instrument};
//! use tonehouse::{build_chord, ChordQuality, PitchClass};
//!
//! let tones = build_chord(PitchClass::C, ChordQuality::Major);
//! let voicing: Vec<String> = instrument_voicing(&tones, Instrument::Keys)
//!     .iter()
//!     .map(|n| n.to_string())
//!     .collect();
//! assert_eq!(voicing, vec!["C3", "E3", "G3", "C4"]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chord::ChordQuality;
use crate::error::TheoryError;
use crate::note::{Note, PitchClass};

/// Number of frets shown in a fretboard diagram, counting the open string.
const FRETBOARD_FRETS: i32 = 13;

const GUITAR_STRINGS: [PitchClass; 6] = [
    PitchClass::E,
    PitchClass::A,
    PitchClass::D,
    PitchClass::G,
    PitchClass::B,
    PitchClass::E,
];
const BASS_STRINGS: [PitchClass; 4] = [PitchClass::E, PitchClass::A, PitchClass::D, PitchClass::G];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Instrument {
    #[default]
    Guitar,
    Bass,
    Keys,
}

impl Instrument {
    /// Open strings from lowest to highest; empty for keyboards.
    pub fn strings(self) -> &'static [PitchClass] {
        match self {
            Instrument::Guitar => &GUITAR_STRINGS,
            Instrument::Bass => &BASS_STRINGS,
            Instrument::Keys => &[],
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Instrument::Guitar => "Guitar",
            Instrument::Bass => "Bass",
            Instrument::Keys => "Piano / Keys",
        };
        f.pad(name)
    }
}

impl FromStr for Instrument {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guitar" => Ok(Instrument::Guitar),
            "bass" => Ok(Instrument::Bass),
            "keys" | "keyboard" | "keyboards" | "piano" | "piano / keys" => Ok(Instrument::Keys),
            _ => Err(TheoryError::UnknownInstrument(s.to_string())),
        }
    }
}

/// Place each pitch in the lowest octave (from `base_octave` up) that is
/// strictly above the previous note.
pub fn ascending_notes(pitches: &[PitchClass], base_octave: i8) -> Vec<Note> {
    let mut notes: Vec<Note> = Vec::with_capacity(pitches.len());
    for &pitch in pitches {
        let mut note = Note::new(pitch, base_octave);
        if let Some(prev) = notes.last() {
            while note.midi() <= prev.midi() {
                note.octave += 1;
            }
        }
        notes.push(note);
    }
    notes
}

/// Playback voicing of chord tones for an instrument.
///
/// - Bass: root and fifth from octave 2
/// - Keys: root, third, fifth and seventh (or the root again) from octave 3
/// - Guitar: a five-note strum, root-third-fifth-seventh/root-third from octave 3
pub fn instrument_voicing(tones: &[PitchClass], instrument: Instrument) -> Vec<Note> {
    let Some(&root) = tones.first() else {
        return Vec::new();
    };
    let third = tones.get(1).copied().unwrap_or(root);
    let fifth = tones.get(2).copied().unwrap_or(third);
    let top = tones.get(3).copied().unwrap_or(root);

    match instrument {
        Instrument::Bass => ascending_notes(&[root, fifth], 2),
        Instrument::Keys => ascending_notes(&[root, third, fifth, top], 3),
        Instrument::Guitar => ascending_notes(&[root, third, fifth, top, third], 3),
    }
}

/// Common guitar fingerings, low E string first (`x` = muted).
pub fn guitar_shapes(root: PitchClass, quality: ChordQuality) -> &'static [&'static str] {
    use ChordQuality::*;
    use PitchClass::{A, C, D, E, G};

    match (root, quality) {
        (C, Major) => &["x32010"],
        (G, Major) => &["320003"],
        (D, Major) => &["xx0232"],
        (A, Major) => &["x02220"],
        (E, Major) => &["022100"],
        (C, Minor) => &["x35543"],
        (D, Minor) => &["xx0231"],
        (E, Minor) => &["022000"],
        (A, Minor) => &["x02210"],
        (G, Minor) => &["355333"],
        (C, Dominant7) => &["x32310"],
        (G, Dominant7) => &["320001"],
        (D, Dominant7) => &["xx0212"],
        (A, Dominant7) => &["x02020"],
        (E, Dominant7) => &["020100"],
        (C, Major7) => &["x32000"],
        (G, Major7) => &["320002"],
        (D, Major7) => &["xx0222"],
        (A, Major7) => &["x02120"],
        (E, Major7) => &["021100"],
        (D, Minor7) => &["xx0211"],
        (A, Minor7) => &["x02010"],
        (E, Minor7) => &["022030"],
        (G, Minor7) => &["353333"],
        (C, Sus2) => &["x30010"],
        (D, Sus2) => &["xx0230"],
        (G, Sus2) => &["320033"],
        (A, Sus2) => &["x02200"],
        (C, Sus4) => &["x33011"],
        (D, Sus4) => &["xx0233"],
        (G, Sus4) => &["330013"],
        (A, Sus4) => &["x02230"],
        _ => &[],
    }
}

/// Root on the E string and fifth on the A string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BassPosition {
    pub root_fret: u8,
    pub fifth_fret: u8,
}

impl fmt::Display for BassPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Root on E string fret {}, fifth on A string fret {}",
            self.root_fret, self.fifth_fret
        )
    }
}

/// Bass position for a chord; the "fifth" is the third tone (or the highest available).
pub fn bass_position(root: PitchClass, tones: &[PitchClass]) -> BassPosition {
    let fifth = tones.get(2).or_else(|| tones.get(1)).copied().unwrap_or(root);
    BassPosition {
        root_fret: PitchClass::E.semitones_to(root),
        fifth_fret: PitchClass::A.semitones_to(fifth),
    }
}

/// One string of a fretboard diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardString {
    pub open: PitchClass,
    /// Notes in the scale at each fret (0..=12), `None` elsewhere.
    pub frets: Vec<Option<PitchClass>>,
}

impl fmt::Display for FretboardString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self
            .frets
            .iter()
            .map(|fret| match fret {
                Some(pitch) => format!("{:<2}", pitch),
                None => "--".to_string(),
            })
            .collect();
        write!(f, "{:<2} {}", self.open, cells.join(" "))
    }
}

/// Mark scale notes on every string of the instrument, frets 0 to 12.
pub fn fretboard(scale: &[PitchClass], instrument: Instrument) -> Vec<FretboardString> {
    instrument
        .strings()
        .iter()
        .map(|&open| FretboardString {
            open,
            frets: (0..FRETBOARD_FRETS)
                .map(|fret| {
                    let pitch = open.transpose(fret);
                    scale.contains(&pitch).then_some(pitch)
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::build_chord;
    use crate::scale::{build_scale, ScaleQuality};

    fn labels(notes: &[Note]) -> Vec<String> {
        notes.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_ascending_notes() {
        let pitches = [PitchClass::A, PitchClass::C, PitchClass::E, PitchClass::A];
        assert_eq!(labels(&ascending_notes(&pitches, 3)), vec!["A3", "C4", "E4", "A4"]);
        assert!(ascending_notes(&[], 3).is_empty());
    }

    #[test]
    fn test_voicings_per_instrument() {
        let g7 = build_chord(PitchClass::G, ChordQuality::Dominant7);
        assert_eq!(labels(&instrument_voicing(&g7, Instrument::Bass)), vec!["G2", "D3"]);
        assert_eq!(
            labels(&instrument_voicing(&g7, Instrument::Keys)),
            vec!["G3", "B3", "D4", "F4"]
        );
        assert_eq!(
            labels(&instrument_voicing(&g7, Instrument::Guitar)),
            vec!["G3", "B3", "D4", "F4", "B4"]
        );

        let e_minor = build_chord(PitchClass::E, ChordQuality::Minor);
        assert_eq!(
            labels(&instrument_voicing(&e_minor, Instrument::Guitar)),
            vec!["E3", "G3", "B3", "E4", "G4"]
        );
        assert!(instrument_voicing(&[], Instrument::Guitar).is_empty());
    }

    #[test]
    fn test_guitar_shapes() {
        assert_eq!(guitar_shapes(PitchClass::C, ChordQuality::Major), &["x32010"]);
        assert_eq!(guitar_shapes(PitchClass::E, ChordQuality::Minor7), &["022030"]);
        assert!(guitar_shapes(PitchClass::FSharp, ChordQuality::Augmented).is_empty());
    }

    #[test]
    fn test_bass_position() {
        let c = build_chord(PitchClass::C, ChordQuality::Major);
        let position = bass_position(PitchClass::C, &c);
        assert_eq!(position, BassPosition { root_fret: 8, fifth_fret: 10 });
        assert_eq!(
            position.to_string(),
            "Root on E string fret 8, fifth on A string fret 10"
        );

        let e = build_chord(PitchClass::E, ChordQuality::Major);
        assert_eq!(bass_position(PitchClass::E, &e), BassPosition { root_fret: 0, fifth_fret: 2 });
    }

    #[test]
    fn test_fretboard() {
        let scale = build_scale(PitchClass::E, ScaleQuality::PentatonicMinor);
        let board = fretboard(&scale, Instrument::Guitar);
        assert_eq!(board.len(), 6);
        assert_eq!(
            board[0].to_string(),
            "E  E  -- -- G  -- A  -- B  -- -- D  -- E "
        );
        assert_eq!(fretboard(&scale, Instrument::Bass).len(), 4);
        assert!(fretboard(&scale, Instrument::Keys).is_empty());

        let a_major = build_scale(PitchClass::A, ScaleQuality::MajorIonian);
        let board = fretboard(&a_major, Instrument::Bass);
        assert_eq!(board[0].frets[2], Some(PitchClass::FSharp));
        assert_eq!(board[0].frets[1], None);
    }

    #[test]
    fn test_instrument_parsing() {
        assert_eq!("Keyboards".parse::<Instrument>().unwrap(), Instrument::Keys);
        assert_eq!("bass".parse::<Instrument>().unwrap(), Instrument::Bass);
        assert!("tuba".parse::<Instrument>().is_err());
    }
}
