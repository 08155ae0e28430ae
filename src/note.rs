//! # Note Model
//!
//! The 12 chromatic pitch classes and octave-qualified notes.
//!
//! Pitch classes are spelled with sharps only. Parsing accepts flats and other
//! enharmonic spellings but they always come back out in canonical form, so
//! `"Db"` parses to [`PitchClass::CSharp`] and prints as `C#`.
//!
//! All transposition is arithmetic modulo 12 over [`PitchClass::ALL`].
//!
//! ```rust
//! use tonehouse::{transpose_note, Note, PitchClass};
//!
//! assert_eq!(transpose_note(PitchClass::A, 3), PitchClass::C);
//! assert_eq!(transpose_note(PitchClass::C, -1), PitchClass::B);
//!
//! let a4: Note = "A4".parse().unwrap();
//! assert_eq!(a4.midi(), 69);
//! assert!((a4.frequency() - 440.0).abs() < 1e-9);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;

/// Reference pitch for A4 in Hz.
pub const A4_FREQUENCY: f64 = 440.0;

/// MIDI note number of A4.
pub const A4_MIDI: i32 = 69;

/// One of the 12 equal-temperament pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// All pitch classes in chromatic order starting at C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// The natural (white-key) pitch classes.
    pub const NATURALS: [PitchClass; 7] = [
        PitchClass::C,
        PitchClass::D,
        PitchClass::E,
        PitchClass::F,
        PitchClass::G,
        PitchClass::A,
        PitchClass::B,
    ];

    /// Semitones above C (0..=11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class for any semitone count, wrapping modulo 12.
    pub fn from_index(index: i32) -> PitchClass {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Canonical sharp spelling.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    pub fn transpose(self, semitones: i32) -> PitchClass {
        Self::from_index(self.index() as i32 + semitones.rem_euclid(12))
    }

    /// Ascending distance in semitones from `self` up to `other` (0..=11).
    pub fn semitones_to(self, other: PitchClass) -> u8 {
        (other.index() as i32 - self.index() as i32).rem_euclid(12) as u8
    }
}

/// Transpose a pitch class by any number of semitones (negative goes down).
pub fn transpose_note(root: PitchClass, semitones: i32) -> PitchClass {
    root.transpose(semitones)
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl From<PitchClass> for String {
    fn from(pitch: PitchClass) -> Self {
        pitch.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Split a leading note name (letter plus accidentals) from the rest of the text.
///
/// Returns the semitone offset from C and the remaining input.
fn parse_note_prefix(s: &str) -> Option<(i32, &str)> {
    let mut chars = s.char_indices();
    let (_, letter) = chars.next()?;
    let base = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let mut offset = 0;
    let mut rest_start = letter.len_utf8();
    for (i, c) in chars {
        match c {
            '#' | '♯' => offset += 1,
            'b' | '♭' => offset -= 1,
            _ => return Some((base + offset, &s[i..])),
        }
        rest_start = i + c.len_utf8();
    }
    Some((base + offset, &s[rest_start..]))
}

impl FromStr for PitchClass {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match parse_note_prefix(trimmed) {
            Some((semitone, "")) => Ok(PitchClass::from_index(semitone)),
            _ => Err(TheoryError::UnknownNote(s.to_string())),
        }
    }
}

/// A pitch class in a specific octave (scientific pitch notation, C4 = middle C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Note {
    pub pitch: PitchClass,
    pub octave: i8,
}

impl Note {
    pub fn new(pitch: PitchClass, octave: i8) -> Self {
        Note { pitch, octave }
    }

    /// MIDI note number (C4 = 60, A4 = 69).
    pub fn midi(self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.pitch.index() as i32
    }

    /// Octaves beyond the `i8` range saturate.
    pub fn from_midi(midi: i32) -> Note {
        let octave = (midi.div_euclid(12) - 1).clamp(i8::MIN as i32, i8::MAX as i32);
        Note {
            pitch: PitchClass::from_index(midi),
            octave: octave as i8,
        }
    }

    /// Equal-temperament frequency in Hz relative to A4 = 440.
    pub fn frequency(self) -> f64 {
        A4_FREQUENCY * 2f64.powf((self.midi() - A4_MIDI) as f64 / 12.0)
    }

    /// Move by a number of semitones, carrying into the octave.
    pub fn add_semitones(self, semitones: i32) -> Note {
        Note::from_midi(self.midi().saturating_add(semitones))
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

impl TryFrom<String> for Note {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    /// Parses `C#4`, `Bb3`, `C-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unknown = || TheoryError::UnknownNote(s.to_string());
        let (semitone, rest) = parse_note_prefix(trimmed).ok_or_else(unknown)?;
        if rest.is_empty() {
            return Err(unknown());
        }
        let octave: i8 = rest.parse().map_err(|_| unknown())?;
        // Spellings such as B#3 or Cb4 cross the octave boundary.
        let midi = (octave as i32 + 1) * 12 + semitone;
        let note = Note::from_midi(midi);
        if !(-1..=9).contains(&note.octave) {
            return Err(unknown());
        }
        Ok(note)
    }
}
