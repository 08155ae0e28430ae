//! # Tonehouse
//!
//! Music theory engine for practice tools: chord and scale lookup, diatonic
//! harmony, Roman numeral progressions, ear-training quizzes, tuner and
//! metronome math, and backing track search queries.
//!
//! All computations are pure and deterministic apart from the quiz, which takes
//! a caller-supplied random number generator.
//!
//! ```rust
//! use tonehouse::{build_chord, build_scale, resolve_progression};
//! use tonehouse::{ChordQuality, PitchClass, ScaleQuality, Tonality};
//!
//! assert_eq!(build_chord(PitchClass::D, ChordQuality::Minor).len(), 3);
//! assert_eq!(build_scale(PitchClass::E, ScaleQuality::Blues).len(), 6);
//!
//! let blues = resolve_progression(&["I7", "IV7", "I7", "V7"], PitchClass::A, Tonality::Major);
//! assert_eq!(blues.chords, vec!["A7", "D7", "A7", "E7"]);
//! ```

pub mod backing_track;
pub mod chord;
pub mod ear_training;
pub mod error;
pub mod harmony;
pub mod metronome;
pub mod note;
pub mod playback;
pub mod progression;
pub mod scale;
pub mod settings;
pub mod tuner;
pub mod voicing;

pub use chord::{build_chord, chord_name, chord_tones, inversions, ChordQuality};
pub use error::*;
pub use harmony::{build_diatonic_chords, DiatonicDegree, Tonality};
pub use note::{transpose_note, Note, PitchClass};
pub use progression::{resolve_progression, resolve_progression_strict, ResolvedProgression};
pub use scale::{build_scale, scale_tones, ScaleQuality};
