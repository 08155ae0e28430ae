//! # Error Types
//!
//! Errors raised by the string-facing parts of the theory engine.
//!
//! The builders themselves never fail for typed inputs. Errors only appear when
//! text has to be turned into a typed value (note names, quality labels, styles,
//! settings files), when a progression is resolved in strict mode, or when a
//! playback request contains nothing playable.
//!
//! ## Usage
//! ```rust
//! use tonehouse::{PitchClass, TheoryError};
//!
//! match "H".parse::<PitchClass>() {
//!     Ok(pitch) => println!("{}", pitch),
//!     Err(TheoryError::UnknownNote(name)) => eprintln!("no such note: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TheoryError {
    /// A note name that is not one of the 12 pitch classes (or an octave-qualified note).
    ///
    /// # Example
    /// ```
    /// # use tonehouse::TheoryError;
    /// let err = TheoryError::UnknownNote("H#".to_string());
    /// assert_eq!(err.to_string(), "Unknown note: H#");
    /// ```
    #[error("Unknown note: {0}")]
    UnknownNote(String),

    #[error("Unknown chord quality: {0}")]
    UnknownChordQuality(String),

    #[error("Unknown scale quality: {0}")]
    UnknownScaleQuality(String),

    #[error("Unknown tonality: {0} (expected major or minor)")]
    UnknownTonality(String),

    #[error("Unknown progression style: {0}")]
    UnknownStyle(String),

    /// Progression lengths are 4 or 8 bars.
    #[error("Invalid progression length: {0} (expected 4 or 8)")]
    InvalidLength(String),

    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown quiz mode: {0}")]
    UnknownQuizMode(String),

    /// A Roman numeral token whose degree is not in the key.
    ///
    /// Only produced by strict resolution; the default resolver falls back to
    /// the key root instead.
    ///
    /// # Example
    /// ```
    /// # use tonehouse::TheoryError;
    /// let err = TheoryError::UnresolvedNumeral("bVII".to_string());
    /// assert_eq!(err.to_string(), "Cannot resolve Roman numeral: bVII");
    /// ```
    #[error("Cannot resolve Roman numeral: {0}")]
    UnresolvedNumeral(String),

    #[error("Unknown backing track style: {0}")]
    UnknownTrackStyle(String),

    /// Backing track keys are a root (sharps or flats) with an optional `m`.
    ///
    /// # Example
    /// ```
    /// # use tonehouse::TheoryError;
    /// let err = TheoryError::UnknownKey("H".to_string());
    /// assert_eq!(err.to_string(), "Unknown key: H");
    /// ```
    #[error("Unknown key: {0}")]
    UnknownKey(String),

    #[error("Invalid search URL: {0}")]
    InvalidUrl(String),

    #[error("No valid notes provided for chord playback")]
    NoPlayableNotes,

    /// Invalid settings file content.
    #[error("Invalid settings: {0}")]
    SettingsError(String),
}
