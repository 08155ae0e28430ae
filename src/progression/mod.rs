//! # Progression Module
//!
//! Chord progressions from Roman numeral templates.
//!
//! ## Sub-modules
//! - `types` - Style, Length and ResolvedProgression definitions
//! - `roman` - Roman numeral token parsing (`ii7`, `Imaj7`, `V/V`)
//! - `templates` - Hand-authored template tables per style and length
//! - `engine` - Resolution against a key and the round-robin session
//!
//! ## Entry Points
//! - [`resolve_progression()`] - Resolve any token list in a key (never fails)
//! - [`resolve_progression_strict()`] - Same, but unknown degrees are errors
//! - [`ProgressionSession`] - Generate, regenerate and suggest alternatives
//!
//! ## Example
//! ```rust
//! use tonehouse::progression::{Length, ProgressionSession, Style};
//! use tonehouse::{PitchClass, Tonality};
//!
//! let mut session = ProgressionSession::new(PitchClass::A, Tonality::Major, Style::Blues, Length::Four);
//! assert_eq!(session.generate().chords, vec!["A7", "D7", "A7", "E7"]);
//! ```
//!
//! ## Token Resolution
//!
//! A token names a scale degree with an optional quality suffix:
//! - `7` gives a dominant seventh, `maj7` a major seventh, `m7` a minor seventh
//! - without a suffix the degree's diatonic triad quality is used
//! - `X/Y` is a secondary dominant: the root a fifth above degree `Y`
//!
//! Upper or lower case and a trailing `°` do not change which degree is meant.

mod engine;
mod roman;
mod templates;
mod types;


pub use engine::{
    resolve_progression, resolve_progression_strict, template_at, ProgressionSession,
};
pub use roman::{degree_key, parse_roman, suffix_quality, RomanToken};
pub use templates::{alt_templates, templates, Template};
pub use types::{Length, ResolvedProgression, Style};
