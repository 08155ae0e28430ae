//! Progression resolution and generation
//!
//! Resolves Roman numeral templates against the diatonic chords of a key and
//! keeps the round-robin state used when a user asks for another progression.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::roman::{degree_key, parse_roman};
use super::templates::{alt_templates, templates, Template};
use super::types::{Length, ResolvedProgression, Style};
use crate::chord::{chord_name, ChordQuality};
use crate::error::TheoryError;
use crate::harmony::{build_diatonic_chords, DiatonicDegree, Tonality};
use crate::note::PitchClass;

/// Number of alternatives shown beside a generated progression.
const ALT_SUGGESTION_COUNT: usize = 2;

fn lookup<'d>(degrees: &'d [DiatonicDegree], key: &str) -> Option<&'d DiatonicDegree> {
    degrees.iter().find(|d| degree_key(d.numeral) == key)
}

/// Resolve one token to a root and quality, or `None` when its degree is not
/// in the key.
fn resolve_token(token: &str, degrees: &[DiatonicDegree]) -> Option<(PitchClass, ChordQuality)> {
    let parsed = parse_roman(token);
    let key = parsed.secondary_of.as_deref().unwrap_or(&parsed.degree);
    let entry = lookup(degrees, key)?;

    if parsed.secondary_of.is_some() {
        // Secondary dominant: a fifth above the target degree.
        let quality = parsed.quality.unwrap_or(ChordQuality::Dominant7);
        return Some((entry.root.transpose(7), quality));
    }
    Some((entry.root, parsed.quality.unwrap_or(entry.quality)))
}

/// Stand-in for an unresolvable token: the key root treated as the degree,
/// keeping the token's quality override (Major otherwise).
fn fallback_chord(token: &str, key_root: PitchClass) -> (PitchClass, ChordQuality) {
    tracing::warn!(token, root = %key_root, "unresolvable numeral, using key root");
    let parsed = parse_roman(token);
    if parsed.secondary_of.is_some() {
        let quality = parsed.quality.unwrap_or(ChordQuality::Dominant7);
        return (key_root.transpose(7), quality);
    }
    (key_root, parsed.quality.unwrap_or(ChordQuality::Major))
}

fn resolve_with<S, E, F>(
    template: &[S],
    root: PitchClass,
    tonality: Tonality,
    mut on_miss: F,
) -> Result<ResolvedProgression, E>
where
    S: AsRef<str>,
    F: FnMut(&str) -> Result<(PitchClass, ChordQuality), E>,
{
    let degrees = build_diatonic_chords(root, tonality);
    let mut resolved = ResolvedProgression::default();
    for token in template {
        let token = token.as_ref();
        let (chord_root, quality) = match resolve_token(token, &degrees) {
            Some(chord) => chord,
            None => on_miss(token)?,
        };
        resolved.roman_numerals.push(token.to_string());
        resolved.chords.push(chord_name(chord_root, quality));
    }
    Ok(resolved)
}

/// Resolve a Roman numeral template to chord names in the key of `root`.
///
/// Tokens whose degree cannot be found resolve to the key root with Major
/// quality (or the token's seventh quality) and log a warning.
///
/// ```
/// use tonehouse::{resolve_progression, PitchClass, Tonality};
///
/// let result = resolve_progression(&["I", "V", "vi", "IV"], PitchClass::C, Tonality::Major);
/// assert_eq!(result.chords, vec!["C", "G", "Am", "F"]);
/// ```
pub fn resolve_progression<S: AsRef<str>>(
    template: &[S],
    root: PitchClass,
    tonality: Tonality,
) -> ResolvedProgression {
    let fallback = |token: &str| Ok::<_, Infallible>(fallback_chord(token, root));
    match resolve_with(template, root, tonality, fallback) {
        Ok(resolved) => resolved,
        Err(never) => match never {},
    }
}

/// Like [`resolve_progression`], but an unknown degree is an error.
pub fn resolve_progression_strict<S: AsRef<str>>(
    template: &[S],
    root: PitchClass,
    tonality: Tonality,
) -> Result<ResolvedProgression, TheoryError> {
    resolve_with(template, root, tonality, |token: &str| {
        Err(TheoryError::UnresolvedNumeral(token.to_string()))
    })
}

/// The template at `index` in a bucket, wrapping around.
pub fn template_at(style: Style, length: Length, index: usize) -> Template {
    let bucket = templates(style, length);
    bucket[index % bucket.len()]
}

/// Progression generator state: the selections plus the last result.
///
/// Regeneration walks the bucket's templates in order and wraps. Changing the
/// style or length starts the bucket again from its first template. Changing
/// the key re-resolves the current progression in the new key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionSession {
    root: PitchClass,
    tonality: Tonality,
    style: Style,
    length: Length,
    template_index: usize,
    last: Option<ResolvedProgression>,
}

impl Default for ProgressionSession {
    fn default() -> Self {
        ProgressionSession::new(PitchClass::C, Tonality::Major, Style::Pop, Length::Four)
    }
}

impl ProgressionSession {
    pub fn new(root: PitchClass, tonality: Tonality, style: Style, length: Length) -> Self {
        ProgressionSession {
            root,
            tonality,
            style,
            length,
            template_index: 0,
            last: None,
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn tonality(&self) -> Tonality {
        self.tonality
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn length(&self) -> Length {
        self.length
    }

    pub fn template_index(&self) -> usize {
        self.template_index
    }

    /// The most recently generated progression, if any.
    pub fn current(&self) -> Option<&ResolvedProgression> {
        self.last.as_ref()
    }

    /// Restore a previously generated progression, re-resolved in the current key.
    pub fn restore(&mut self, progression: ResolvedProgression) {
        self.last = Some(resolve_progression(
            &progression.roman_numerals,
            self.root,
            self.tonality,
        ));
    }

    pub fn set_key(&mut self, root: PitchClass, tonality: Tonality) {
        if root == self.root && tonality == self.tonality {
            return;
        }
        self.root = root;
        self.tonality = tonality;
        if let Some(last) = self.last.take() {
            self.restore(last);
        }
    }

    pub fn set_style(&mut self, style: Style) {
        if style != self.style {
            self.style = style;
            self.template_index = 0;
        }
    }

    pub fn set_length(&mut self, length: Length) {
        if length != self.length {
            self.length = length;
            self.template_index = 0;
        }
    }

    /// Resolve the template at the current index.
    pub fn generate(&mut self) -> &ResolvedProgression {
        self.produce(false)
    }

    /// Advance to the next template in the bucket (wrapping) and resolve it.
    pub fn regenerate(&mut self) -> &ResolvedProgression {
        self.produce(true)
    }

    fn produce(&mut self, next: bool) -> &ResolvedProgression {
        let count = templates(self.style, self.length).len();
        if next {
            self.template_index = (self.template_index + 1) % count;
        }
        let template = template_at(self.style, self.length, self.template_index);
        tracing::debug!(
            style = %self.style,
            bars = self.length.bars(),
            index = self.template_index,
            "generating progression"
        );
        self.last
            .insert(resolve_progression(template, self.root, self.tonality))
    }

    /// Alternatives for the current bucket; empty until something was generated.
    pub fn alt_suggestions(&self) -> Vec<ResolvedProgression> {
        if self.last.is_none() {
            return Vec::new();
        }
        alt_templates(self.style, self.length)
            .iter()
            .take(ALT_SUGGESTION_COUNT)
            .map(|template| resolve_progression(template, self.root, self.tonality))
            .collect()
    }
}
