//! Hand-authored progression templates
//!
//! Each (style, length) bucket holds a few primary templates, cycled through by
//! regeneration, and a parallel set of alternatives offered next to the
//! generated progression.

use super::types::{Length, Style};

/// A template is a list of Roman numeral tokens, one per bar.
pub type Template = &'static [&'static str];

const POP_4: &[Template] = &[
    &["I", "V", "vi", "IV"],
    &["vi", "IV", "I", "V"],
    &["I", "vi", "IV", "V"],
    &["I", "V", "IV", "V"],
];
const POP_8: &[Template] = &[
    &["I", "V", "vi", "IV", "I", "V", "vi", "IV"],
    &["I", "vi", "IV", "V", "I", "V", "IV", "V"],
    &["vi", "IV", "I", "V", "IV", "V", "I", "V"],
];

const ROCK_4: &[Template] = &[
    &["I", "IV", "V", "I"],
    &["I", "IV", "I", "V"],
    &["I", "V", "IV", "I"],
    &["vi", "IV", "I", "V"],
];
const ROCK_8: &[Template] = &[
    &["I", "IV", "V", "I", "I", "IV", "V", "I"],
    &["I", "V", "IV", "I", "vi", "IV", "V", "I"],
];

const BLUES_4: &[Template] = &[&["I7", "IV7", "I7", "V7"]];
const BLUES_8: &[Template] = &[&["I7", "IV7", "I7", "I7", "IV7", "IV7", "I7", "V7"]];

const JAZZ_4: &[Template] = &[
    &["ii7", "V7", "Imaj7", "Imaj7"],
    &["ii7", "V7", "Imaj7", "VI7"],
    &["Imaj7", "vi7", "ii7", "V7"],
];
const JAZZ_8: &[Template] = &[
    &["ii7", "V7", "Imaj7", "VI7", "ii7", "V7", "Imaj7", "V7"],
    &["Imaj7", "vi7", "ii7", "V7", "Imaj7", "VI7", "ii7", "V7"],
];

const BALLAD_4: &[Template] = &[
    &["I", "vi", "IV", "V"],
    &["I", "V", "vi", "IV"],
    &["IV", "I", "V", "vi"],
];
const BALLAD_8: &[Template] = &[
    &["I", "vi", "IV", "V", "I", "V", "vi", "IV"],
    &["IV", "I", "V", "vi", "IV", "V", "I", "V"],
];

const ALT_POP_4: &[Template] = &[&["I", "IV", "V", "I"], &["vi", "V", "IV", "I"]];
const ALT_POP_8: &[Template] = &[
    &["I", "V", "vi", "IV", "IV", "V", "I", "V"],
    &["vi", "IV", "I", "V", "vi", "IV", "V", "I"],
];

const ALT_ROCK_4: &[Template] = &[&["I", "IV", "V", "IV"], &["I", "V", "IV", "V"]];
const ALT_ROCK_8: &[Template] = &[
    &["I", "IV", "I", "V", "I", "IV", "V", "I"],
    &["vi", "IV", "I", "V", "I", "IV", "V", "I"],
];

const ALT_BLUES_4: &[Template] = &[&["I7", "IV7", "V7", "I7"]];
const ALT_BLUES_8: &[Template] = &[&["I7", "IV7", "I7", "V7", "IV7", "IV7", "I7", "V7"]];

const ALT_JAZZ_4: &[Template] = &[&["ii7", "V7", "Imaj7", "V/V"], &["Imaj7", "VI7", "ii7", "V7"]];
const ALT_JAZZ_8: &[Template] = &[
    &["ii7", "V7", "Imaj7", "VI7", "ii7", "V7", "Imaj7", "V/V"],
    &["Imaj7", "VI7", "ii7", "V7", "Imaj7", "V/V", "ii7", "V7"],
];

const ALT_BALLAD_4: &[Template] = &[&["I", "V", "IV", "I"], &["vi", "IV", "I", "V"]];
const ALT_BALLAD_8: &[Template] = &[
    &["I", "V", "vi", "IV", "I", "V", "IV", "I"],
    &["vi", "IV", "I", "V", "IV", "I", "V", "vi"],
];

/// Primary templates for a bucket. Never empty.
pub fn templates(style: Style, length: Length) -> &'static [Template] {
    match (style, length) {
        (Style::Pop, Length::Four) => POP_4,
        (Style::Pop, Length::Eight) => POP_8,
        (Style::Rock, Length::Four) => ROCK_4,
        (Style::Rock, Length::Eight) => ROCK_8,
        (Style::Blues, Length::Four) => BLUES_4,
        (Style::Blues, Length::Eight) => BLUES_8,
        (Style::Jazz, Length::Four) => JAZZ_4,
        (Style::Jazz, Length::Eight) => JAZZ_8,
        (Style::Ballad, Length::Four) => BALLAD_4,
        (Style::Ballad, Length::Eight) => BALLAD_8,
    }
}

/// Alternative suggestions for a bucket. Never empty.
pub fn alt_templates(style: Style, length: Length) -> &'static [Template] {
    match (style, length) {
        (Style::Pop, Length::Four) => ALT_POP_4,
        (Style::Pop, Length::Eight) => ALT_POP_8,
        (Style::Rock, Length::Four) => ALT_ROCK_4,
        (Style::Rock, Length::Eight) => ALT_ROCK_8,
        (Style::Blues, Length::Four) => ALT_BLUES_4,
        (Style::Blues, Length::Eight) => ALT_BLUES_8,
        (Style::Jazz, Length::Four) => ALT_JAZZ_4,
        (Style::Jazz, Length::Eight) => ALT_JAZZ_8,
        (Style::Ballad, Length::Four) => ALT_BALLAD_4,
        (Style::Ballad, Length::Eight) => ALT_BALLAD_8,
    }
}
