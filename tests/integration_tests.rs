//! Integration tests for the theory engine
//!
//! Exercises the public API end to end: builders, diatonic harmony and the
//! progression engine across every key.

use tonehouse::progression::{alt_templates, templates, Length, ProgressionSession, Style};
use tonehouse::settings::Settings;
use tonehouse::{
    build_chord, build_diatonic_chords, build_scale, chord_tones, resolve_progression,
    resolve_progression_strict, scale_tones, transpose_note, ChordQuality, PitchClass,
    ScaleQuality, Tonality,
};

#[test]
fn test_chords_start_on_root_with_fixed_size() {
    for root in PitchClass::ALL {
        for quality in ChordQuality::ALL {
            let tones = build_chord(root, quality);
            assert_eq!(tones.len(), quality.intervals().len(), "{} {}", root, quality);
            assert_eq!(tones[0], root);
        }
    }
}

#[test]
fn test_scales_start_on_root() {
    for root in PitchClass::ALL {
        for quality in ScaleQuality::ALL {
            let notes = build_scale(root, quality);
            assert_eq!(notes[0], root);
            assert!((5..=7).contains(&notes.len()));
            assert!(notes.iter().all(|n| PitchClass::ALL.contains(n)));
        }
    }
}

#[test]
fn test_unknown_names_fail_soft() {
    assert!(chord_tones("H", "Major").is_empty());
    assert!(chord_tones("C", "Hexachord").is_empty());
    assert!(scale_tones("C", "Lydian Dominant").is_empty());
    assert_eq!(chord_tones("Bb", "m7").len(), 4);
}

#[test]
fn test_diatonic_numerals_for_every_key() {
    for root in PitchClass::ALL {
        let major: Vec<_> = build_diatonic_chords(root, Tonality::Major)
            .iter()
            .map(|d| d.numeral)
            .collect();
        assert_eq!(major, ["I", "ii", "iii", "IV", "V", "vi", "vii°"]);

        let minor: Vec<_> = build_diatonic_chords(root, Tonality::Minor)
            .iter()
            .map(|d| d.numeral)
            .collect();
        assert_eq!(minor, ["i", "ii°", "III", "iv", "v", "VI", "VII"]);
    }
}

#[test]
fn test_transpose_round_trip() {
    for pitch in PitchClass::ALL {
        for n in -30..=30 {
            assert_eq!(transpose_note(transpose_note(pitch, n), -n), pitch);
        }
    }
}

#[test]
fn test_reference_progressions() {
    let pop = resolve_progression(&["I", "V", "vi", "IV"], PitchClass::C, Tonality::Major);
    assert_eq!(pop.chords, ["C", "G", "Am", "F"]);

    let blues = resolve_progression(&["I7", "IV7", "I7", "V7"], PitchClass::A, Tonality::Major);
    assert_eq!(blues.chords, ["A7", "D7", "A7", "E7"]);

    let jazz = resolve_progression(&["I", "V/V", "ii7", "V7"], PitchClass::C, Tonality::Major);
    assert_eq!(jazz.chords[1], "D7");
    assert_eq!(jazz.roman_numerals[1], "V/V");
}

#[test]
fn test_every_template_resolves_in_every_key() {
    for style in Style::ALL {
        for length in [Length::Four, Length::Eight] {
            let all = templates(style, length).iter().chain(alt_templates(style, length)).copied();
            for template in all {
                for root in PitchClass::ALL {
                    for tonality in [Tonality::Major, Tonality::Minor] {
                        let resolved = resolve_progression_strict(template, root, tonality)
                            .unwrap_or_else(|e| panic!("{:?} in {} {}: {}", template, root, tonality, e));
                        assert_eq!(resolved.len(), length.bars());
                    }
                }
            }
        }
    }
}

#[test]
fn test_builders_are_idempotent() {
    assert_eq!(
        build_chord(PitchClass::F, ChordQuality::Major7),
        build_chord(PitchClass::F, ChordQuality::Major7)
    );
    assert_eq!(
        build_diatonic_chords(PitchClass::G, Tonality::Minor),
        build_diatonic_chords(PitchClass::G, Tonality::Minor)
    );
    let template = ["i", "VI", "III", "VII"];
    assert_eq!(
        resolve_progression(&template, PitchClass::E, Tonality::Minor),
        resolve_progression(&template, PitchClass::E, Tonality::Minor)
    );
}

#[test]
fn test_session_from_settings() {
    let settings = Settings::from_yaml("root: Bb\nstyle: blues\nlength: 8\n").unwrap();
    let mut session =
        ProgressionSession::new(settings.root, settings.tonality, settings.style, settings.length);
    let progression = session.generate().clone();
    assert_eq!(progression.len(), 8);
    assert_eq!(progression.chords[0], "A#7");

    let json = serde_json::to_string(&progression).unwrap();
    assert!(json.contains("\"romanNumerals\""));
}
