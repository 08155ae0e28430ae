//! # Ear Training
//!
//! Quiz questions for recognising intervals, chord qualities and short
//! progressions, with the notes a player needs to sound each question.
//!
//! Randomness comes from a caller-supplied [`rand::Rng`], so a seeded generator
//! gives a reproducible quiz.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use tonehouse::ear_training::{Difficulty, Quiz, QuizMode};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut quiz = Quiz::new(QuizMode::Chords, Difficulty::Beginner);
//! let answer = quiz.next_question(&mut rng).correct_answer();
//! assert_eq!(quiz.answer(answer), Some(true));
//! assert_eq!(quiz.score().correct, 1);
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chord::ChordQuality;
use crate::error::TheoryError;
use crate::harmony::{build_diatonic_chords, Tonality};
use crate::note::{Note, PitchClass};

/// Octave questions are played in.
const QUESTION_OCTAVE: i8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
}

impl FromStr for Difficulty {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            _ => Err(TheoryError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => f.pad("Beginner"),
            Difficulty::Intermediate => f.pad("Intermediate"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum QuizMode {
    #[default]
    Intervals,
    Chords,
    Progressions,
}

impl FromStr for QuizMode {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intervals" | "interval" => Ok(QuizMode::Intervals),
            "chords" | "chord" => Ok(QuizMode::Chords),
            "progressions" | "progression" => Ok(QuizMode::Progressions),
            _ => Err(TheoryError::UnknownQuizMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntervalOption {
    pub label: &'static str,
    pub semitones: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressionPattern {
    pub label: &'static str,
    /// 1-based scale degrees in a major key.
    pub degrees: &'static [usize],
}

const fn interval(label: &'static str, semitones: u8) -> IntervalOption {
    IntervalOption { label, semitones }
}

const BEGINNER_INTERVALS: &[IntervalOption] = &[
    interval("Unison", 0),
    interval("m2", 1),
    interval("M2", 2),
    interval("m3", 3),
    interval("M3", 4),
    interval("P4", 5),
    interval("P5", 7),
    interval("Octave", 12),
];

const INTERMEDIATE_INTERVALS: &[IntervalOption] = &[
    interval("Unison", 0),
    interval("m2", 1),
    interval("M2", 2),
    interval("m3", 3),
    interval("M3", 4),
    interval("P4", 5),
    interval("Tritone", 6),
    interval("P5", 7),
    interval("m6", 8),
    interval("M6", 9),
    interval("m7", 10),
    interval("M7", 11),
    interval("Octave", 12),
];

const BEGINNER_QUALITIES: &[ChordQuality] = &[ChordQuality::Major, ChordQuality::Minor];

const INTERMEDIATE_QUALITIES: &[ChordQuality] = &[
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Augmented,
    ChordQuality::Dominant7,
];

const BEGINNER_PATTERNS: &[ProgressionPattern] = &[
    ProgressionPattern { label: "I–IV–V–I", degrees: &[1, 4, 5, 1] },
    ProgressionPattern { label: "I–V–vi–IV", degrees: &[1, 5, 6, 4] },
];

const INTERMEDIATE_PATTERNS: &[ProgressionPattern] = &[
    ProgressionPattern { label: "ii–V–I", degrees: &[2, 5, 1] },
    ProgressionPattern { label: "vi–IV–I–V", degrees: &[6, 4, 1, 5] },
];

impl Difficulty {
    pub fn intervals(self) -> &'static [IntervalOption] {
        match self {
            Difficulty::Beginner => BEGINNER_INTERVALS,
            Difficulty::Intermediate => INTERMEDIATE_INTERVALS,
        }
    }

    pub fn chord_qualities(self) -> &'static [ChordQuality] {
        match self {
            Difficulty::Beginner => BEGINNER_QUALITIES,
            Difficulty::Intermediate => INTERMEDIATE_QUALITIES,
        }
    }

    pub fn progression_patterns(self) -> &'static [ProgressionPattern] {
        match self {
            Difficulty::Beginner => BEGINNER_PATTERNS,
            Difficulty::Intermediate => INTERMEDIATE_PATTERNS,
        }
    }

    /// Answer labels offered for a quiz mode.
    pub fn choices(self, mode: QuizMode) -> Vec<&'static str> {
        match mode {
            QuizMode::Intervals => self.intervals().iter().map(|i| i.label).collect(),
            QuizMode::Chords => self.chord_qualities().iter().map(|q| q.label()).collect(),
            QuizMode::Progressions => self.progression_patterns().iter().map(|p| p.label).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Question {
    Interval {
        root: PitchClass,
        octave: i8,
        interval: IntervalOption,
    },
    Chord {
        root: PitchClass,
        octave: i8,
        quality: ChordQuality,
    },
    Progression {
        key: PitchClass,
        pattern: ProgressionPattern,
    },
}

fn pick<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Chord tones stacked upward from a root note.
fn chord_notes(root: Note, quality: ChordQuality) -> Vec<Note> {
    quality
        .intervals()
        .iter()
        .map(|&offset| root.add_semitones(offset as i32))
        .collect()
}

/// Draw a random question for the mode and difficulty.
pub fn generate_question<R: Rng + ?Sized>(mode: QuizMode, difficulty: Difficulty, rng: &mut R) -> Question {
    match mode {
        QuizMode::Intervals => Question::Interval {
            root: pick(&PitchClass::ALL, rng),
            octave: QUESTION_OCTAVE,
            interval: pick(difficulty.intervals(), rng),
        },
        QuizMode::Chords => Question::Chord {
            root: pick(&PitchClass::ALL, rng),
            octave: QUESTION_OCTAVE,
            quality: pick(difficulty.chord_qualities(), rng),
        },
        QuizMode::Progressions => Question::Progression {
            key: pick(&PitchClass::NATURALS, rng),
            pattern: pick(difficulty.progression_patterns(), rng),
        },
    }
}

impl Question {
    pub fn mode(&self) -> QuizMode {
        match self {
            Question::Interval { .. } => QuizMode::Intervals,
            Question::Chord { .. } => QuizMode::Chords,
            Question::Progression { .. } => QuizMode::Progressions,
        }
    }

    pub fn correct_answer(&self) -> &'static str {
        match self {
            Question::Interval { interval, .. } => interval.label,
            Question::Chord { quality, .. } => quality.label(),
            Question::Progression { pattern, .. } => pattern.label,
        }
    }

    /// Notes to sound, grouped by onset: each inner vector is played together.
    ///
    /// Intervals are two single notes in sequence, a chord is one group, and a
    /// progression is one group per degree (major key, octave 3).
    pub fn playback_notes(&self) -> Vec<Vec<Note>> {
        match *self {
            Question::Interval { root, octave, interval } => {
                let start = Note::new(root, octave);
                vec![vec![start], vec![start.add_semitones(interval.semitones as i32)]]
            }
            Question::Chord { root, octave, quality } => {
                vec![chord_notes(Note::new(root, octave), quality)]
            }
            Question::Progression { key, pattern } => {
                let degrees = build_diatonic_chords(key, Tonality::Major);
                pattern
                    .degrees
                    .iter()
                    .filter_map(|&degree| degrees.get(degree.checked_sub(1)?))
                    .map(|chord| chord_notes(Note::new(chord.root, QUESTION_OCTAVE), chord.quality))
                    .collect()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

/// A running quiz: current question, whether it has been answered, and the score.
///
/// Only the first answer to a question counts. Changing the mode or difficulty
/// clears the question and the score.
#[derive(Debug, Clone, Default)]
pub struct Quiz {
    mode: QuizMode,
    difficulty: Difficulty,
    question: Option<Question>,
    selected: Option<String>,
    score: Score,
}

impl Quiz {
    pub fn new(mode: QuizMode, difficulty: Difficulty) -> Self {
        Quiz {
            mode,
            difficulty,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn choices(&self) -> Vec<&'static str> {
        self.difficulty.choices(self.mode)
    }

    pub fn set_mode(&mut self, mode: QuizMode) {
        self.mode = mode;
        self.reset();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.reset();
    }

    fn reset(&mut self) {
        self.question = None;
        self.selected = None;
        self.score = Score::default();
    }

    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &Question {
        self.selected = None;
        self.question
            .insert(generate_question(self.mode, self.difficulty, rng))
    }

    /// Record an answer. Returns whether it was right, or `None` when there is
    /// no question or it was already answered.
    pub fn answer(&mut self, choice: &str) -> Option<bool> {
        let question = self.question.as_ref()?;
        if self.selected.is_some() {
            return None;
        }
        let is_correct = choice == question.correct_answer();
        self.selected = Some(choice.to_string());
        self.score.total += 1;
        if is_correct {
            self.score.correct += 1;
        }
        tracing::debug!(choice, is_correct, "quiz answer");
        Some(is_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_option_tables() {
        assert_eq!(Difficulty::Beginner.intervals().len(), 8);
        assert_eq!(Difficulty::Intermediate.intervals().len(), 13);
        assert_eq!(
            Difficulty::Intermediate.choices(QuizMode::Chords),
            vec!["Major", "Minor", "Diminished", "Augmented", "Dominant 7"]
        );
        assert_eq!(
            Difficulty::Beginner.choices(QuizMode::Progressions),
            vec!["I–IV–V–I", "I–V–vi–IV"]
        );
    }

    #[test]
    fn test_generated_questions_use_difficulty_tables() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            match generate_question(QuizMode::Intervals, Difficulty::Beginner, &mut rng) {
                Question::Interval { octave, interval, .. } => {
                    assert_eq!(octave, 3);
                    assert!(BEGINNER_INTERVALS.contains(&interval));
                }
                other => panic!("unexpected question {:?}", other),
            }
            match generate_question(QuizMode::Progressions, Difficulty::Intermediate, &mut rng) {
                Question::Progression { key, pattern } => {
                    assert!(PitchClass::NATURALS.contains(&key));
                    assert!(INTERMEDIATE_PATTERNS.contains(&pattern));
                }
                other => panic!("unexpected question {:?}", other),
            }
        }
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a: Vec<Question> = {
            let mut rng = StdRng::seed_from_u64(9);
            (0..10).map(|_| generate_question(QuizMode::Chords, Difficulty::Intermediate, &mut rng)).collect()
        };
        let b: Vec<Question> = {
            let mut rng = StdRng::seed_from_u64(9);
            (0..10).map(|_| generate_question(QuizMode::Chords, Difficulty::Intermediate, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_interval_playback() {
        let question = Question::Interval {
            root: PitchClass::A,
            octave: 3,
            interval: interval("m3", 3),
        };
        let notes = question.playback_notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0][0].to_string(), "A3");
        assert_eq!(notes[1][0].to_string(), "C4");
        assert_eq!(question.correct_answer(), "m3");
    }

    #[test]
    fn test_chord_playback_crosses_octave() {
        let question = Question::Chord {
            root: PitchClass::B,
            octave: 3,
            quality: ChordQuality::Dominant7,
        };
        let labels: Vec<String> = question.playback_notes()[0].iter().map(|n| n.to_string()).collect();
        assert_eq!(labels, vec!["B3", "D#4", "F#4", "A4"]);
    }

    #[test]
    fn test_progression_playback() {
        let question = Question::Progression {
            key: PitchClass::C,
            pattern: BEGINNER_PATTERNS[1],
        };
        let groups = question.playback_notes();
        assert_eq!(groups.len(), 4);
        let roots: Vec<String> = groups.iter().map(|g| g[0].to_string()).collect();
        assert_eq!(roots, vec!["C3", "G3", "A3", "F3"]);
        // vi is minor: A C E
        assert_eq!(groups[2][1].to_string(), "C4");
    }

    #[test]
    fn test_quiz_scores_first_answer_only() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut quiz = Quiz::new(QuizMode::Intervals, Difficulty::Intermediate);
        assert_eq!(quiz.answer("P5"), None);

        let correct = quiz.next_question(&mut rng).correct_answer();
        assert_eq!(quiz.answer(correct), Some(true));
        assert_eq!(quiz.answer(correct), None);

        quiz.next_question(&mut rng);
        assert_eq!(quiz.answer("not an interval"), Some(false));
        assert_eq!(quiz.score(), Score { correct: 1, total: 2 });

        quiz.set_difficulty(Difficulty::Beginner);
        assert_eq!(quiz.score(), Score::default());
        assert!(quiz.question().is_none());
    }

    #[test]
    fn test_question_serializes_with_mode_tag() {
        let question = Question::Chord {
            root: PitchClass::D,
            octave: 3,
            quality: ChordQuality::Minor,
        };
        let json = serde_json::to_string(&question).unwrap();
        assert_eq!(json, r#"{"mode":"chord","root":"D","octave":3,"quality":"Minor"}"#);
    }
}
