//! # Chord Playback Scheduling
//!
//! Converts note names such as `C#4` into oscillator schedules for a platform
//! audio layer: frequency, start and stop times, and a short attack/decay
//! envelope per tone.

use serde::{Deserialize, Serialize};

use crate::error::TheoryError;
use crate::note::Note;

/// Time for a tone to reach full level, in seconds.
const ATTACK: f64 = 0.02;

/// Level a tone decays to at the end of its duration.
const RELEASE_FLOOR: f64 = 0.0001;

/// Extra time an oscillator keeps running after the decay, in seconds.
const STOP_PADDING: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChordPlayerOptions {
    /// Delay between successive tones; 0 plays them together.
    pub arpeggiate_ms: f64,
    pub duration_sec: f64,
    pub waveform: Waveform,
    /// Master gain applied to the whole chord.
    pub gain: f64,
}

impl Default for ChordPlayerOptions {
    fn default() -> Self {
        ChordPlayerOptions {
            arpeggiate_ms: 0.0,
            duration_sec: 1.4,
            waveform: Waveform::Sine,
            gain: 0.18,
        }
    }
}

/// One oscillator in a chord schedule. Times are seconds on the caller's clock.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTone {
    pub note: Note,
    pub frequency: f64,
    pub waveform: Waveform,
    pub start: f64,
    /// Full level reached here.
    pub peak: f64,
    /// Decayed to `release_level` here.
    pub end: f64,
    pub release_level: f64,
    pub stop: f64,
}

/// Tones of one chord and the master gain they all pass through.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSchedule {
    pub gain: f64,
    pub tones: Vec<ScheduledTone>,
}

impl ChordSchedule {
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

/// Schedule a chord starting at `now`.
///
/// Names that do not parse as notes are skipped; if none remain the request
/// fails with [`TheoryError::NoPlayableNotes`].
///
/// ```rust
/// use tonehouse::playback::{schedule_chord, ChordPlayerOptions};
///
/// let options = ChordPlayerOptions { arpeggiate_ms: 100.0, ..Default::default() };
/// let schedule = schedule_chord(&["C4", "E4", "G4"], options, 0.0)?;
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.gain, 0.18);
/// assert!((schedule.tones[2].start - 0.2).abs() < 1e-9);
/// # Ok::<(), tonehouse::TheoryError>(())
/// ```
pub fn schedule_chord<S: AsRef<str>>(
    names: &[S],
    options: ChordPlayerOptions,
    now: f64,
) -> Result<ChordSchedule, TheoryError> {
    let notes: Vec<Note> = names
        .iter()
        .filter_map(|name| match name.as_ref().parse::<Note>() {
            Ok(note) => Some(note),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unplayable note");
                None
            }
        })
        .collect();

    if notes.is_empty() {
        return Err(TheoryError::NoPlayableNotes);
    }

    let tones = notes
        .into_iter()
        .enumerate()
        .map(|(index, note)| {
            let offset = if options.arpeggiate_ms > 0.0 {
                options.arpeggiate_ms * index as f64 / 1000.0
            } else {
                0.0
            };
            let start = now + offset;
            let end = start + options.duration_sec;
            ScheduledTone {
                note,
                frequency: note.frequency(),
                waveform: options.waveform,
                start,
                peak: start + ATTACK,
                end,
                release_level: RELEASE_FLOOR,
                stop: end + STOP_PADDING,
            }
        })
        .collect();

    Ok(ChordSchedule { gain: options.gain, tones })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_chord() {
        let schedule = schedule_chord(&["A4", "C#5", "E5"], ChordPlayerOptions::default(), 2.0).unwrap();
        assert_eq!(schedule.gain, 0.18);
        let tones = schedule.tones;
        assert_eq!(tones.len(), 3);
        assert!(tones.iter().all(|t| t.start == 2.0));
        assert!((tones[0].frequency - 440.0).abs() < 1e-9);
        assert!((tones[0].end - 3.4).abs() < 1e-9);
        assert!((tones[0].stop - 3.45).abs() < 1e-9);
        assert!((tones[0].peak - 2.02).abs() < 1e-9);
        assert_eq!(tones[0].release_level, 0.0001);
    }

    #[test]
    fn test_gain_reaches_schedule() {
        let quiet = ChordPlayerOptions { gain: 0.01, ..Default::default() };
        let loud = ChordPlayerOptions { gain: 0.9, ..Default::default() };
        let a = schedule_chord(&["C4"], quiet, 0.0).unwrap();
        let b = schedule_chord(&["C4"], loud, 0.0).unwrap();
        assert_eq!(a.gain, 0.01);
        assert_eq!(b.gain, 0.9);
        assert_ne!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    #[test]
    fn test_invalid_names_are_skipped() {
        let schedule = schedule_chord(&["C4", "nope", "G"], ChordPlayerOptions::default(), 0.0).unwrap();
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.tones[0].note.to_string(), "C4");
    }

    #[test]
    fn test_nothing_playable() {
        let err = schedule_chord(&["x", "C"], ChordPlayerOptions::default(), 0.0).unwrap_err();
        assert_eq!(err, TheoryError::NoPlayableNotes);
        assert!(schedule_chord::<&str>(&[], ChordPlayerOptions::default(), 0.0).is_err());
    }

    #[test]
    fn test_options_from_json() {
        let options: ChordPlayerOptions =
            serde_json::from_str(r#"{"arpeggiateMs": 40, "waveform": "triangle"}"#).unwrap();
        assert_eq!(options.arpeggiate_ms, 40.0);
        assert_eq!(options.waveform, Waveform::Triangle);
        assert_eq!(options.duration_sec, 1.4);
    }
}
