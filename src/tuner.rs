//! # Tuner
//!
//! Frequency to note conversion and a basic autocorrelation pitch detector.
//!
//! ```rust
//! use tonehouse::tuner::TunerReading;
//!
//! let reading = TunerReading::from_frequency(442.0).unwrap();
//! assert_eq!(reading.note, "A4");
//! assert_eq!(reading.cents, 7);
//! assert!(TunerReading::from_frequency(0.0).is_none());
//! ```

use serde::Serialize;

use crate::note::{Note, A4_FREQUENCY, A4_MIDI};

/// Below this RMS level the buffer is treated as silence.
const SILENCE_RMS: f32 = 0.01;

/// Leading and trailing samples quieter than this are trimmed before correlation.
const TRIM_THRESHOLD: f32 = 0.2;

/// Nearest MIDI note number for a frequency.
pub fn note_from_frequency(frequency: f64) -> i32 {
    (12.0 * (frequency / A4_FREQUENCY).log2() + A4_MIDI as f64).round() as i32
}

pub fn frequency_from_note_number(note: i32) -> f64 {
    A4_FREQUENCY * 2f64.powf(note.saturating_sub(A4_MIDI) as f64 / 12.0)
}

/// How far `frequency` is from `note`, in whole cents (rounded down).
pub fn cents_off(frequency: f64, note: i32) -> i32 {
    (1200.0 * (frequency / frequency_from_note_number(note)).log2()).floor() as i32
}

/// Note name with octave for a MIDI number, e.g. `A4`.
pub fn note_label(note: i32) -> String {
    Note::from_midi(note).to_string()
}

/// Estimate the fundamental frequency of `buffer`.
///
/// Returns `None` for silence, a non-positive sample rate, or when no
/// periodicity is found.
pub fn autocorrelate(buffer: &[f32], sample_rate: f32) -> Option<f32> {
    if buffer.is_empty() || !(sample_rate.is_finite() && sample_rate > 0.0) {
        return None;
    }
    let rms = (buffer.iter().map(|s| s * s).sum::<f32>() / buffer.len() as f32).sqrt();
    if rms < SILENCE_RMS {
        return None;
    }

    // Odd lengths include the middle sample from both ends.
    let half = buffer.len().div_ceil(2);
    let mut start = 0;
    for (i, sample) in buffer.iter().enumerate().take(half) {
        if sample.abs() < TRIM_THRESHOLD {
            start = i;
        } else {
            break;
        }
    }
    let mut end = buffer.len() - 1;
    for i in 1..half {
        let idx = buffer.len() - i;
        if buffer[idx].abs() < TRIM_THRESHOLD {
            end = idx;
        } else {
            break;
        }
    }
    if end <= start {
        return None;
    }

    let trimmed = &buffer[start..end];
    let size = trimmed.len();
    let correlation: Vec<f32> = (0..size)
        .map(|lag| {
            trimmed[..size - lag]
                .iter()
                .zip(&trimmed[lag..])
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect();

    // Skip the initial fall-off from lag 0.
    let mut dip = 0;
    while dip + 1 < size && correlation[dip] > correlation[dip + 1] {
        dip += 1;
    }

    let mut peak_value = f32::MIN;
    let mut peak_lag = 0;
    for (lag, &value) in correlation.iter().enumerate().skip(dip) {
        if value > peak_value {
            peak_value = value;
            peak_lag = lag;
        }
    }

    if peak_lag == 0 {
        return None;
    }
    Some(sample_rate / peak_lag as f32)
}

/// Detected pitch, nearest note and deviation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TunerReading {
    pub frequency: f64,
    pub note_number: i32,
    pub note: String,
    /// Negative is flat, positive is sharp.
    pub cents: i32,
}

impl TunerReading {
    /// `None` unless the frequency is finite and positive.
    pub fn from_frequency(frequency: f64) -> Option<Self> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return None;
        }
        let note_number = note_from_frequency(frequency);
        Some(TunerReading {
            frequency,
            note_number,
            note: note_label(note_number),
            cents: cents_off(frequency, note_number),
        })
    }

    /// Run pitch detection over an audio buffer.
    pub fn detect(buffer: &[f32], sample_rate: f32) -> Option<Self> {
        let frequency = autocorrelate(buffer, sample_rate)?;
        tracing::trace!(frequency, "pitch detected");
        TunerReading::from_frequency(frequency as f64)
    }
}
