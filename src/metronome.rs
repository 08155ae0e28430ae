//! # Metronome
//!
//! Click scheduling with a look-ahead window. The caller polls
//! [`Metronome::schedule`] with the audio clock's current time and hands the
//! returned clicks to its audio layer; clicks are never emitted twice.
//!
//! ```rust
//! use tonehouse::metronome::Metronome;
//!
//! let mut metronome = Metronome::new(120, 4);
//! metronome.start(0.0);
//! let clicks = metronome.schedule(0.0);
//! assert_eq!(clicks.len(), 1);
//! assert!(clicks[0].accent);
//! ```

use serde::Serialize;

pub const MIN_BPM: u16 = 40;
pub const MAX_BPM: u16 = 220;
pub const MIN_BEATS_PER_BAR: u8 = 2;
pub const MAX_BEATS_PER_BAR: u8 = 7;

/// Delay between `start` and the first click, in seconds.
const START_DELAY: f64 = 0.05;

/// How far ahead of the current time clicks are scheduled, in seconds.
const SCHEDULE_AHEAD: f64 = 0.1;

const ACCENT_FREQUENCY: f64 = 1200.0;
const BEAT_FREQUENCY: f64 = 800.0;
const ACCENT_GAIN: f64 = 0.6;
const BEAT_GAIN: f64 = 0.4;

/// Click envelope: peak after 1 ms, silent at 30 ms, oscillator stops at 40 ms.
const CLICK_ATTACK: f64 = 0.001;
const CLICK_DECAY: f64 = 0.03;
const CLICK_LENGTH: f64 = 0.04;

pub fn clamp_bpm(bpm: u16) -> u16 {
    bpm.clamp(MIN_BPM, MAX_BPM)
}

pub fn seconds_per_beat(bpm: u16) -> f64 {
    60.0 / clamp_bpm(bpm) as f64
}

/// One metronome click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Click {
    /// Start time on the caller's clock, in seconds.
    pub time: f64,
    /// Beat within the bar, 0-based.
    pub beat: u8,
    /// First beat of the bar.
    pub accent: bool,
    pub frequency: f64,
    /// Peak level, reached at `peak`.
    pub gain: f64,
    pub peak: f64,
    /// Silent from here.
    pub end: f64,
    pub stop: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metronome {
    bpm: u16,
    beats_per_bar: u8,
    next_click: Option<f64>,
    beat_count: u64,
}

impl Metronome {
    /// Values outside 40–220 BPM and 2–7 beats per bar are clamped.
    pub fn new(bpm: u16, beats_per_bar: u8) -> Self {
        Metronome {
            bpm: clamp_bpm(bpm),
            beats_per_bar: beats_per_bar.clamp(MIN_BEATS_PER_BAR, MAX_BEATS_PER_BAR),
            next_click: None,
            beat_count: 0,
        }
    }

    pub fn bpm(&self) -> u16 {
        self.bpm
    }

    pub fn beats_per_bar(&self) -> u8 {
        self.beats_per_bar
    }

    /// Tempo changes apply from the next scheduled click.
    pub fn set_bpm(&mut self, bpm: u16) {
        self.bpm = clamp_bpm(bpm);
    }

    pub fn is_running(&self) -> bool {
        self.next_click.is_some()
    }

    pub fn start(&mut self, now: f64) {
        self.beat_count = 0;
        self.next_click = Some(now + START_DELAY);
        tracing::debug!(bpm = self.bpm, beats_per_bar = self.beats_per_bar, "metronome started");
    }

    pub fn stop(&mut self) {
        self.next_click = None;
    }

    /// Clicks due before `now` plus the look-ahead window.
    pub fn schedule(&mut self, now: f64) -> Vec<Click> {
        let mut clicks = Vec::new();
        let Some(mut time) = self.next_click else {
            return clicks;
        };
        let step = seconds_per_beat(self.bpm);
        while time < now + SCHEDULE_AHEAD {
            let beat = (self.beat_count % self.beats_per_bar as u64) as u8;
            let accent = beat == 0;
            clicks.push(Click {
                time,
                beat,
                accent,
                frequency: if accent { ACCENT_FREQUENCY } else { BEAT_FREQUENCY },
                gain: if accent { ACCENT_GAIN } else { BEAT_GAIN },
                peak: time + CLICK_ATTACK,
                end: time + CLICK_DECAY,
                stop: time + CLICK_LENGTH,
            });
            time += step;
            self.beat_count += 1;
        }
        self.next_click = Some(time);
        clicks
    }
}
