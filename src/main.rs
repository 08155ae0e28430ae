use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use tonehouse::backing_track::{
    normalize_tempo, search_url, TrackInstrument, TrackRequest, TrackStyle, PRESETS,
};
use tonehouse::ear_training::{generate_question, Difficulty, QuizMode};
use tonehouse::metronome::Metronome;
use tonehouse::playback::{schedule_chord, ChordPlayerOptions};
use tonehouse::progression::{Length, ProgressionSession, Style};
use tonehouse::settings::Settings;
use tonehouse::tuner::TunerReading;
use tonehouse::voicing::{bass_position, fretboard, guitar_shapes, instrument_voicing, Instrument};
use tonehouse::{
    build_chord, build_diatonic_chords, build_scale, chord_name, inversions, resolve_progression,
    resolve_progression_strict, ChordQuality, PitchClass, ScaleQuality, Tonality,
};

#[derive(Parser, Debug)]
#[command(name = "tonehouse", version, about = "Chords, scales, progressions and practice tools")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// YAML file with default key, style, instrument and tempo
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Chord tones, inversions and voicings
    Chord {
        root: PitchClass,
        quality: ChordQuality,
        #[arg(long)]
        instrument: Option<Instrument>,
    },
    /// Scale notes
    Scale { root: PitchClass, quality: ScaleQuality },
    /// The seven diatonic triads of a key
    Diatonic {
        root: PitchClass,
        #[arg(long)]
        minor: bool,
    },
    /// Generate a progression from the built-in templates
    Progression {
        #[arg(long)]
        root: Option<PitchClass>,
        #[arg(long)]
        tonality: Option<Tonality>,
        #[arg(long)]
        style: Option<Style>,
        #[arg(long)]
        length: Option<Length>,
        /// Template variant, cycling through the style's templates
        #[arg(long, default_value_t = 0)]
        variant: usize,
        /// Also print alternative progressions
        #[arg(long)]
        alt: bool,
    },
    /// Resolve Roman numerals in a key
    Resolve {
        root: PitchClass,
        #[arg(required = true)]
        tokens: Vec<String>,
        #[arg(long)]
        minor: bool,
        /// Fail on numerals outside the diatonic set
        #[arg(long)]
        strict: bool,
    },
    /// Scale notes marked on each string
    Fretboard {
        root: PitchClass,
        quality: ScaleQuality,
        #[arg(long)]
        instrument: Option<Instrument>,
    },
    /// Draw an ear-training question
    Quiz {
        mode: QuizMode,
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Nearest note and cents offset for a frequency
    Tuner { frequency: f64 },
    /// Print the first clicks of a metronome run
    Metronome {
        #[arg(long)]
        bpm: Option<u16>,
        #[arg(long)]
        beats_per_bar: Option<u8>,
        #[arg(long, default_value_t = 8)]
        clicks: usize,
    },
    /// Schedule notes such as C4 E4 G4 for playback
    Play {
        #[arg(required = true)]
        notes: Vec<String>,
        #[arg(long, default_value_t = 0.0)]
        arpeggiate_ms: f64,
        /// Master gain, 0 to 1
        #[arg(long)]
        gain: Option<f64>,
    },
    /// Build a backing track search query
    BackingTrack {
        #[arg(long, default_value = "guitar")]
        instrument: TrackInstrument,
        #[arg(long, default_value = "blues")]
        style: TrackStyle,
        #[arg(long, default_value = "A")]
        key: String,
        /// BPM, rounded and clamped to 40-240; omit for any tempo
        #[arg(long, default_value = "")]
        tempo: String,
        /// Use a preset (1-6) instead of the other options
        #[arg(long)]
        preset: Option<usize>,
    },
    /// Print the effective settings
    Settings,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn join<T: ToString>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

fn tonality(minor: bool) -> Tonality {
    if minor {
        Tonality::Minor
    } else {
        Tonality::Major
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = match &cli.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    match cli.command {
        Command::Chord { root, quality, instrument } => {
            let instrument = instrument.unwrap_or(settings.instrument);
            let tones = build_chord(root, quality);
            let voicing = instrument_voicing(&tones, instrument);
            let shapes = guitar_shapes(root, quality);
            let bass = bass_position(root, &tones);
            let name = chord_name(root, quality);
            let inverted = inversions(&tones);

            if cli.json {
                return emit(&json!({
                    "name": name,
                    "tones": tones,
                    "inversions": inverted,
                    "instrument": instrument,
                    "voicing": voicing,
                    "guitarShapes": shapes,
                    "bass": bass,
                }));
            }
            println!("{} ({} {})", name, root, quality.label());
            println!("Tones: {}", join(&tones));
            for (i, inversion) in inverted.iter().enumerate() {
                println!("Inversion {}: {}", i + 1, join(inversion));
            }
            println!("{} voicing: {}", instrument, join(&voicing));
            match instrument {
                Instrument::Guitar if !shapes.is_empty() => {
                    println!("Shapes: {}", shapes.join(", "))
                }
                Instrument::Bass => println!("{}", bass),
                _ => {}
            }
        }
        Command::Scale { root, quality } => {
            let notes = build_scale(root, quality);
            if cli.json {
                return emit(&json!({ "root": root, "quality": quality, "notes": notes }));
            }
            println!("{} {}: {}", root, quality.label(), join(&notes));
        }
        Command::Diatonic { root, minor } => {
            let degrees = build_diatonic_chords(root, tonality(minor));
            if cli.json {
                return emit(&degrees);
            }
            for degree in &degrees {
                println!("{:<5} {}", degree.numeral, chord_name(degree.root, degree.quality));
            }
        }
        Command::Progression { root, tonality, style, length, variant, alt } => {
            let mut session = ProgressionSession::new(
                root.unwrap_or(settings.root),
                tonality.unwrap_or(settings.tonality),
                style.unwrap_or(settings.style),
                length.unwrap_or(settings.length),
            );
            session.generate();
            for _ in 0..variant {
                session.regenerate();
            }
            let progression = session.current().cloned().unwrap_or_default();
            let alternatives = if alt { session.alt_suggestions() } else { Vec::new() };

            if cli.json {
                return emit(&json!({
                    "session": session,
                    "progression": progression,
                    "alternatives": alternatives,
                }));
            }
            println!(
                "{} {} {}, {}",
                session.root(),
                session.tonality(),
                session.style(),
                session.length()
            );
            println!("{}", progression.roman_numerals.join(" - "));
            println!("{}", progression.chords.join(" - "));
            for suggestion in &alternatives {
                println!("Alt: {}  ({})", suggestion.chords.join(" - "), suggestion.roman_numerals.join(" "));
            }
        }
        Command::Resolve { root, tokens, minor, strict } => {
            let progression = if strict {
                resolve_progression_strict(&tokens, root, tonality(minor))?
            } else {
                resolve_progression(&tokens, root, tonality(minor))
            };
            if cli.json {
                return emit(&progression);
            }
            println!("{}", progression.chords.join(" - "));
        }
        Command::Fretboard { root, quality, instrument } => {
            let instrument = instrument.unwrap_or(settings.instrument);
            let strings = fretboard(&build_scale(root, quality), instrument);
            if cli.json {
                return emit(&strings);
            }
            println!("{} {} on {}", root, quality.label(), instrument);
            for string in &strings {
                println!("{}", string);
            }
        }
        Command::Quiz { mode, difficulty, seed } => {
            let difficulty = difficulty.unwrap_or(settings.difficulty);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let question = generate_question(mode, difficulty, &mut rng);
            let choices = difficulty.choices(mode);
            let notes = question.playback_notes();

            if cli.json {
                return emit(&json!({
                    "question": question,
                    "choices": choices,
                    "playback": notes,
                    "answer": question.correct_answer(),
                }));
            }
            let groups: Vec<String> = notes.iter().map(|group| join(group)).collect();
            println!("Listen: {}", groups.join(" | "));
            println!("Choices: {}", choices.join(", "));
            println!("Answer: {}", question.correct_answer());
        }
        Command::Tuner { frequency } => {
            let reading = TunerReading::from_frequency(frequency)
                .with_context(|| format!("frequency must be positive, got {}", frequency))?;
            if cli.json {
                return emit(&reading);
            }
            println!("{} ({:+} cents)", reading.note, reading.cents);
        }
        Command::Metronome { bpm, beats_per_bar, clicks } => {
            let mut metronome = Metronome::new(
                bpm.unwrap_or(settings.bpm),
                beats_per_bar.unwrap_or(settings.beats_per_bar),
            );
            metronome.start(0.0);
            let mut scheduled = Vec::with_capacity(clicks);
            let mut now = 0.0;
            while scheduled.len() < clicks {
                scheduled.extend(metronome.schedule(now));
                now += 0.025;
            }
            scheduled.truncate(clicks);

            if cli.json {
                return emit(&scheduled);
            }
            println!("{} BPM, {} beats per bar", metronome.bpm(), metronome.beats_per_bar());
            for click in &scheduled {
                println!(
                    "{:>7.3}s  beat {}{}",
                    click.time,
                    click.beat + 1,
                    if click.accent { "  (accent)" } else { "" }
                );
            }
        }
        Command::Play { notes, arpeggiate_ms, gain } => {
            let defaults = ChordPlayerOptions::default();
            let options = ChordPlayerOptions {
                arpeggiate_ms,
                gain: gain.unwrap_or(defaults.gain),
                ..defaults
            };
            let schedule = schedule_chord(&notes, options, 0.0)?;
            if cli.json {
                return emit(&schedule);
            }
            println!("Master gain {:.2}", schedule.gain);
            for tone in &schedule.tones {
                println!(
                    "{:<4} {:>8.2} Hz  {:.3}s - {:.3}s",
                    tone.note.to_string(),
                    tone.frequency,
                    tone.start,
                    tone.stop
                );
            }
        }
        Command::BackingTrack { instrument, style, key, tempo, preset } => {
            let request = match preset {
                Some(n) => n
                    .checked_sub(1)
                    .and_then(|i| PRESETS.get(i))
                    .map(|p| p.request())
                    .with_context(|| format!("no preset {} (expected 1-{})", n, PRESETS.len()))?,
                None => TrackRequest::new(instrument, style, &key, normalize_tempo(&tempo))?,
            };
            let query = request.query();
            let url = search_url(&query)?;
            if cli.json {
                return emit(&json!({ "request": request, "query": query, "url": url.as_str() }));
            }
            println!("{}", query);
            println!("{}", url);
        }
        Command::Settings => {
            if cli.json {
                return emit(&settings.to_raw());
            }
            print!("{}", settings.to_yaml()?);
        }
    }

    Ok(())
}
