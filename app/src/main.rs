use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tonewheel_player::{AudioHandle, Config};
use tonewheel_synth::Waveform;
use tonewheel_theory::{chord::Chord, pitch::Octave};
use tonewheel_widgets::{ChordPad, TileStrip, Wheel};

#[derive(Subcommand)]
enum Command {
    /// Spinnable circle of fifths; tap a key to hear its root note
    Wheel {
        /// Window size in pixels (the wheel keeps a square window)
        #[arg(long, default_value_t = 480)]
        size: u32,
    },
    /// Chord tiles with a text entry for adding more
    Pad {
        /// Comma-separated chord symbols the pad starts with
        #[arg(long, default_value = "C,Am,F,G7")]
        tiles: String,
    },
}

#[derive(Parser)]
#[command(name = "tonewheel")]
#[command(
    about = "Musical toy: spin the circle of fifths or strum chords from a pad"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Path to a ttf font (well-known system fonts are tried by default)
    #[arg(long)]
    font: Option<PathBuf>,
    #[arg(short, long, default_value_t = Waveform::Sine)]
    waveform: Waveform,
    /// How long each note rings, in seconds
    #[arg(long, default_value_t = 0.6)]
    duration_s: f32,
    #[arg(long, default_value_t = 0.01)]
    latency_s: f32,
}

/// A failed unlock leaves the toy silent but alive; a machine with no audio
/// device still gets a working window.
fn unlock(handle: &mut AudioHandle) {
    if let Err(e) = handle.unlock() {
        log::warn!("audio unlock failed: {}", e);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut handle = AudioHandle::new(
        cli.waveform,
        cli.duration_s,
        Config {
            target_latency_s: cli.latency_s,
        },
    );
    match cli.command {
        Command::Wheel { size } => {
            let mut wheel = Wheel::new(size, cli.font.as_deref())?;
            loop {
                wheel.tick()?;
                if wheel.take_pressed() {
                    unlock(&mut handle);
                }
                if let Some(label) = wheel.take_tapped() {
                    handle.play_note(label.pitch.in_octave(Octave::default()));
                }
            }
        }
        Command::Pad { tiles } => {
            let strip = TileStrip::with_symbols(tiles.split(','));
            let mut pad = ChordPad::new(strip, cli.font.as_deref())?;
            loop {
                pad.tick()?;
                if pad.take_pressed() {
                    unlock(&mut handle);
                }
                if let Some(symbol) = pad.take_tapped() {
                    match symbol.parse::<Chord>() {
                        Ok(chord) => handle.play_chord(chord),
                        Err(e) => log::debug!("{}", e),
                    }
                }
            }
        }
    }
}
