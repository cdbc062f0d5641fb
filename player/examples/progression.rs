use anyhow::anyhow;
use std::{thread, time::Duration};
use tonewheel_player::{AudioHandle, Config};
use tonewheel_synth::Waveform;
use tonewheel_theory::chord::Chord;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut handle = AudioHandle::new(Waveform::Sine, 0.6, Config::default());
    handle.unlock()?;
    for symbol in ["C", "Am", "F", "G7"] {
        let chord: Chord = symbol.parse().map_err(|e: String| anyhow!(e))?;
        log::info!("strum {}", chord);
        handle.play_chord(chord);
        thread::sleep(Duration::from_millis(800));
    }
    while !handle.is_idle() {
        thread::sleep(Duration::from_millis(50));
    }
    Ok(())
}
