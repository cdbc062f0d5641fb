//! Audio output for the tonewheel widgets. `Player` wraps the default cpal
//! output device; `AudioHandle` is the single audio resource every widget
//! shares. The handle starts locked and touches no device until `unlock` is
//! called from a user gesture; playback before then is a silent no-op.

use cpal::{
    BufferSize, Device, OutputCallbackInfo, StreamConfig, SupportedBufferSize,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};
use std::sync::{Arc, Mutex, MutexGuard};
use tonewheel_synth::{AttackRelease, Mixer, Pluck, Waveform, strum};
use tonewheel_theory::{
    chord::Chord,
    pitch::{Note, Octave},
};

#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// default: 0.01
    pub target_latency_s: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_latency_s: 0.01,
        }
    }
}

pub struct Player {
    device: Device,
}

impl Player {
    pub fn new() -> anyhow::Result<Self> {
        let host = cpal::default_host();
        log::info!("cpal host: {}", host.id().name());
        let device = host
            .default_output_device()
            .ok_or(anyhow::anyhow!("no output device"))?;
        if let Ok(name) = device.name() {
            log::info!("cpal device: {}", name);
        } else {
            log::info!("cpal device: (no name)");
        }
        Ok(Self { device })
    }

    fn choose_config(&self, config: Config) -> anyhow::Result<StreamConfig> {
        let default_config = self.device.default_output_config()?;
        let sample_rate = default_config.sample_rate();
        let channels = 2;
        let ideal_buffer_size =
            (sample_rate.0 as f32 * config.target_latency_s) as u32 * channels;
        // Round down to a multiple of 4. It's not clear why this is necessary
        // but alsa complains if the buffer size is not evenly divisible by 4.
        let ideal_buffer_size = ideal_buffer_size & (!3);
        let buffer_size = match default_config.buffer_size() {
            SupportedBufferSize::Range { min, max } => {
                let frame_count = if ideal_buffer_size < *min {
                    *min
                } else if ideal_buffer_size > *max {
                    *max
                } else {
                    ideal_buffer_size
                };
                BufferSize::Fixed(frame_count)
            }
            SupportedBufferSize::Unknown => BufferSize::Default,
        };
        Ok(StreamConfig {
            channels: channels as u16,
            sample_rate,
            buffer_size,
        })
    }

    /// Builds and starts an output stream fed from a mixer shared with the
    /// caller. One-shot voices are plain data, so the audio callback renders
    /// them itself; nothing runs on another thread between notes.
    pub fn play_mixer(
        &self,
        config: Config,
    ) -> anyhow::Result<(cpal::Stream, Arc<Mutex<Mixer>>)> {
        let config = self.choose_config(config)?;
        log::info!("sample rate: {}", config.sample_rate.0);
        log::info!("num channels: {}", config.channels);
        log::info!("buffer size: {:?}", config.buffer_size);
        let mixer =
            Arc::new(Mutex::new(Mixer::new(config.sample_rate.0 as f32)));
        let stream = self.device.build_output_stream(
            &config,
            {
                let mixer = Arc::clone(&mixer);
                let channels = config.channels as usize;
                // mono scratch buffer, duplicated into every output channel
                let mut scratch = Vec::new();
                move |data: &mut [f32], _: &OutputCallbackInfo| {
                    scratch.resize(data.len() / channels, 0.0);
                    mixer
                        .lock()
                        .expect("ui thread panicked while holding the mixer")
                        .render(&mut scratch);
                    for (output, &input) in
                        data.chunks_mut(channels).zip(scratch.iter())
                    {
                        for element in output {
                            *element = input;
                        }
                    }
                }
            },
            |err| eprintln!("stream error: {}", err),
            None,
        )?;
        stream.play()?;
        Ok((stream, mixer))
    }
}

struct Unlocked {
    mixer: Arc<Mutex<Mixer>>,
    // dropping the stream stops playback
    _stream: cpal::Stream,
}

impl Unlocked {
    fn lock_mixer(&self) -> MutexGuard<'_, Mixer> {
        self.mixer
            .lock()
            .expect("audio thread panicked while holding the mixer")
    }
}

/// The one audio resource shared by every widget. Notes and chords sound with
/// the waveform and duration the handle was created with.
pub struct AudioHandle {
    waveform: Waveform,
    note_duration_s: f32,
    config: Config,
    unlocked: Option<Unlocked>,
}

impl AudioHandle {
    pub fn new(
        waveform: Waveform,
        note_duration_s: f32,
        config: Config,
    ) -> Self {
        Self {
            waveform,
            note_duration_s,
            config,
            unlocked: None,
        }
    }

    /// Builds the device, stream and mixer on the first call; later calls are
    /// no-ops.
    pub fn unlock(&mut self) -> anyhow::Result<()> {
        if self.unlocked.is_some() {
            return Ok(());
        }
        let player = Player::new()?;
        let (stream, mixer) = player.play_mixer(self.config)?;
        self.unlocked = Some(Unlocked {
            mixer,
            _stream: stream,
        });
        log::info!("audio unlocked");
        Ok(())
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked.is_some()
    }

    /// True when nothing is sounding. Vacuously true while locked.
    pub fn is_idle(&self) -> bool {
        match self.unlocked.as_ref() {
            Some(unlocked) => unlocked.lock_mixer().is_idle(),
            None => true,
        }
    }

    pub fn play_note(&self, note: Note) {
        let Some(unlocked) = self.unlocked.as_ref() else {
            log::debug!("audio is locked; dropping note {}", note);
            return;
        };
        let envelope =
            AttackRelease::TAP.with_duration_s(self.note_duration_s);
        unlocked
            .lock_mixer()
            .note_on(Pluck::new(note.freq_hz(), self.waveform, envelope));
    }

    /// Strums the chord's tones in octave 4, root first.
    pub fn play_chord(&self, chord: Chord) {
        let Some(unlocked) = self.unlocked.as_ref() else {
            log::debug!("audio is locked; dropping chord {}", chord);
            return;
        };
        let envelope =
            AttackRelease::STRUM.with_duration_s(self.note_duration_s);
        let notes = chord.notes_in_octave(Octave::default());
        let plucks = notes
            .iter()
            .map(|note| Pluck::new(note.freq_hz(), self.waveform, envelope));
        let mut mixer = unlocked.lock_mixer();
        for pluck in strum(plucks) {
            mixer.note_on(pluck);
        }
    }
}
