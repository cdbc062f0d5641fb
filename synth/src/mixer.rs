use crate::voice::{Pluck, Voice};

/// Gap between the onsets of successive notes in a strummed chord.
pub const STRUM_STAGGER_S: f32 = 0.04;

/// Staggers a set of simultaneously triggered plucks so a chord rolls from its
/// root upwards instead of landing as a block.
pub fn strum(
    plucks: impl IntoIterator<Item = Pluck>,
) -> impl Iterator<Item = Pluck> {
    plucks
        .into_iter()
        .enumerate()
        .map(|(i, pluck)| pluck.with_onset_s(i as f32 * STRUM_STAGGER_S))
}

/// Sums the currently sounding one-shot voices. The audio callback calls `render`;
/// the UI side adds voices with `note_on`.
pub struct Mixer {
    sample_rate_hz: f32,
    voices: Vec<Voice>,
}

impl Mixer {
    pub fn new(sample_rate_hz: f32) -> Self {
        Self {
            sample_rate_hz,
            voices: Vec::new(),
        }
    }

    pub fn sample_rate_hz(&self) -> f32 {
        self.sample_rate_hz
    }

    pub fn note_on(&mut self, pluck: Pluck) {
        log::trace!("note on: {}Hz at +{}s", pluck.freq_hz, pluck.onset_s);
        self.voices.push(Voice::new(pluck));
    }

    /// Overwrites `buf` with the sum of all live voices and retires the voices
    /// that finished during it.
    pub fn render(&mut self, buf: &mut [f32]) {
        for sample in buf.iter_mut() {
            *sample = 0.0;
        }
        for voice in self.voices.iter_mut() {
            for sample in buf.iter_mut() {
                *sample += voice.sample(self.sample_rate_hz);
            }
        }
        let num_voices_before = self.voices.len();
        self.voices.retain(|voice| !voice.is_finished());
        let num_retired = num_voices_before - self.voices.len();
        if num_retired > 0 {
            log::trace!("retired {} voices", num_retired);
        }
    }

    pub fn num_voices(&self) -> usize {
        self.voices.len()
    }

    pub fn is_idle(&self) -> bool {
        self.voices.is_empty()
    }
}
