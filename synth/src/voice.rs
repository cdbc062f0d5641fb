use crate::{envelope::AttackRelease, waveform::Waveform};

/// How long a voice outlives its envelope before being retired.
pub const TAIL_S: f32 = 0.05;

/// A scheduled one-shot note: everything the mixer needs to sound it. `onset_s`
/// delays the voice's start, which is how strummed chords stagger their notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pluck {
    pub freq_hz: f32,
    pub waveform: Waveform,
    pub envelope: AttackRelease,
    pub onset_s: f32,
}

impl Pluck {
    pub fn new(
        freq_hz: f32,
        waveform: Waveform,
        envelope: AttackRelease,
    ) -> Self {
        Self {
            freq_hz,
            waveform,
            envelope,
            onset_s: 0.0,
        }
    }

    pub fn with_onset_s(self, onset_s: f32) -> Self {
        Self { onset_s, ..self }
    }
}

/// A sounding pluck: a phase-accumulator oscillator scaled by the envelope
/// evaluated at the voice's own elapsed time.
pub struct Voice {
    pluck: Pluck,
    state_01: f32,
    num_samples_elapsed: u64,
    elapsed_s: f32,
}

impl Voice {
    pub fn new(pluck: Pluck) -> Self {
        Self {
            pluck,
            state_01: 0.0,
            num_samples_elapsed: 0,
            elapsed_s: 0.0,
        }
    }

    /// Advances by one sample and returns the voice's contribution. Silent until
    /// the onset is reached.
    pub fn sample(&mut self, sample_rate_hz: f32) -> f32 {
        let t = self.elapsed_s - self.pluck.onset_s;
        // elapsed time comes from an integer sample count; summing 1/rate
        // per sample accumulates enough error to cut the tail short
        self.num_samples_elapsed += 1;
        self.elapsed_s = self.num_samples_elapsed as f32 / sample_rate_hz;
        if t < 0.0 {
            return 0.0;
        }
        let state_delta = self.pluck.freq_hz / sample_rate_hz;
        self.state_01 = (self.state_01 + state_delta).rem_euclid(1.0);
        self.pluck.waveform.sample(self.state_01)
            * self.pluck.envelope.level_at(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_s - self.pluck.onset_s
            > self.pluck.envelope.duration_s + TAIL_S
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const SAMPLE_RATE_HZ: f32 = 48_000.0;

    #[test]
    fn silent_before_the_onset() {
        let pluck = Pluck::new(440.0, Waveform::Sine, AttackRelease::STRUM)
            .with_onset_s(0.04);
        let mut voice = Voice::new(pluck);
        let samples_before_onset = (0.04 * SAMPLE_RATE_HZ) as usize;
        for _ in 0..samples_before_onset {
            assert_eq!(voice.sample(SAMPLE_RATE_HZ), 0.0);
        }
    }

    #[test]
    fn finishes_after_duration_plus_tail() {
        let pluck = Pluck::new(440.0, Waveform::Sine, AttackRelease::TAP);
        let mut voice = Voice::new(pluck);
        let limit = (SAMPLE_RATE_HZ * 0.7) as usize;
        let mut samples_taken = 0;
        while !voice.is_finished() {
            voice.sample(SAMPLE_RATE_HZ);
            samples_taken += 1;
            assert!(samples_taken <= limit, "voice never finished");
        }
        // the voice must survive the full envelope and its tail
        let min_lifetime = (SAMPLE_RATE_HZ
            * (AttackRelease::TAP.duration_s + TAIL_S))
            as usize;
        assert!(samples_taken >= min_lifetime);
    }

    #[test]
    fn lifetime_is_exact_in_samples() {
        let pluck = Pluck::new(440.0, Waveform::Sine, AttackRelease::TAP);
        let mut voice = Voice::new(pluck);
        let mut samples_taken = 0;
        while !voice.is_finished() {
            voice.sample(SAMPLE_RATE_HZ);
            samples_taken += 1;
            assert!(samples_taken <= 48_000, "voice never finished");
        }
        // 0.6s envelope + 0.05s tail at 48kHz is 31200 samples; the voice
        // retires on the first sample past that
        assert_eq!(samples_taken, 31_201);
    }

    #[test]
    fn onset_extends_the_lifetime() {
        let pluck = Pluck::new(440.0, Waveform::Sine, AttackRelease::TAP)
            .with_onset_s(0.08);
        let mut voice = Voice::new(pluck);
        for _ in 0..(SAMPLE_RATE_HZ * 0.7) as usize {
            voice.sample(SAMPLE_RATE_HZ);
        }
        assert!(!voice.is_finished());
        for _ in 0..(SAMPLE_RATE_HZ * 0.1) as usize {
            voice.sample(SAMPLE_RATE_HZ);
        }
        assert!(voice.is_finished());
    }

    #[test]
    fn level_never_exceeds_the_envelope_peak() {
        let pluck = Pluck::new(440.0, Waveform::Sine, AttackRelease::TAP);
        let mut voice = Voice::new(pluck);
        let mut max_level = 0.0_f32;
        while !voice.is_finished() {
            max_level = max_level.max(voice.sample(SAMPLE_RATE_HZ).abs());
        }
        assert!(max_level <= AttackRelease::TAP.peak + 1e-6);
        assert!(max_level > 0.2, "envelope never came near its peak");
    }
}
