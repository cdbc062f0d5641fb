//! The little synthesizer behind the tonewheel widgets. Every sound is a one-shot
//! "pluck": a fixed-frequency oscillator shaped by a linear attack/release envelope.
//! Plucks are fire-and-forget; a mixer sums the live ones and retires them as their
//! envelopes end. There is no further signal processing.

pub mod envelope;
pub use envelope::*;

pub mod mixer;
pub use mixer::*;

pub mod voice;
pub use voice::*;

pub mod waveform;
pub use waveform::*;
