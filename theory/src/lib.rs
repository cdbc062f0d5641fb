//! Music theory for the tonewheel toy: 12-tone equal temperament pitch types, chord
//! symbols as they appear on chord tiles, and the circle-of-fifths label tables drawn
//! on the wheel. This crate does no IO; the widgets and the audio player both sit on
//! top of it.

pub mod chord;
pub mod circle;
pub mod pitch;
