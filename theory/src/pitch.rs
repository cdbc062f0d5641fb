//! 12-tone equal temperament following the A_440Hz convention. The frequency of A_4
//! (the A above middle C) is 440Hz and C_4 is considered to be middle C (MIDI index
//! 60). Pitch names are spelled the way they appear on chord tiles and wheel labels,
//! with all accidentals sharp ("C#", never "Db").

use std::fmt::Display;

pub const NOTES_PER_OCTAVE: u8 = 12;

const A_4_FREQ_HZ: f32 = 440.0;
const A_4_MIDI_INDEX: u8 = 69;

/// Frequency in Hz of a MIDI note index in 12-tone equal temperament tuned so that
/// A_4 (MIDI index 69) is exactly 440Hz.
pub fn freq_hz_of_midi_index(midi_index: u8) -> f32 {
    A_4_FREQ_HZ
        * (2_f32.powf(
            (midi_index as f32 - A_4_MIDI_INDEX as f32)
                / (NOTES_PER_OCTAVE as f32),
        ))
}

/// A note without an octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteName {
    semitone_index: u8,
}

impl NoteName {
    const fn from_index(semitone_index: u8) -> Self {
        assert!(semitone_index < NOTES_PER_OCTAVE);
        Self { semitone_index }
    }

    pub const C: Self = Self::from_index(0);
    pub const C_SHARP: Self = Self::from_index(1);
    pub const D_FLAT: Self = Self::C_SHARP;
    pub const D: Self = Self::from_index(2);
    pub const D_SHARP: Self = Self::from_index(3);
    pub const E_FLAT: Self = Self::D_SHARP;
    pub const E: Self = Self::from_index(4);
    pub const F: Self = Self::from_index(5);
    pub const F_SHARP: Self = Self::from_index(6);
    pub const G_FLAT: Self = Self::F_SHARP;
    pub const G: Self = Self::from_index(7);
    pub const G_SHARP: Self = Self::from_index(8);
    pub const A_FLAT: Self = Self::G_SHARP;
    pub const A: Self = Self::from_index(9);
    pub const A_SHARP: Self = Self::from_index(10);
    pub const B_FLAT: Self = Self::A_SHARP;
    pub const B: Self = Self::from_index(11);

    /// All 12 names in ascending semitone order starting from C.
    pub const ALL: [Self; NOTES_PER_OCTAVE as usize] = [
        Self::C,
        Self::C_SHARP,
        Self::D,
        Self::D_SHARP,
        Self::E,
        Self::F,
        Self::F_SHARP,
        Self::G,
        Self::G_SHARP,
        Self::A,
        Self::A_SHARP,
        Self::B,
    ];

    /// Returns a str representation of the note name where all accidentals are
    /// sharp, formatted like "C" or "C#"
    pub const fn as_str(self) -> &'static str {
        match self.semitone_index {
            0 => "C",
            1 => "C#",
            2 => "D",
            3 => "D#",
            4 => "E",
            5 => "F",
            6 => "F#",
            7 => "G",
            8 => "G#",
            9 => "A",
            10 => "A#",
            11 => "B",
            _ => unreachable!(),
        }
    }

    /// Parses a str like "C" or "C#". Flat spellings are not recognized here; the
    /// wheel resolves its flat labels to sharp-spelled pitches in its label table.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let semitone_index = match s {
            "C" => 0,
            "C#" => 1,
            "D" => 2,
            "D#" => 3,
            "E" => 4,
            "F" => 5,
            "F#" => 6,
            "G" => 7,
            "G#" => 8,
            "A" => 9,
            "A#" => 10,
            "B" => 11,
            _ => return None,
        };
        Some(Self { semitone_index })
    }

    pub const fn wrapping_add_semitones(self, num_semitones: i8) -> Self {
        Self::from_index(
            (self.semitone_index as i8 + num_semitones)
                .rem_euclid(NOTES_PER_OCTAVE as i8) as u8,
        )
    }

    pub const fn in_octave(self, octave: Octave) -> Note {
        Note::new(self, octave)
    }
}

impl Display for NoteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Duplicated from `NoteName` so it's possible to bring all note names into scope by
/// using this module.
pub mod note_name {
    pub use super::NoteName;
    pub const C: NoteName = NoteName::C;
    pub const C_SHARP: NoteName = NoteName::C_SHARP;
    pub const D_FLAT: NoteName = NoteName::D_FLAT;
    pub const D: NoteName = NoteName::D;
    pub const D_SHARP: NoteName = NoteName::D_SHARP;
    pub const E_FLAT: NoteName = NoteName::E_FLAT;
    pub const E: NoteName = NoteName::E;
    pub const F: NoteName = NoteName::F;
    pub const F_SHARP: NoteName = NoteName::F_SHARP;
    pub const G_FLAT: NoteName = NoteName::G_FLAT;
    pub const G: NoteName = NoteName::G;
    pub const G_SHARP: NoteName = NoteName::G_SHARP;
    pub const A_FLAT: NoteName = NoteName::A_FLAT;
    pub const A: NoteName = NoteName::A;
    pub const A_SHARP: NoteName = NoteName::A_SHARP;
    pub const B_FLAT: NoteName = NoteName::B_FLAT;
    pub const B: NoteName = NoteName::B;
}

/// Octaves go from -1 to 8, following MIDI naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octave {
    /// To make the math easier octaves are represented by the index of the first note
    /// of the octave (c) divided by 12, so the octave named "-1" in MIDI parlance has
    /// representation "0".
    c_midi_index_divided_by_notes_per_octave: u8,
}

impl Octave {
    const MIN_OCTAVE: i8 = -1;
    const MAX_OCTAVE: i8 = 8;

    const fn from_index(i: i8) -> Self {
        assert!(i >= Self::MIN_OCTAVE && i <= Self::MAX_OCTAVE);
        Self {
            c_midi_index_divided_by_notes_per_octave: (i + 1) as u8,
        }
    }

    pub const fn to_index(self) -> i8 {
        self.c_midi_index_divided_by_notes_per_octave as i8 - 1
    }

    /// Returns the index of the C note in this octave.
    const fn c_midi_index(self) -> u8 {
        self.c_midi_index_divided_by_notes_per_octave * NOTES_PER_OCTAVE
    }

    pub const _MINUS_1: Self = Self::from_index(-1);
    pub const _0: Self = Self::from_index(0);
    pub const _1: Self = Self::from_index(1);
    pub const _2: Self = Self::from_index(2);
    pub const _3: Self = Self::from_index(3);
    pub const _4: Self = Self::from_index(4);
    pub const _5: Self = Self::from_index(5);
    pub const _6: Self = Self::from_index(6);
    pub const _7: Self = Self::from_index(7);
    pub const _8: Self = Self::from_index(8);
}

/// Octave 4 is the toy's home octave. Wheel taps and chord tiles all sound there.
impl Default for Octave {
    fn default() -> Self {
        Octave::_4
    }
}

/// Definition of notes based on MIDI tuned to A_440
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Note {
    midi_index: u8,
}

impl Note {
    pub const fn new(name: NoteName, octave: Octave) -> Self {
        Self {
            midi_index: octave.c_midi_index() + name.semitone_index,
        }
    }

    pub fn from_midi_index(midi_index: impl Into<u8>) -> Self {
        Self {
            midi_index: midi_index.into(),
        }
    }

    pub const fn to_midi_index(self) -> u8 {
        self.midi_index
    }

    pub fn freq_hz(self) -> f32 {
        freq_hz_of_midi_index(self.to_midi_index())
    }

    pub const fn octave(self) -> Octave {
        Octave {
            c_midi_index_divided_by_notes_per_octave: self.midi_index
                / NOTES_PER_OCTAVE,
        }
    }

    pub const fn note_name(self) -> NoteName {
        NoteName::from_index(self.midi_index % NOTES_PER_OCTAVE)
    }
}

/// Example formats: "C#4", "C4". Notes in octave "-1" are written like "C#-1".
impl Display for Note {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.note_name().as_str(), self.octave().to_index())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn a_4_is_exactly_440hz() {
        assert_eq!(note_name::A.in_octave(Octave::_4).freq_hz(), 440.0);
    }

    #[test]
    fn c_4_is_middle_c() {
        assert_eq!(Note::new(note_name::C, Octave::_4).to_midi_index(), 60);
    }

    #[test]
    fn freq_follows_equal_temperament_from_octave_4() {
        for (i, name) in NoteName::ALL.iter().enumerate() {
            let expected =
                440.0 * 2_f32.powf((60.0 + i as f32 - 69.0) / 12.0);
            let actual = name.in_octave(Octave::_4).freq_hz();
            assert!(
                (actual - expected).abs() < 1e-3,
                "{}: expected {}Hz, got {}Hz",
                name,
                expected,
                actual
            );
        }
    }

    #[test]
    fn middle_c_is_about_261_63hz() {
        let c_4 = note_name::C.in_octave(Octave::default());
        assert!((c_4.freq_hz() - 261.63).abs() < 0.01);
    }

    #[test]
    fn octave_round_trip() {
        assert_eq!(Note::new(note_name::C, Octave::_0).octave(), Octave::_0);
    }

    #[test]
    fn midi_index_round_trip() {
        let a_4 = Note::from_midi_index(69u8);
        assert_eq!(a_4, note_name::A.in_octave(Octave::_4));
        assert_eq!(a_4.to_midi_index(), 69);
    }

    #[test]
    fn note_name_round_trip() {
        assert_eq!(
            Note::new(note_name::D, Octave::_3).note_name(),
            note_name::D
        );
    }

    #[test]
    fn symbol_round_trip() {
        for name in NoteName::ALL {
            assert_eq!(NoteName::from_symbol(name.as_str()), Some(name));
        }
    }

    #[test]
    fn flat_spellings_are_not_symbols() {
        assert_eq!(NoteName::from_symbol("Db"), None);
        assert_eq!(NoteName::from_symbol("G♭"), None);
    }

    #[test]
    fn enharmonic_aliases_are_equal() {
        assert_eq!(note_name::G_FLAT, note_name::F_SHARP);
        assert_eq!(note_name::E_FLAT, note_name::D_SHARP);
    }

    #[test]
    fn wrapping_add_semitones_wraps() {
        assert_eq!(note_name::A.wrapping_add_semitones(3), note_name::C);
        assert_eq!(note_name::C.wrapping_add_semitones(-1), note_name::B);
    }

    #[test]
    fn display_concatenates_name_and_octave() {
        assert_eq!(
            Note::new(note_name::C_SHARP, Octave::_4).to_string(),
            "C#4"
        );
        assert_eq!(
            Note::new(note_name::C, Octave::_MINUS_1).to_string(),
            "C-1"
        );
    }
}
