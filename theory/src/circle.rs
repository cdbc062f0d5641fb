//! The two rings of key labels drawn on the wheel, in circle-of-fifths order:
//! twelve major keys outside, twelve minor keys inside, aligned sector by sector.
//! The left half of the outer ring is traditionally spelled flat; each label
//! carries the sharp-spelled pitch it actually sounds.

use crate::pitch::{NoteName, note_name};

pub const NUM_SECTORS: usize = 12;

/// Which of the wheel's two rings a key sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ring {
    /// The rotating outer ring of major keys.
    Major,
    /// The fixed inner ring of minor keys.
    Minor,
}

/// A key as drawn on the wheel: its label text and the pitch a tap on it sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyLabel {
    pub text: &'static str,
    pub pitch: NoteName,
}

const fn key_label(text: &'static str, pitch: NoteName) -> KeyLabel {
    KeyLabel { text, pitch }
}

/// Major keys by sector, C at sector 0.
pub const MAJOR_KEYS: [KeyLabel; NUM_SECTORS] = [
    key_label("C", note_name::C),
    key_label("G", note_name::G),
    key_label("D", note_name::D),
    key_label("A", note_name::A),
    key_label("E", note_name::E),
    key_label("B", note_name::B),
    key_label("F#", note_name::F_SHARP),
    key_label("C#", note_name::C_SHARP),
    key_label("G♭", note_name::G_FLAT),
    key_label("D♭", note_name::D_FLAT),
    key_label("A♭", note_name::A_FLAT),
    key_label("E♭", note_name::E_FLAT),
];

/// Minor keys by sector, Am at sector 0.
pub const MINOR_KEYS: [KeyLabel; NUM_SECTORS] = [
    key_label("Am", note_name::A),
    key_label("Em", note_name::E),
    key_label("Bm", note_name::B),
    key_label("F#m", note_name::F_SHARP),
    key_label("C#m", note_name::C_SHARP),
    key_label("G#m", note_name::G_SHARP),
    key_label("D#m", note_name::D_SHARP),
    key_label("A#m", note_name::A_SHARP),
    key_label("Fm", note_name::F),
    key_label("Cm", note_name::C),
    key_label("Gm", note_name::G),
    key_label("Dm", note_name::D),
];

/// Looks up the key at a sector of a ring. Sectors count clockwise from the
/// positive x axis and must be below `NUM_SECTORS`.
pub const fn key(ring: Ring, sector: usize) -> KeyLabel {
    match ring {
        Ring::Major => MAJOR_KEYS[sector],
        Ring::Minor => MINOR_KEYS[sector],
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn key_lookup_follows_the_tables() {
        assert_eq!(key(Ring::Major, 1).text, "G");
        assert_eq!(key(Ring::Minor, 1).text, "Em");
        assert_eq!(key(Ring::Major, 11).text, "E♭");
        assert_eq!(key(Ring::Minor, 11).text, "Dm");
    }

    #[test]
    fn flat_labels_resolve_to_sharp_pitches() {
        assert_eq!(key(Ring::Major, 8).pitch, note_name::F_SHARP);
        assert_eq!(key(Ring::Major, 9).pitch, note_name::C_SHARP);
        assert_eq!(key(Ring::Major, 10).pitch, note_name::G_SHARP);
        assert_eq!(key(Ring::Major, 11).pitch, note_name::D_SHARP);
    }

    #[test]
    fn minor_labels_sound_their_root() {
        assert_eq!(key(Ring::Minor, 0).pitch, note_name::A);
        assert_eq!(key(Ring::Minor, 5).pitch, note_name::G_SHARP);
    }
}
