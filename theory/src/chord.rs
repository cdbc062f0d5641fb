//! Chords as they're written on chord tiles: a sharp-spelled root followed by an
//! optional minor marker and an optional seventh marker ("C", "Am", "G7", "F#m7").
//! Thirds are major or minor, fifths always perfect and sevenths always minor, which
//! is all the vocabulary the chord pad speaks.

use crate::pitch::{Note, NoteName, Octave};
use smallvec::{SmallVec, smallvec};
use std::{fmt::Display, str::FromStr};

/// The notes sounded by a chord, root first.
pub struct Notes(SmallVec<[Note; 4]>);

impl Notes {
    fn new() -> Self {
        Self(smallvec![])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, note: Note) {
        self.0.push(note);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Third {
    Major,
    Minor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChordType {
    pub third: Third,
    pub seventh: bool,
}

pub const MAJOR: ChordType = ChordType {
    third: Third::Major,
    seventh: false,
};

pub const MINOR: ChordType = ChordType {
    third: Third::Minor,
    seventh: false,
};

impl ChordType {
    pub const fn with_seventh(self) -> Self {
        Self {
            seventh: true,
            ..self
        }
    }

    /// Calls `f` with each chord tone's offset in semitones above the root, root
    /// first: 0, then +3 or +4 for the third, +7 for the fifth, and +10 when the
    /// seventh is present.
    pub fn with_semitones_above_root<F: FnMut(i8)>(&self, mut f: F) {
        f(0);
        match self.third {
            Third::Major => f(4),
            Third::Minor => f(3),
        }
        f(7);
        if self.seventh {
            f(10);
        }
    }

    pub const fn num_notes(&self) -> usize {
        3 + self.seventh as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Chord {
    pub root: NoteName,
    pub typ: ChordType,
}

impl Chord {
    pub const fn new(root: NoteName, typ: ChordType) -> Self {
        Self { root, typ }
    }

    /// The chord's notes with every tone wrapped into the given octave, so G7 in
    /// octave 4 sounds G_4 B_4 D_4 F_4 rather than climbing into octave 5.
    pub fn notes_in_octave(self, octave: Octave) -> Notes {
        let mut ret = Notes::new();
        self.typ.with_semitones_above_root(|semitones_above| {
            ret.push(
                self.root
                    .wrapping_add_semitones(semitones_above)
                    .in_octave(octave),
            );
        });
        ret
    }
}

pub const fn chord(root: NoteName, typ: ChordType) -> Chord {
    Chord::new(root, typ)
}

/// Formats the chord back into its tile symbol, like "F#m7".
impl Display for Chord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root.as_str())?;
        if let Third::Minor = self.typ.third {
            write!(f, "m")?;
        }
        if self.typ.seventh {
            write!(f, "7")?;
        }
        Ok(())
    }
}

/// Parses a tile symbol. The root is the symbol with every minor and seventh marker
/// character removed, so a symbol like "Cmaj7" leaves the unrecognizable root "Caj"
/// behind and is rejected rather than read as a major seventh. The minor flag is an
/// "m" (either case) that isn't spelling "maj"; the seventh flag is any "7". Roots
/// must use sharp spellings ("C#", never "Db").
impl FromStr for Chord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let root_str: String =
            s.chars().filter(|c| !matches!(c, 'm' | 'M' | '7')).collect();
        if let Some(root) = NoteName::from_symbol(root_str.as_str()) {
            let third = if has_minor_marker(s) {
                Third::Minor
            } else {
                Third::Major
            };
            let typ = ChordType {
                third,
                seventh: s.contains('7'),
            };
            Ok(Self { root, typ })
        } else {
            Err(format!("Failed to parse chord root in symbol {:?}.", s))
        }
    }
}

/// True if the symbol contains an "m" (either case) not followed by "aj".
fn has_minor_marker(s: &str) -> bool {
    let lower = s.to_lowercase();
    lower.bytes().enumerate().any(|(i, b)| {
        // "m" is ascii, so i + 1 always lands on a character boundary
        b == b'm' && !lower[i + 1..].starts_with("aj")
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pitch::note_name;

    fn names_in_octave_4(symbol: &str) -> Vec<NoteName> {
        let chord: Chord = symbol.parse().unwrap();
        chord
            .notes_in_octave(Octave::_4)
            .iter()
            .map(|note| note.note_name())
            .collect()
    }

    #[test]
    fn c_major_triad() {
        assert_eq!(
            names_in_octave_4("C"),
            vec![note_name::C, note_name::E, note_name::G]
        );
    }

    #[test]
    fn a_minor_triad() {
        assert_eq!(
            names_in_octave_4("Am"),
            vec![note_name::A, note_name::C, note_name::E]
        );
    }

    #[test]
    fn g_dominant_seventh() {
        assert_eq!(
            names_in_octave_4("G7"),
            vec![note_name::G, note_name::B, note_name::D, note_name::F]
        );
    }

    #[test]
    fn minor_seventh_combines_both_markers() {
        let chord: Chord = "Cm7".parse().unwrap();
        assert_eq!(chord.root, note_name::C);
        assert_eq!(chord.typ.third, Third::Minor);
        assert!(chord.typ.seventh);
        assert_eq!(
            names_in_octave_4("Cm7"),
            vec![
                note_name::C,
                note_name::D_SHARP,
                note_name::G,
                note_name::A_SHARP
            ]
        );
    }

    #[test]
    fn sharp_roots_parse() {
        let chord: Chord = "F#m7".parse().unwrap();
        assert_eq!(chord.root, note_name::F_SHARP);
        assert_eq!(chord.typ, MINOR.with_seventh());
    }

    #[test]
    fn every_tone_stays_in_the_requested_octave() {
        let chord: Chord = "G7".parse().unwrap();
        for note in chord.notes_in_octave(Octave::_4).iter() {
            assert_eq!(note.octave(), Octave::_4);
        }
    }

    #[test]
    fn num_notes_matches_notes_produced() {
        for symbol in ["C", "Am", "G7", "Cm7"] {
            let chord: Chord = symbol.parse().unwrap();
            assert_eq!(
                chord.notes_in_octave(Octave::_4).len(),
                chord.typ.num_notes()
            );
        }
    }

    #[test]
    fn maj_symbols_are_rejected() {
        // stripping markers from "Cmaj7" leaves "Caj", which is not a root
        assert!("Cmaj7".parse::<Chord>().is_err());
    }

    #[test]
    fn upper_case_minor_marker_counts() {
        let chord: Chord = "AM".parse().unwrap();
        assert_eq!(chord.typ.third, Third::Minor);
    }

    #[test]
    fn unknown_roots_are_errors() {
        assert!("H".parse::<Chord>().is_err());
        assert!("Db".parse::<Chord>().is_err());
        assert!(" C".parse::<Chord>().is_err());
        assert!("".parse::<Chord>().is_err());
    }

    #[test]
    fn symbol_round_trip() {
        for symbol in ["C", "Am", "G7", "Cm7", "F#m7", "A#"] {
            let chord: Chord = symbol.parse().unwrap();
            assert_eq!(chord.to_string(), symbol);
        }
    }
}
