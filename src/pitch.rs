//! Pitch model: the 12 chromatic pitch classes and arithmetic over them.
//!
//! Pitches are always spelled with sharps on output. The five common flat
//! spellings (Db, Eb, Gb, Ab, Bb) are accepted on input and resolve to the
//! same pitch as their sharp equivalent.

use crate::error::InvalidPitch;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the 12 equal-tempered pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Pitch {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

/// Canonical ordering, C=0 through B=11.
pub const CHROMATIC_SCALE: [Pitch; 12] = [
    Pitch::C,
    Pitch::CSharp,
    Pitch::D,
    Pitch::DSharp,
    Pitch::E,
    Pitch::F,
    Pitch::FSharp,
    Pitch::G,
    Pitch::GSharp,
    Pitch::A,
    Pitch::ASharp,
    Pitch::B,
];

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Flat spellings and the sharp pitch each one denotes.
const FLAT_ALIASES: [(&str, Pitch); 5] = [
    ("Db", Pitch::CSharp),
    ("Eb", Pitch::DSharp),
    ("Gb", Pitch::FSharp),
    ("Ab", Pitch::GSharp),
    ("Bb", Pitch::ASharp),
];

impl Pitch {
    /// Position in the chromatic scale (C=0 … B=11).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch at the given scale position, wrapping modulo 12.
    pub fn from_index(index: u8) -> Pitch {
        CHROMATIC_SCALE[(index % 12) as usize]
    }

    /// Canonical (sharp) name.
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.index() as usize]
    }

    pub fn transpose(self, interval: Interval) -> Pitch {
        Pitch::from_index(self.index() + interval.semitones())
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pitch {
    type Err = InvalidPitch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl TryFrom<String> for Pitch {
    type Error = InvalidPitch;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        normalize(&value)
    }
}

impl From<Pitch> for String {
    fn from(pitch: Pitch) -> Self {
        pitch.name().to_string()
    }
}

/// Resolve a pitch spelling to its canonical pitch.
///
/// The whole spelling must match: flat aliases are swapped for their sharp
/// equivalent and the result is looked up among the 12 canonical names.
/// Matching is case-sensitive.
///
/// # Examples
/// ```
/// use chordshift::pitch::{normalize, Pitch};
///
/// assert_eq!(normalize("Bb").unwrap(), Pitch::ASharp);
/// assert_eq!(normalize("A#").unwrap(), Pitch::ASharp);
/// assert!(normalize("H").is_err());
/// assert!(normalize("bb").is_err());
/// ```
pub fn normalize(spelling: &str) -> Result<Pitch, InvalidPitch> {
    if let Some(&(_, pitch)) = FLAT_ALIASES.iter().find(|(flat, _)| *flat == spelling) {
        return Ok(pitch);
    }
    SHARP_NAMES
        .iter()
        .position(|name| *name == spelling)
        .map(|i| CHROMATIC_SCALE[i])
        .ok_or_else(|| InvalidPitch(spelling.to_string()))
}

/// Upward distance in semitones from one pitch to another, always in 0..12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Interval(u8);

impl Interval {
    pub const UNISON: Interval = Interval(0);

    /// Interval for a signed semitone count, wrapped into a single octave.
    pub fn from_semitones(semitones: i32) -> Interval {
        Interval(semitones.rem_euclid(12) as u8)
    }

    pub fn semitones(self) -> u8 {
        self.0
    }

    /// The interval that undoes this one.
    pub fn inverse(self) -> Interval {
        Interval((12 - self.0) % 12)
    }

    pub fn is_unison(self) -> bool {
        self.0 == 0
    }
}

/// `(index(to) - index(from)) mod 12`.
///
/// # Examples
/// ```
/// use chordshift::pitch::{interval, Pitch};
///
/// assert_eq!(interval(Pitch::C, Pitch::D).semitones(), 2);
/// assert_eq!(interval(Pitch::A, Pitch::C).semitones(), 3);
/// assert_eq!(interval(Pitch::D, Pitch::C).semitones(), 10);
/// ```
pub fn interval(from: Pitch, to: Pitch) -> Interval {
    Interval::from_semitones(to.index() as i32 - from.index() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_round_trip() {
        for pitch in CHROMATIC_SCALE {
            assert_eq!(normalize(pitch.name()).unwrap(), pitch);
        }
    }

    #[test]
    fn test_flat_aliases_match_sharps() {
        assert_eq!(normalize("Db").unwrap(), normalize("C#").unwrap());
        assert_eq!(normalize("Eb").unwrap(), normalize("D#").unwrap());
        assert_eq!(normalize("Gb").unwrap(), normalize("F#").unwrap());
        assert_eq!(normalize("Ab").unwrap(), normalize("G#").unwrap());
        assert_eq!(normalize("Bb").unwrap(), normalize("A#").unwrap());
    }

    #[test]
    fn test_unknown_spellings_rejected() {
        // Flats outside the alias table aren't pitches here
        for spelling in ["H", "Cb", "Fb", "E#", "B#", "c", "bb", "", "C ", "Bbm", "C##"] {
            assert_eq!(normalize(spelling), Err(InvalidPitch(spelling.to_string())));
        }
    }

    #[test]
    fn test_indices() {
        assert_eq!(Pitch::C.index(), 0);
        assert_eq!(Pitch::FSharp.index(), 6);
        assert_eq!(Pitch::B.index(), 11);
        assert_eq!(Pitch::from_index(12), Pitch::C);
        assert_eq!(Pitch::from_index(23), Pitch::B);
    }

    #[test]
    fn test_interval_range() {
        for a in CHROMATIC_SCALE {
            assert_eq!(interval(a, a), Interval::UNISON);
            for b in CHROMATIC_SCALE {
                let i = interval(a, b);
                assert!(i.semitones() < 12);
                assert_eq!(a.transpose(i), b);
                assert_eq!(b.transpose(i.inverse()), a);
            }
        }
    }

    #[test]
    fn test_interval_from_negative_semitones() {
        assert_eq!(Interval::from_semitones(-2).semitones(), 10);
        assert_eq!(Interval::from_semitones(-12).semitones(), 0);
        assert_eq!(Interval::from_semitones(14).semitones(), 2);
    }

    #[test]
    fn test_serde_uses_names() {
        assert_eq!(serde_json::to_string(&Pitch::GSharp).unwrap(), "\"G#\"");
        let p: Pitch = serde_json::from_str("\"Eb\"").unwrap();
        assert_eq!(p, Pitch::DSharp);
        assert!(serde_json::from_str::<Pitch>("\"X\"").is_err());
    }
}
