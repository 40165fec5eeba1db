//! Keys, diatonic spelling tables and sharp/flat preferences.
//!
//! A key is a chord token interpreted as a tonal center. Each supported key
//! carries a hand-authored table giving the idiomatic spelling of all twelve
//! pitch classes when composing in that key, including theoretical
//! double-accidental spellings for remote keys (D# major spells pitch class
//! 7 as `F##`, Gb major spells pitch class 2 as `Ebb`). The tables are
//! codified from standard practice, not derived.

use crate::config::NotationConfig;
use crate::error::TransposeError;
use crate::notation::{split_token, NotationStyle};
use crate::pitch::{BaseName, PitchClass, Spelling};

/// Whether ambiguous pitch classes in a key lean sharp or flat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    Sharp,
    Flat,
}

/// A validated tonal center.
///
/// Only the seventeen standard major-key spellings are accepted: the seven
/// naturals, the five sharp keys `C# D# F# G# A#` and the five flat keys
/// `Db Eb Gb Ab Bb` (in either notation style). Remote enharmonic aliases
/// such as `E#` or `Cb` have no authored table and are rejected with
/// [`TransposeError::InvalidKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    spelling: Spelling,
    style: NotationStyle,
    table: &'static [Spelling; 12],
    preference: Preference,
}

impl Key {
    /// Parse and validate a key token.
    ///
    /// Unlike chord parsing, the accidental run must be uniform: `C#b`
    /// sums to a natural but is not a key spelling anyone writes.
    pub fn parse(token: &str, config: &NotationConfig) -> Result<Key, TransposeError> {
        let invalid = || TransposeError::InvalidKey(token.to_string());
        let parts = split_token(token, config).ok_or_else(invalid)?;
        if parts.accidentals != parts.alter.unsigned_abs() {
            return Err(invalid());
        }
        let spelling = Spelling::new(parts.base, parts.alter.clamp(-2, 2) as i8);
        let table = tables::diatonic(spelling).ok_or_else(invalid)?;
        let preference = tables::preference(spelling).ok_or_else(invalid)?;
        Ok(Key {
            spelling,
            style: parts.style,
            table,
            preference,
        })
    }

    pub fn spelling(&self) -> Spelling {
        self.spelling
    }

    /// Style the key token was written in.
    pub fn style(&self) -> NotationStyle {
        self.style
    }

    pub fn pitch_class(&self) -> PitchClass {
        self.spelling.pitch_class()
    }

    /// Idiomatic spelling of every pitch class when composing in this key,
    /// indexed by pitch class.
    pub fn diatonic(&self) -> &'static [Spelling; 12] {
        self.table
    }

    /// Sharp/flat preference of this key.
    pub fn preference(&self) -> Preference {
        self.preference
    }
}

mod tables {
    use super::{BaseName, Preference, Spelling};
    use crate::pitch::BaseName::{A, B, C, D, E, F, G};

    const fn s(base: BaseName, alter: i8) -> Spelling {
        Spelling::new(base, alter)
    }

    // One row per supported key, indexed by pitch class.
    static C_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(A, -1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static C_SHARP: [Spelling; 12] = [
        s(B, 1), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(E, 1),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];
    static D_FLAT: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(D, 0), s(E, -1), s(F, -1), s(F, 0),
        s(G, -1), s(G, 0), s(A, -1), s(B, -2), s(B, -1), s(C, -1),
    ];
    static D_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static D_SHARP: [Spelling; 12] = [
        s(B, 1), s(C, 1), s(C, 2), s(D, 1), s(E, 0), s(E, 1),
        s(F, 1), s(F, 2), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];
    static E_FLAT: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(G, -1), s(G, 0), s(A, -1), s(A, 0), s(B, -1), s(C, -1),
    ];
    static E_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static F_MAJOR: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(A, -1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static F_SHARP: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(E, 1),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];
    static G_FLAT: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(E, -2), s(E, -1), s(F, -1), s(F, 0),
        s(G, -1), s(G, 0), s(A, -1), s(B, -2), s(B, -1), s(C, -1),
    ];
    static G_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static G_SHARP: [Spelling; 12] = [
        s(B, 1), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(E, 1),
        s(F, 1), s(F, 2), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];
    static A_FLAT: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(D, 0), s(E, -1), s(F, -1), s(F, 0),
        s(G, -1), s(G, 0), s(A, -1), s(A, 0), s(B, -1), s(C, -1),
    ];
    static A_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];
    static A_SHARP: [Spelling; 12] = [
        s(B, 1), s(C, 1), s(C, 2), s(D, 1), s(E, 0), s(E, 1),
        s(F, 1), s(F, 2), s(G, 1), s(G, 2), s(A, 1), s(B, 0),
    ];
    static B_FLAT: [Spelling; 12] = [
        s(C, 0), s(D, -1), s(D, 0), s(E, -1), s(E, 0), s(F, 0),
        s(G, -1), s(G, 0), s(A, -1), s(A, 0), s(B, -1), s(B, 0),
    ];
    static B_MAJOR: [Spelling; 12] = [
        s(C, 0), s(C, 1), s(D, 0), s(D, 1), s(E, 0), s(F, 0),
        s(F, 1), s(G, 0), s(G, 1), s(A, 0), s(A, 1), s(B, 0),
    ];

    pub(super) fn diatonic(key: Spelling) -> Option<&'static [Spelling; 12]> {
        let table = match (key.base, key.alter) {
            (C, 0) => &C_MAJOR,
            (C, 1) => &C_SHARP,
            (D, -1) => &D_FLAT,
            (D, 0) => &D_MAJOR,
            (D, 1) => &D_SHARP,
            (E, -1) => &E_FLAT,
            (E, 0) => &E_MAJOR,
            (F, 0) => &F_MAJOR,
            (F, 1) => &F_SHARP,
            (G, -1) => &G_FLAT,
            (G, 0) => &G_MAJOR,
            (G, 1) => &G_SHARP,
            (A, -1) => &A_FLAT,
            (A, 0) => &A_MAJOR,
            (A, 1) => &A_SHARP,
            (B, -1) => &B_FLAT,
            (B, 0) => &B_MAJOR,
            _ => return None,
        };
        Some(table)
    }

    pub(super) fn preference(key: Spelling) -> Option<Preference> {
        let preference = match (key.base, key.alter) {
            (C, 0) => Preference::Flat,
            (C, 1) => Preference::Flat,
            (D, -1) => Preference::Flat,
            (D, 0) => Preference::Sharp,
            (D, 1) => Preference::Flat,
            (E, -1) => Preference::Flat,
            (E, 0) => Preference::Sharp,
            (F, 0) => Preference::Flat,
            (F, 1) => Preference::Sharp,
            (G, -1) => Preference::Sharp,
            (G, 0) => Preference::Sharp,
            (G, 1) => Preference::Flat,
            (A, -1) => Preference::Flat,
            (A, 0) => Preference::Sharp,
            (A, 1) => Preference::Flat,
            (B, -1) => Preference::Flat,
            (B, 0) => Preference::Sharp,
            _ => return None,
        };
        Some(preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotationConfig {
        NotationConfig::default()
    }

    const SUPPORTED: [&str; 17] = [
        "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb",
        "B",
    ];

    #[test]
    fn test_all_supported_keys_parse() {
        for token in SUPPORTED {
            assert!(Key::parse(token, &config()).is_ok(), "key {token} rejected");
        }
    }

    #[test]
    fn test_syllable_keys_parse() {
        for token in ["DO", "DO#", "REb", "MIb", "FA#", "SOLb", "SI"] {
            let key = Key::parse(token, &config()).unwrap();
            assert_eq!(key.style(), NotationStyle::Syllable);
        }
    }

    #[test]
    fn test_unsupported_keys_rejected() {
        for token in ["E#", "B#", "Cb", "Fb", "C##", "Bbb", "C#b", "H", "Cm"] {
            assert!(
                matches!(
                    Key::parse(token, &config()),
                    Err(TransposeError::InvalidKey(_))
                ),
                "key {token} accepted"
            );
        }
    }

    #[test]
    fn test_diatonic_rows_are_indexed_by_pitch_class() {
        for token in SUPPORTED {
            let key = Key::parse(token, &config()).unwrap();
            for (index, spelling) in key.diatonic().iter().enumerate() {
                assert_eq!(
                    spelling.pitch_class().index(),
                    index,
                    "key {token} row broken at {index}"
                );
            }
        }
    }

    #[test]
    fn test_theoretical_spellings() {
        let config = config();
        let d_sharp = Key::parse("D#", &config).unwrap();
        assert_eq!(
            d_sharp.diatonic()[7].render(NotationStyle::Letter, &config),
            "F##"
        );
        let g_flat = Key::parse("Gb", &config).unwrap();
        assert_eq!(
            g_flat.diatonic()[2].render(NotationStyle::Letter, &config),
            "Ebb"
        );
        let a_sharp = Key::parse("A#", &config).unwrap();
        assert_eq!(
            a_sharp.diatonic()[9].render(NotationStyle::Letter, &config),
            "G##"
        );
    }

    #[test]
    fn test_preference() {
        let config = config();
        assert_eq!(
            Key::parse("D", &config).unwrap().preference(),
            Preference::Sharp
        );
        assert_eq!(
            Key::parse("F", &config).unwrap().preference(),
            Preference::Flat
        );
        assert_eq!(
            Key::parse("Gb", &config).unwrap().preference(),
            Preference::Sharp
        );
        assert_eq!(
            Key::parse("SIb", &config).unwrap().preference(),
            Preference::Flat
        );
    }
}
