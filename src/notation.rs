//! Chord-token classification and notation-style conversion.
//!
//! A chord token is `<base>[accidental]*`: a base name in one of the two
//! styles followed by sharp/flat characters. Classification strips the
//! configured accidental characters and checks the remainder against the
//! base-name sets (case-sensitive, exact). Style conversion translates the
//! base name through the fixed seven-entry bijection and copies the
//! accidental characters through verbatim; it never re-spells.

use crate::config::NotationConfig;
use crate::error::TransposeError;
use crate::pitch::{BaseName, Spelling};

/// The two chord-naming systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotationStyle {
    /// A-B-C names.
    Letter,
    /// DO-RE-MI names.
    Syllable,
}

impl NotationStyle {
    /// Parse a style from its configured label.
    pub fn from_label(label: &str, config: &NotationConfig) -> Result<NotationStyle, TransposeError> {
        if label == config.letter_label {
            Ok(NotationStyle::Letter)
        } else if label == config.syllable_label {
            Ok(NotationStyle::Syllable)
        } else {
            Err(TransposeError::InvalidStyle(label.to_string()))
        }
    }

    /// The configured label naming this style.
    pub fn label(self, config: &NotationConfig) -> &str {
        match self {
            NotationStyle::Letter => &config.letter_label,
            NotationStyle::Syllable => &config.syllable_label,
        }
    }
}

/// A chord token split into its parts: base name, style, summed alteration
/// and the number of accidental characters seen.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenParts {
    pub base: BaseName,
    pub style: NotationStyle,
    pub alter: i32,
    pub accidentals: u32,
}

/// Split a token on the configured accidental characters.
///
/// Every sharp/flat character counts wherever it appears; the remaining
/// characters must form a known base name. Each sharp contributes +1 and
/// each flat -1, so double and even mixed runs resolve mechanically.
pub(crate) fn split_token(token: &str, config: &NotationConfig) -> Option<TokenParts> {
    let mut base = String::new();
    let mut alter = 0i32;
    let mut accidentals = 0u32;
    for ch in token.chars() {
        if ch == config.sharp {
            alter += 1;
            accidentals += 1;
        } else if ch == config.flat {
            alter -= 1;
            accidentals += 1;
        } else {
            base.push(ch);
        }
    }
    let (base, style) = match BaseName::from_letter(&base) {
        Some(base) => (base, NotationStyle::Letter),
        None => (BaseName::from_syllable(&base)?, NotationStyle::Syllable),
    };
    Some(TokenParts {
        base,
        style,
        alter,
        accidentals,
    })
}

/// Parse a chord token into its spelling and style.
pub(crate) fn parse_chord(
    token: &str,
    config: &NotationConfig,
) -> Result<(Spelling, NotationStyle), TransposeError> {
    let parts =
        split_token(token, config).ok_or_else(|| TransposeError::InvalidChord(token.to_string()))?;
    // The summed alteration is folded into the pitch class later; clamping
    // to i8 is safe for any token short enough to be a chord name.
    let spelling = Spelling::new(parts.base, parts.alter.clamp(-64, 64) as i8);
    Ok((spelling, parts.style))
}

/// Classify a chord token as letter or syllable notation.
pub fn classify(token: &str, config: &NotationConfig) -> Result<NotationStyle, TransposeError> {
    split_token(token, config)
        .map(|parts| parts.style)
        .ok_or_else(|| TransposeError::InvalidChord(token.to_string()))
}

/// Whether the token is a letter-notation chord.
pub fn is_letter(token: &str, config: &NotationConfig) -> bool {
    matches!(classify(token, config), Ok(NotationStyle::Letter))
}

/// Whether the token is a syllable-notation chord.
pub fn is_syllable(token: &str, config: &NotationConfig) -> bool {
    matches!(classify(token, config), Ok(NotationStyle::Syllable))
}

/// Convert a chord token between notation styles.
///
/// Only the base name is translated; accidental characters are copied
/// through unchanged and in their original order, so `FA##` becomes `F##`
/// and `MIb` becomes `Eb` regardless of how either would be re-spelled.
pub fn convert_style(
    token: &str,
    out: NotationStyle,
    config: &NotationConfig,
) -> Result<String, TransposeError> {
    let parts =
        split_token(token, config).ok_or_else(|| TransposeError::InvalidChord(token.to_string()))?;
    if parts.style == out {
        return Ok(token.to_string());
    }
    let mut converted = String::from(parts.base.name(out));
    for ch in token.chars() {
        if ch == config.sharp || ch == config.flat {
            converted.push(ch);
        }
    }
    Ok(converted)
}
