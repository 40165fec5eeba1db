//! Notation configuration.
//!
//! The annotation dialect is configurable: which character marks a
//! sharp, which marks a flat, and how the two naming styles are labelled in
//! user-facing contexts (CLI flags, configuration files). A configuration is
//! a plain value handed to [`Transposer::new`](crate::Transposer::new); two
//! engines built from different configurations coexist without interfering.

use serde::{Deserialize, Serialize};

/// Symbols and labels of the chord-annotation dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotationConfig {
    /// Character that raises a note by one semitone. Default `#`.
    pub sharp: char,
    /// Character that lowers a note by one semitone. Default `b`.
    pub flat: char,
    /// Label for the letter (A-B-C) notation style. Default `abc`.
    pub letter_label: String,
    /// Label for the syllable (DO-RE-MI) notation style. Default `doremi`.
    pub syllable_label: String,
}

impl Default for NotationConfig {
    fn default() -> Self {
        NotationConfig {
            sharp: '#',
            flat: 'b',
            letter_label: "abc".to_string(),
            syllable_label: "doremi".to_string(),
        }
    }
}
