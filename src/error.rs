//! Error types for the transposition engine.
//!
//! Every failure is a non-recoverable rejection of the single call in
//! progress; there is nothing to retry and no partial result is returned.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransposeError {
    /// Token matches neither notation's chord grammar.
    ///
    /// # Example
    /// ```
    /// # use capo::TransposeError;
    /// let err = TransposeError::InvalidChord("H#".to_string());
    /// assert_eq!(err.to_string(), "invalid chord: H#");
    /// ```
    #[error("invalid chord: {0}")]
    InvalidChord(String),

    /// Key token is not one of the supported key spellings.
    ///
    /// Keys are limited to the seventeen standard major-key spellings;
    /// remote enharmonic aliases such as `E#` or `Cb` are rejected rather
    /// than guessed.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Output style label is not one of the configured notation labels.
    #[error("invalid output style: {0}")]
    InvalidStyle(String),

    /// Key auto-detection was required but the song contains no chord.
    #[error("no chord found in song")]
    NoChordFound,

    /// A caller-supplied marker delimiter pattern failed to compile.
    #[error("invalid marker pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
