//! # capo
//!
//! Transposes chord annotations embedded in song lyric sheets. Chords are
//! written inline in either letter (`A`-`G`) or syllable (`DO`-`SI`)
//! notation; the engine shifts them by a signed number of semitones and
//! re-spells the result in canonical reference form, or from the diatonic
//! table of a target key, with correct circle-of-fifths enharmonics up to
//! theoretical double accidentals. Mid-song `\key{...}` directives change
//! the active key for the rest of the sheet.
//!
//! ```rust
//! use capo::{transpose_song, SongOptions, TargetKey};
//!
//! let song = r"Exa\[DO#/RE]mple so\[Bb4]ng";
//! let options = SongOptions::default().to_key(TargetKey::Named("F".to_string()));
//! assert_eq!(transpose_song(song, 3, &options)?, r"Exa\[E/F]mple so\[Db4]ng");
//! # Ok::<(), capo::TransposeError>(())
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod notation;
pub mod pitch;
mod scanner;
pub mod song;
pub mod transpose;

pub use config::NotationConfig;
pub use error::TransposeError;
pub use key::{Key, Preference};
pub use notation::{classify, convert_style, is_letter, is_syllable, NotationStyle};
pub use pitch::{BaseName, PitchClass, Spelling};
pub use song::{
    SongOptions, TargetKey, DEFAULT_POST_CHORD, DEFAULT_POST_KEY, DEFAULT_PRE_CHORD,
    DEFAULT_PRE_KEY,
};
pub use transpose::Transposer;

use once_cell::sync::Lazy;

static DEFAULT_ENGINE: Lazy<Transposer> =
    Lazy::new(|| Transposer::new(NotationConfig::default()).expect("default chord pattern compiles"));

/// Transpose a single chord with the default notation configuration.
///
/// With a target key the result is spelled from that key's diatonic table;
/// without one it comes back in reference (simplest) form.
///
/// # Example
/// ```rust
/// use capo::{transpose_chord, NotationStyle};
///
/// assert_eq!(transpose_chord("C", 3, Some("Bb"), NotationStyle::Letter)?, "Eb");
/// assert_eq!(transpose_chord("F##", 1, None, NotationStyle::Letter)?, "G#");
/// # Ok::<(), capo::TransposeError>(())
/// ```
pub fn transpose_chord(
    chord: &str,
    semitones: i32,
    to_key: Option<&str>,
    out: NotationStyle,
) -> Result<String, TransposeError> {
    DEFAULT_ENGINE.transpose_chord(chord, semitones, to_key, out)
}

/// Transpose every chord token in a text fragment with the default
/// notation configuration.
///
/// # Example
/// ```rust
/// use capo::{transpose_chord_group, NotationStyle};
///
/// let line = transpose_chord_group("DO#/RE A#", 3, Some("D#"), NotationStyle::Letter)?;
/// assert_eq!(line, "E/E# C#");
/// # Ok::<(), capo::TransposeError>(())
/// ```
pub fn transpose_chord_group(
    text: &str,
    semitones: i32,
    to_key: Option<&str>,
    out: NotationStyle,
) -> Result<String, TransposeError> {
    DEFAULT_ENGINE.transpose_chord_group(text, semitones, to_key, out)
}

/// Detect a song's key from its first chord marker and transpose it.
/// Returns `Ok(None)` for a song without chord markers.
///
/// # Example
/// ```rust
/// use capo::{song_key, SongOptions};
///
/// assert_eq!(song_key(r"Exa\[Fb]mple so\[Bb4]ng", 0, &SongOptions::default())?,
///            Some("E".to_string()));
/// assert_eq!(song_key("Example song", 2, &SongOptions::default())?, None);
/// # Ok::<(), capo::TransposeError>(())
/// ```
pub fn song_key(
    song: &str,
    semitones: i32,
    options: &SongOptions,
) -> Result<Option<String>, TransposeError> {
    DEFAULT_ENGINE.song_key(song, semitones, options)
}

/// Transpose a whole song with the default notation configuration,
/// honoring key-change directives.
pub fn transpose_song(
    song: &str,
    semitones: i32,
    options: &SongOptions,
) -> Result<String, TransposeError> {
    DEFAULT_ENGINE.transpose_song(song, semitones, options)
}
