//! Song-level transposition: chord markers, key-change directives and
//! key-scoped segments.
//!
//! A song is plain lyric text with two inline marker grammars. Chord
//! markers (`\[...]` by default) hold chord groups to transpose. Key-change
//! directives (`\key{...}` by default) split the song into contiguous
//! segments, each with its own effective target key; the keyspec is either
//! a literal key name or a signed semitone offset (`+2`, `-3`) relative to
//! the key active at that point.
//!
//! Key resolution is two-pass: the resolution chain advances at zero
//! semitones (seeded by the requested target key, else by the reference
//! spelling of the song's first chord), and each segment's effective key is
//! the chain key transposed by the global semitone shift.

use log::debug;
use regex::Regex;

use crate::error::TransposeError;
use crate::notation::NotationStyle;
use crate::scanner::find_markers;
use crate::transpose::Transposer;

/// Default pattern opening a chord marker: matches `\[`.
pub const DEFAULT_PRE_CHORD: &str = r"\\\[";
/// Default pattern closing a chord marker: matches `]`.
pub const DEFAULT_POST_CHORD: &str = r"\]";
/// Default pattern opening a key-change directive: matches `\key{`.
pub const DEFAULT_PRE_KEY: &str = r"\\key\{";
/// Default pattern closing a key-change directive: matches `}`.
pub const DEFAULT_POST_KEY: &str = r"\}";

/// Target key selection for a song transposition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TargetKey {
    /// No key context: spell every chord in its reference form.
    #[default]
    Reference,
    /// Detect the key from the song's first chord.
    Auto,
    /// Spell chords from the named key's diatonic table.
    Named(String),
}

/// Options for [`Transposer::transpose_song`] and
/// [`Transposer::song_key`].
#[derive(Debug, Clone)]
pub struct SongOptions {
    pub to_key: TargetKey,
    pub out_style: NotationStyle,
    /// Regex pattern opening a chord marker.
    pub pre_chord: String,
    /// Regex pattern closing a chord marker.
    pub post_chord: String,
    /// Regex pattern opening a key-change directive.
    pub pre_key: String,
    /// Regex pattern closing a key-change directive.
    pub post_key: String,
    /// Remove key-change directives from the output. When false they are
    /// rewritten in place with the resolved, transposed key.
    pub clean_key_markers: bool,
}

impl Default for SongOptions {
    fn default() -> Self {
        SongOptions {
            to_key: TargetKey::Reference,
            out_style: NotationStyle::Letter,
            pre_chord: DEFAULT_PRE_CHORD.to_string(),
            post_chord: DEFAULT_POST_CHORD.to_string(),
            pre_key: DEFAULT_PRE_KEY.to_string(),
            post_key: DEFAULT_POST_KEY.to_string(),
            clean_key_markers: true,
        }
    }
}

impl SongOptions {
    pub fn to_key(mut self, to_key: TargetKey) -> Self {
        self.to_key = to_key;
        self
    }

    pub fn out_style(mut self, out_style: NotationStyle) -> Self {
        self.out_style = out_style;
        self
    }

    /// Override the chord-marker delimiter patterns.
    pub fn chord_markers(mut self, pre: &str, post: &str) -> Self {
        self.pre_chord = pre.to_string();
        self.post_chord = post.to_string();
        self
    }

    /// Override the key-change delimiter patterns.
    pub fn key_markers(mut self, pre: &str, post: &str) -> Self {
        self.pre_key = pre.to_string();
        self.post_key = post.to_string();
        self
    }

    /// Keep key-change directives in the output, rewritten with their
    /// resolved keys.
    pub fn keep_key_markers(mut self) -> Self {
        self.clean_key_markers = false;
        self
    }
}

impl Transposer {
    /// Detect the key of a song from its first chord and transpose it.
    ///
    /// The first chord token found inside a chord marker, normalized to
    /// reference form, is taken as the song's key. Returns `Ok(None)` for a
    /// song with no chord markers, a degenerate but valid input.
    pub fn song_key(
        &self,
        song: &str,
        semitones: i32,
        options: &SongOptions,
    ) -> Result<Option<String>, TransposeError> {
        let pre = Regex::new(&options.pre_chord)?;
        let post = Regex::new(&options.post_chord)?;
        match self.first_chord(song, &pre, &post) {
            Some(chord) => Ok(Some(self.transpose_chord(
                &chord,
                semitones,
                None,
                options.out_style,
            )?)),
            None => Ok(None),
        }
    }

    /// Transpose a whole song, honoring key-change directives.
    pub fn transpose_song(
        &self,
        song: &str,
        semitones: i32,
        options: &SongOptions,
    ) -> Result<String, TransposeError> {
        let pre_chord = Regex::new(&options.pre_chord)?;
        let post_chord = Regex::new(&options.post_chord)?;
        let pre_key = Regex::new(&options.pre_key)?;
        let post_key = Regex::new(&options.post_key)?;

        let key_markers = find_markers(song, &pre_key, &post_key);
        if key_markers.is_empty() {
            let target = match &options.to_key {
                TargetKey::Reference => None,
                TargetKey::Named(key) => Some(key.clone()),
                TargetKey::Auto => self.song_key(song, semitones, options)?,
            };
            return self.transpose_marked(
                song,
                semitones,
                target.as_deref(),
                options.out_style,
                &pre_chord,
                &post_chord,
            );
        }

        // Seed the resolution chain: the named target key, else the first
        // chord's reference spelling, untransposed.
        let mut chain = match &options.to_key {
            TargetKey::Named(key) => Some(key.clone()),
            TargetKey::Auto | TargetKey::Reference => {
                match self.first_chord(song, &pre_chord, &post_chord) {
                    Some(chord) => Some(self.to_reference(&chord)?),
                    None => None,
                }
            }
        };

        // The initial segment only gets a target key when one was asked for.
        let mut target = match (&options.to_key, &chain) {
            (TargetKey::Reference, _) | (_, None) => None,
            (_, Some(key)) => Some(self.transpose_chord(key, semitones, None, options.out_style)?),
        };

        let mut output = String::with_capacity(song.len());
        let mut segment_start = 0;
        for marker in &key_markers {
            output.push_str(&self.transpose_marked(
                &song[segment_start..marker.start],
                semitones,
                target.as_deref(),
                options.out_style,
                &pre_chord,
                &post_chord,
            )?);

            let chain_key = self.resolve_key_change(marker.inner(song), chain.as_deref())?;
            let effective =
                self.transpose_chord(&chain_key, semitones, None, options.out_style)?;
            debug!("key change to {chain_key}, effective key {effective}");
            if !options.clean_key_markers {
                output.push_str(&song[marker.start..marker.inner_start]);
                output.push_str(&effective);
                output.push_str(&song[marker.inner_end..marker.end]);
            }
            chain = Some(chain_key);
            target = Some(effective);
            segment_start = marker.end;
        }
        output.push_str(&self.transpose_marked(
            &song[segment_start..],
            semitones,
            target.as_deref(),
            options.out_style,
            &pre_chord,
            &post_chord,
        )?);
        Ok(output)
    }

    /// Transpose the chord markers of one key-scoped segment.
    fn transpose_marked(
        &self,
        text: &str,
        semitones: i32,
        to_key: Option<&str>,
        out: NotationStyle,
        pre: &Regex,
        post: &Regex,
    ) -> Result<String, TransposeError> {
        let mut result = String::with_capacity(text.len());
        let mut tail = 0;
        for marker in find_markers(text, pre, post) {
            result.push_str(&text[tail..marker.inner_start]);
            result.push_str(&self.transpose_chord_group(
                marker.inner(text),
                semitones,
                to_key,
                out,
            )?);
            tail = marker.inner_end;
        }
        result.push_str(&text[tail..]);
        Ok(result)
    }

    /// Resolve a key-change directive against the previous chain key.
    ///
    /// A signed integer keyspec shifts the previous key by that many
    /// semitones; a literal keyspec replaces it.
    fn resolve_key_change(
        &self,
        keyspec: &str,
        previous: Option<&str>,
    ) -> Result<String, TransposeError> {
        let keyspec = keyspec.trim();
        match parse_offset(keyspec) {
            Some(offset) => {
                let base = previous.ok_or(TransposeError::NoChordFound)?;
                let style = self.classify(base)?;
                self.transpose_chord(base, offset, None, style)
            }
            None => Ok(keyspec.to_string()),
        }
    }

    /// First chord token inside any chord marker.
    fn first_chord(&self, song: &str, pre: &Regex, post: &Regex) -> Option<String> {
        for marker in find_markers(song, pre, post) {
            if let Some(m) = self.chord_regex().find(marker.inner(song)) {
                return Some(m.as_str().to_string());
            }
        }
        None
    }
}

/// Parse a relative keyspec (`+N`/`-N`). Anything else is a literal key.
fn parse_offset(keyspec: &str) -> Option<i32> {
    if keyspec.starts_with('+') || keyspec.starts_with('-') {
        keyspec.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotationConfig;

    fn engine() -> Transposer {
        Transposer::new(NotationConfig::default()).unwrap()
    }

    fn named(key: &str) -> TargetKey {
        TargetKey::Named(key.to_string())
    }

    #[test]
    fn test_song_key_from_first_chord() {
        let engine = engine();
        let options = SongOptions::default();
        assert_eq!(
            engine
                .song_key(r"Exa\[Fb]mple so\[Bb4]ng", 0, &options)
                .unwrap(),
            Some("E".to_string())
        );
        assert_eq!(
            engine
                .song_key(r"Exa\[F##]mple so\[Bb4]ng", 0, &options)
                .unwrap(),
            Some("G".to_string())
        );
        assert_eq!(
            engine
                .song_key(r"Exa\[F]mple so\[Bb4]ng", 2, &options)
                .unwrap(),
            Some("G".to_string())
        );
    }

    #[test]
    fn test_song_key_styles() {
        let engine = engine();
        let options = SongOptions::default().out_style(NotationStyle::Syllable);
        assert_eq!(
            engine
                .song_key(r"Exa\[F]mple so\[Bb4]ng", 2, &options)
                .unwrap(),
            Some("SOL".to_string())
        );
    }

    #[test]
    fn test_song_key_without_chords() {
        let engine = engine();
        assert_eq!(
            engine
                .song_key("Example song", 2, &SongOptions::default())
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_transpose_song_to_key() {
        let engine = engine();
        let options = SongOptions::default().to_key(named("F"));
        assert_eq!(
            engine
                .transpose_song(r"Exa\[DO#/RE]mple so\[Bb4]ng", 3, &options)
                .unwrap(),
            r"Exa\[E/F]mple so\[Db4]ng"
        );
    }

    #[test]
    fn test_transpose_song_reference() {
        let engine = engine();
        assert_eq!(
            engine
                .transpose_song(r"Exa\[DO#/RE]mple so\[Bb4]ng", 3, &SongOptions::default())
                .unwrap(),
            r"Exa\[E/F]mple so\[C#4]ng"
        );
    }

    #[test]
    fn test_transpose_song_auto() {
        let engine = engine();
        let options = SongOptions::default().to_key(TargetKey::Auto);
        assert_eq!(
            engine
                .transpose_song(r"Exa\[RE]mple so\[Bb4]ng", 3, &options)
                .unwrap(),
            r"Exa\[F]mple so\[Db4]ng"
        );
    }

    #[test]
    fn test_transpose_song_custom_delimiters() {
        let engine = engine();
        let options = SongOptions::default()
            .to_key(named("F"))
            .out_style(NotationStyle::Syllable)
            .chord_markers("<<", ">>");
        assert_eq!(
            engine
                .transpose_song("Exa<<DO#/RE>>mple so<<Bb4>>ng", 3, &options)
                .unwrap(),
            "Exa<<MI/FA>>mple so<<REb4>>ng"
        );
    }

    #[test]
    fn test_key_change_literal() {
        let engine = engine();
        let options = SongOptions::default().to_key(named("D#"));
        assert_eq!(
            engine
                .transpose_song(r"Thi\[C]s is \key{SIb}an e\[A]xample \[C]song", 0, &options)
                .unwrap(),
            r"Thi\[C]s is an e\[A]xample \[C]song"
        );
    }

    #[test]
    fn test_key_change_rewrites_marker_when_kept() {
        let engine = engine();
        let options = SongOptions::default().to_key(named("D#")).keep_key_markers();
        assert_eq!(
            engine
                .transpose_song(r"Thi\[C]s is \key{SIb}an e\[A]xample \[C]song", 0, &options)
                .unwrap(),
            r"Thi\[C]s is \key{Bb}an e\[A]xample \[C]song"
        );
    }

    #[test]
    fn test_key_change_segments_use_their_keys() {
        let engine = engine();
        // First segment spelled from Eb (reference of D#), second from B.
        let options = SongOptions::default().to_key(named("D#"));
        assert_eq!(
            engine
                .transpose_song(r"\[Gb] one \key{B}two \[Gb]", 0, &options)
                .unwrap(),
            r"\[Gb] one two \[F#]"
        );
    }

    #[test]
    fn test_key_change_relative_offset() {
        let engine = engine();
        // Baseline is the first chord's reference (C, untransposed); +1
        // resolves the second segment to C#, where F is spelled E#.
        assert_eq!(
            engine
                .transpose_song(r"He\[C]y \key{+1}yo\[F]u", 0, &SongOptions::default())
                .unwrap(),
            r"He\[C]y yo\[E#]u"
        );
    }

    #[test]
    fn test_key_change_relative_offset_with_semitones() {
        let engine = engine();
        // Chain runs untransposed (C, then C#); the global shift is applied
        // per segment: the second segment's effective key is Eb.
        assert_eq!(
            engine
                .transpose_song(r"He\[C]y \key{+1}yo\[F]u", 2, &SongOptions::default())
                .unwrap(),
            r"He\[D]y yo\[G]u"
        );
    }

    #[test]
    fn test_key_change_relative_without_baseline() {
        let engine = engine();
        assert!(matches!(
            engine.transpose_song(r"la la \key{+2} la", 0, &SongOptions::default()),
            Err(TransposeError::NoChordFound)
        ));
    }

    #[test]
    fn test_key_change_chain_of_offsets() {
        let engine = engine();
        let options = SongOptions::default().to_key(named("C"));
        // C, then +2 -> D, then +2 -> E; G is spelled G in all three.
        assert_eq!(
            engine
                .transpose_song(r"\[G] a \key{+2}\[G] b \key{+2}\[G]", 0, &options)
                .unwrap(),
            r"\[G] a \[G] b \[G]"
        );
        // The same chain shifted by one semitone: effective keys C#, Eb, F.
        assert_eq!(
            engine
                .transpose_song(r"\[G] a \key{+2}\[G] b \key{+2}\[G]", 1, &options)
                .unwrap(),
            r"\[G#] a \[Ab] b \[Ab]"
        );
    }

    #[test]
    fn test_transpose_song_without_markers_is_unchanged() {
        let engine = engine();
        let options = SongOptions::default().to_key(TargetKey::Auto);
        assert_eq!(
            engine
                .transpose_song("no chords here", 5, &options)
                .unwrap(),
            "no chords here"
        );
    }

    #[test]
    fn test_invalid_delimiter_pattern() {
        let engine = engine();
        let options = SongOptions::default().chord_markers("(", ")");
        assert!(matches!(
            engine.transpose_song(r"\[C]", 1, &options),
            Err(TransposeError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("+3"), Some(3));
        assert_eq!(parse_offset("-11"), Some(-11));
        assert_eq!(parse_offset("Bb"), None);
        assert_eq!(parse_offset("3"), None);
        assert_eq!(parse_offset("+"), None);
    }
}
