//! The transposition engine.

use regex::Regex;

use crate::config::NotationConfig;
use crate::error::TransposeError;
use crate::key::{Key, Preference};
use crate::notation::{self, NotationStyle};
use crate::pitch::PitchClass;

/// Chord and song transposition over one notation configuration.
///
/// Owns the configuration and the compiled chord-token pattern, so
/// construction is the only fallible step. A built engine is immutable and
/// can be shared freely across threads; engines with different symbol sets
/// are simply different values.
pub struct Transposer {
    config: NotationConfig,
    chord_re: Regex,
}

impl Transposer {
    /// Build an engine for the given notation configuration.
    pub fn new(config: NotationConfig) -> Result<Transposer, TransposeError> {
        let accidental = format!(
            "[{}{}]",
            regex::escape(&config.sharp.to_string()),
            regex::escape(&config.flat.to_string())
        );
        // Syllables are tried before single letters so that `DO` never
        // matches as a bare `D`.
        let pattern = format!(
            "(?:DO|RE|MI|FA|SOL|LA|SI){acc}{{0,2}}|[A-G]{acc}{{0,2}}",
            acc = accidental
        );
        Ok(Transposer {
            chord_re: Regex::new(&pattern)?,
            config,
        })
    }

    pub fn config(&self) -> &NotationConfig {
        &self.config
    }

    pub(crate) fn chord_regex(&self) -> &Regex {
        &self.chord_re
    }

    /// Classify a chord token as letter or syllable notation.
    pub fn classify(&self, token: &str) -> Result<NotationStyle, TransposeError> {
        notation::classify(token, &self.config)
    }

    /// Convert a chord token between notation styles, translating the base
    /// name and copying the accidental characters through verbatim.
    pub fn convert_style(&self, token: &str, out: NotationStyle) -> Result<String, TransposeError> {
        notation::convert_style(token, out, &self.config)
    }

    /// Canonical pitch class of a chord token.
    pub fn pitch_class_of(&self, chord: &str) -> Result<PitchClass, TransposeError> {
        let (spelling, _) = notation::parse_chord(chord, &self.config)?;
        Ok(spelling.pitch_class())
    }

    /// Reference (simplest) spelling of a chord, in the chord's own style.
    ///
    /// `Fb` becomes `E`, `F##` becomes `G`, `RE#` becomes `MIb`.
    pub fn to_reference(&self, chord: &str) -> Result<String, TransposeError> {
        let (spelling, style) = notation::parse_chord(chord, &self.config)?;
        Ok(spelling.pitch_class().reference().render(style, &self.config))
    }

    /// Transpose a chord by a signed number of semitones.
    ///
    /// With a target key the result is spelled from that key's diatonic
    /// table; without one it is returned in reference form. Large and
    /// negative shifts wrap with true modulo.
    pub fn transpose_chord(
        &self,
        chord: &str,
        semitones: i32,
        to_key: Option<&str>,
        out: NotationStyle,
    ) -> Result<String, TransposeError> {
        let pitch_class = self.pitch_class_of(chord)?;
        self.spell(pitch_class.transpose(semitones), to_key, out)
    }

    /// Re-spell a chord for a key without transposing it.
    ///
    /// `C` in the key of `C` is just `C`, but in the key of `C#` it is
    /// spelled `B#`.
    pub fn express_chord_in_key(
        &self,
        chord: &str,
        key: &str,
        out: NotationStyle,
    ) -> Result<String, TransposeError> {
        let pitch_class = self.pitch_class_of(chord)?;
        self.spell(pitch_class, Some(key), out)
    }

    fn spell(
        &self,
        pitch_class: PitchClass,
        to_key: Option<&str>,
        out: NotationStyle,
    ) -> Result<String, TransposeError> {
        let spelling = match to_key {
            Some(token) => Key::parse(token, &self.config)?.diatonic()[pitch_class.index()],
            None => pitch_class.reference(),
        };
        Ok(spelling.render(out, &self.config))
    }

    /// Transpose every chord token in a text fragment.
    ///
    /// The fragment is scanned once, left to right; each match is replaced
    /// and everything else passes through unchanged, so chord-quality
    /// suffixes and bar separators survive, and a slash-chord bass note is
    /// matched and transposed on its own. Replacements may be longer or
    /// shorter than what they replace.
    pub fn transpose_chord_group(
        &self,
        text: &str,
        semitones: i32,
        to_key: Option<&str>,
        out: NotationStyle,
    ) -> Result<String, TransposeError> {
        let mut result = String::with_capacity(text.len());
        let mut tail = 0;
        for m in self.chord_re.find_iter(text) {
            result.push_str(&text[tail..m.start()]);
            result.push_str(&self.transpose_chord(m.as_str(), semitones, to_key, out)?);
            tail = m.end();
        }
        result.push_str(&text[tail..]);
        Ok(result)
    }

    /// Rendered diatonic spelling table of a key, indexed by pitch class.
    pub fn diatonic_spellings(
        &self,
        key: &str,
        out: NotationStyle,
    ) -> Result<Vec<String>, TransposeError> {
        let key = Key::parse(key, &self.config)?;
        Ok(key
            .diatonic()
            .iter()
            .map(|spelling| spelling.render(out, &self.config))
            .collect())
    }

    /// Rendered reference spelling of every pitch class.
    pub fn reference_spellings(&self, out: NotationStyle) -> Vec<String> {
        (0..12)
            .map(|index| PitchClass::new(index).reference().render(out, &self.config))
            .collect()
    }

    /// Sharp/flat preference of a key.
    pub fn sharp_flat_preference(&self, key: &str) -> Result<Preference, TransposeError> {
        Ok(Key::parse(key, &self.config)?.preference())
    }

    /// Signed semitone distance from one key to another, in -11..=11.
    pub fn transposition_steps(&self, from_key: &str, to_key: &str) -> Result<i32, TransposeError> {
        let from = Key::parse(from_key, &self.config)?;
        let to = Key::parse(to_key, &self.config)?;
        Ok(to.pitch_class().index() as i32 - from.pitch_class().index() as i32)
    }
}
