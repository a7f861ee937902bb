// Note representation
// A note is a chromatic pitch position, displayed as name + octave ("C#4")

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The twelve chromatic note names, in pitch order within one octave.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Error raised when a note string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteError {
    #[error("invalid note format: {0:?}")]
    InvalidFormat(String),
}

/// A musical note, stored as its chromatic pitch position.
///
/// The pitch position is `octave * 12 + name_index`, where `name_index` is
/// the index within [`NOTE_NAMES`]. C0 is position 0; A4 is position 57.
/// Transposition can produce negative positions (below octave 0); those
/// still display correctly but do not round-trip through parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Note(i32);

impl Note {
    /// Create a note directly from a pitch position
    pub fn from_pitch_position(position: i32) -> Self {
        Self(position)
    }

    /// Lenient parse: falls back to pitch position 0 ("C0") on malformed
    /// input instead of failing. Boundary code that prefers to degrade
    /// rather than reject can use this; everything else should use
    /// [`FromStr`] and handle [`NoteError`].
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or(Self(0))
    }

    /// Chromatic pitch position (`octave * 12 + name_index`)
    pub fn pitch_position(&self) -> i32 {
        self.0
    }

    /// MIDI note number under the A4 = 69 convention
    pub fn midi_note(&self) -> i32 {
        self.0 + 12
    }

    /// Frequency in Hz, equal temperament relative to A4 = 440 Hz
    pub fn frequency_hz(&self) -> f64 {
        440.0 * 2f64.powf((self.midi_note() - 69) as f64 / 12.0)
    }

    /// Transpose by a signed number of semitones
    pub fn transpose(&self, semitones: i32) -> Note {
        Note(self.0 + semitones)
    }

    /// Note name without the octave ("C#")
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[self.0.rem_euclid(12) as usize]
    }

    /// Octave number (floor semantics, so negative positions land in
    /// negative octaves rather than truncating toward zero)
    pub fn octave(&self) -> i32 {
        self.0.div_euclid(12)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave())
    }
}

impl FromStr for Note {
    type Err = NoteError;

    /// Parse a note string such as "C#4".
    ///
    /// Accepts exactly one of the twelve canonical names followed by a
    /// non-negative octave number. Spellings like "E#4" or "Db4" are
    /// rejected rather than guessed at.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || NoteError::InvalidFormat(s.to_string());

        let name_len = match s.as_bytes() {
            [b'A'..=b'G', b'#', ..] => 2,
            [b'A'..=b'G', ..] => 1,
            _ => return Err(err()),
        };
        let (name, octave_str) = s.split_at(name_len);

        let name_index = NOTE_NAMES
            .iter()
            .position(|&n| n == name)
            .ok_or_else(err)?;

        if octave_str.is_empty() || !octave_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let octave: i32 = octave_str.parse().map_err(|_| err())?;

        Ok(Note(octave * 12 + name_index as i32))
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
