//! Note name parsing — converts "c4", "Eb2", "c##4" to MIDI note numbers.

use log::warn;

use super::NotationValue;
use crate::error::{FluidError, Result};

/// The seven natural pitch letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Case-insensitive lookup.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'c' => Some(Letter::C),
            'd' => Some(Letter::D),
            'e' => Some(Letter::E),
            'f' => Some(Letter::F),
            'g' => Some(Letter::G),
            'a' => Some(Letter::A),
            'b' => Some(Letter::B),
            _ => None,
        }
    }

    /// Semitone offset above C.
    pub fn semitone(self) -> i64 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }
}

/// Parse a note name string into a MIDI note number.
///
/// Format: `<letter><accidentals><octave>`
/// - Letter: c d e f g a b, either case
/// - Accidentals: any run of `#` (+1) and `b` (-1)
/// - Octave: signed integer (C4 = middle C = MIDI 60)
///
/// Returns `None` if the name doesn't parse or lands outside 0-127.
pub fn parse_note_name(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let letter = Letter::from_char(chars.next()?)?;
    let rest = chars.as_str();

    let octave_at = rest
        .find(|c: char| c != '#' && c != 'b')
        .unwrap_or(rest.len());
    let (accidentals, octave_str) = rest.split_at(octave_at);

    let accidental: i64 = accidentals
        .chars()
        .map(|c| if c == '#' { 1 } else { -1 })
        .sum();
    let octave: i64 = octave_str.parse().ok()?;

    // C-1 = 0, C4 = 60, A4 = 69
    let midi = octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(letter.semitone())?
        .checked_add(accidental)?;

    u8::try_from(midi).ok().filter(|m| *m <= 127)
}

/// Floats at or beyond this magnitude don't fit in an `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Convert a pitch notation into a MIDI note number.
///
/// Numbers are returned unchanged without a range check; a number outside
/// 0-127 only logs a warning. Fractional numbers are not note numbers.
pub fn value_to_midi_note_number(value: &NotationValue) -> Result<i64> {
    match value {
        NotationValue::Int(n) => {
            if !(0..=127).contains(n) {
                warn!("pitch {n} is outside the MIDI range; passing it through");
            }
            Ok(*n)
        }
        NotationValue::Float(f) if f.fract() == 0.0 && f.abs() < I64_LIMIT => {
            value_to_midi_note_number(&NotationValue::Int(*f as i64))
        }
        NotationValue::Float(_) => Err(FluidError::InvalidNoteName(value.to_string())),
        NotationValue::Text(name) => parse_note_name(name)
            .map(i64::from)
            .ok_or_else(|| FluidError::InvalidNoteName(value.to_string())),
    }
}
