//! Value normalization — durations and pitches written in several notations,
//! reduced to whole-note fractions and MIDI note numbers.

pub mod duration;
pub mod pitch;

pub use duration::{value_to_whole_notes, DurationName};
pub use pitch::{parse_note_name, value_to_midi_note_number, Letter};

use serde::{Deserialize, Serialize};

/// A raw notation value as it appears in a score: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotationValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for NotationValue {
    fn from(v: i64) -> Self {
        NotationValue::Int(v)
    }
}

impl From<f64> for NotationValue {
    fn from(v: f64) -> Self {
        NotationValue::Float(v)
    }
}

impl From<&str> for NotationValue {
    fn from(v: &str) -> Self {
        NotationValue::Text(v.to_string())
    }
}

impl From<String> for NotationValue {
    fn from(v: String) -> Self {
        NotationValue::Text(v)
    }
}

impl std::fmt::Display for NotationValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotationValue::Int(v) => write!(f, "{v}"),
            NotationValue::Float(v) => write!(f, "{v}"),
            NotationValue::Text(s) => write!(f, "{s:?}"),
        }
    }
}
