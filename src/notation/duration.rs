//! Duration notation — converts `0.25`, `"1/4"` and `"quarter"` to whole-note fractions.

use log::trace;

use super::NotationValue;
use crate::error::{FluidError, Result};

/// Named note durations, each a power-of-two fraction of a whole note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationName {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl DurationName {
    pub const ALL: [DurationName; 7] = [
        DurationName::Whole,
        DurationName::Half,
        DurationName::Quarter,
        DurationName::Eighth,
        DurationName::Sixteenth,
        DurationName::ThirtySecond,
        DurationName::SixtyFourth,
    ];

    /// Look up a name. Matching is exact and case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            DurationName::Whole => "whole",
            DurationName::Half => "half",
            DurationName::Quarter => "quarter",
            DurationName::Eighth => "eighth",
            DurationName::Sixteenth => "sixteenth",
            DurationName::ThirtySecond => "thirtysecond",
            DurationName::SixtyFourth => "sixty-fourth",
        }
    }

    /// Fraction of a whole note: `1 / 2^n`.
    pub fn whole_notes(self) -> f64 {
        1.0 / (1u32 << self as u32) as f64
    }
}

/// Convert a duration notation into a fraction of a whole note.
///
/// Numbers are taken to already be whole-note fractions and pass through
/// unchanged. Strings are either a rational `"a/b"` or a [`DurationName`].
pub fn value_to_whole_notes(value: &NotationValue) -> Result<f64> {
    match value {
        NotationValue::Int(v) => Ok(*v as f64),
        NotationValue::Float(v) => Ok(*v),
        NotationValue::Text(text) => {
            if let Some(fraction) = parse_fraction(text) {
                trace!("duration {text:?} parsed as fraction {fraction}");
                return Ok(fraction);
            }
            DurationName::from_name(text)
                .map(DurationName::whole_notes)
                .ok_or_else(|| FluidError::InvalidDuration(value.to_string()))
        }
    }
}

/// Parse `^\d+/\d+$`. A zero numerator or denominator is rejected since
/// durations must be strictly positive.
fn parse_fraction(text: &str) -> Option<f64> {
    let (num, den) = text.split_once('/')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(num) || !all_digits(den) {
        return None;
    }
    let num: u64 = num.parse().ok()?;
    let den: u64 = den.parse().ok()?;
    if num == 0 || den == 0 {
        return None;
    }
    Some(num as f64 / den as f64)
}
