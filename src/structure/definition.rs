//! Structure definitions — section ordering labels and per-section modifiers.
//!
//! Definitions are written by hand in JSON or YAML, so numbers are accepted
//! either as numbers or as numeric strings. Validation happens when a field is
//! read, not at load time, so a definition with an unused bad field still works.

use serde::{Deserialize, Serialize};

use crate::error::{FluidError, Result};

/// Reserved label: the first authored section, played once at the start.
pub const UNIQUE_INTRO: &str = "unique_intro";
/// Reserved label: the last authored section, played once at the end.
pub const UNIQUE_OUTRO: &str = "unique_outro";

/// A number as written in a definition file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Numeric {
    /// Read as an integer. Fractional values truncate toward zero whether
    /// written as numbers or as strings; values outside `i64` are rejected.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Numeric::Int(v) => Some(*v),
            Numeric::Float(v) => truncate(*v),
            Numeric::Text(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| truncate(s.parse().ok()?))
            }
        }
    }
}

fn truncate(v: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = v.trunc();
    (t.is_finite() && t.abs() < LIMIT).then_some(t as i64)
}

impl From<i64> for Numeric {
    fn from(v: i64) -> Self {
        Numeric::Int(v)
    }
}

impl From<&str> for Numeric {
    fn from(v: &str) -> Self {
        Numeric::Text(v.to_string())
    }
}

/// A structure label: which authored section to place next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    UniqueIntro,
    UniqueOutro,
    Index(usize),
}

impl Label {
    fn from_numeric(raw: &Numeric) -> Result<Label> {
        if let Numeric::Text(s) = raw {
            match s.as_str() {
                UNIQUE_INTRO => return Ok(Label::UniqueIntro),
                UNIQUE_OUTRO => return Ok(Label::UniqueOutro),
                _ => {}
            }
        }
        raw.as_int()
            .and_then(|i| usize::try_from(i).ok())
            .map(Label::Index)
            .ok_or_else(|| FluidError::malformed_structure(format!("invalid label {raw:?}")))
    }
}

/// Per-section modifiers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SectionTemplate {
    /// Semitone transposition for the pitch library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_diff: Option<Numeric>,
    /// Drum presence: exactly zero removes the drums subtree.
    #[serde(
        rename = "drums-delta",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub drums_delta: Option<Numeric>,
}

impl SectionTemplate {
    pub fn new(key_diff: i64, drums_delta: i64) -> Self {
        Self {
            key_diff: Some(key_diff.into()),
            drums_delta: Some(drums_delta.into()),
        }
    }

    pub fn key_diff(&self) -> Result<i64> {
        read_field(&self.key_diff, "key_diff")
    }

    pub fn drums_delta(&self) -> Result<i64> {
        read_field(&self.drums_delta, "drums-delta")
    }
}

fn read_field(value: &Option<Numeric>, name: &str) -> Result<i64> {
    let raw = value
        .as_ref()
        .ok_or_else(|| FluidError::malformed_structure(format!("section template is missing `{name}`")))?;
    raw.as_int().ok_or_else(|| {
        FluidError::malformed_structure(format!("`{name}` is not an integer: {raw:?}"))
    })
}

/// One entry of the `structure` list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructureEntry {
    #[serde(default)]
    pub labels: Vec<Numeric>,
}

/// A structure definition as supplied by a collaborator.
///
/// ```yaml
/// structure:
///   - labels: [unique_intro, 0, 1, 0, unique_outro]
/// sections:
///   - [{ key_diff: 0, drums-delta: 0 }]
///   - [{ key_diff: 2, drums-delta: 1 }]
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StructureDefinition {
    #[serde(default)]
    pub structure: Vec<StructureEntry>,
    #[serde(default)]
    pub sections: Vec<Vec<SectionTemplate>>,
}

impl StructureDefinition {
    /// Build a definition from parsed labels and one template per resolved section.
    pub fn new(labels: &[Label], templates: Vec<SectionTemplate>) -> Self {
        let labels = labels
            .iter()
            .map(|label| match label {
                Label::UniqueIntro => Numeric::from(UNIQUE_INTRO),
                Label::UniqueOutro => Numeric::from(UNIQUE_OUTRO),
                Label::Index(i) => Numeric::Int(*i as i64),
            })
            .collect();
        Self {
            structure: vec![StructureEntry { labels }],
            sections: templates.into_iter().map(|t| vec![t]).collect(),
        }
    }

    /// The labels of the first structure entry.
    pub fn labels(&self) -> Result<Vec<Label>> {
        let entry = self
            .structure
            .first()
            .ok_or_else(|| FluidError::malformed_structure("`structure` has no entries"))?;
        entry.labels.iter().map(Label::from_numeric).collect()
    }

    /// The modifiers for a resolved section position.
    pub fn template(&self, section_index: usize) -> Result<&SectionTemplate> {
        self.sections
            .get(section_index)
            .and_then(|entries| entries.first())
            .ok_or_else(|| {
                FluidError::malformed_structure(format!(
                    "no section template for section {section_index}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
structure:
  - labels: [unique_intro, "0", 1, "0", unique_outro]
sections:
  - [{ key_diff: 0, drums-delta: 0 }]
  - [{ key_diff: "2", drums-delta: 1 }]
"#;

    #[test]
    fn parse_yaml_definition() {
        let def: StructureDefinition = serde_yaml::from_str(SAMPLE).unwrap();
        assert_eq!(
            def.labels().unwrap(),
            vec![
                Label::UniqueIntro,
                Label::Index(0),
                Label::Index(1),
                Label::Index(0),
                Label::UniqueOutro
            ]
        );
        assert_eq!(def.template(1).unwrap().key_diff().unwrap(), 2);
        assert_eq!(def.template(0).unwrap().drums_delta().unwrap(), 0);
    }

    #[test]
    fn parse_json_definition() {
        let json = r#"{"structure":[{"labels":["unique_intro",0]}],"sections":[[{"key_diff":-3,"drums-delta":2}]]}"#;
        let def: StructureDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.labels().unwrap().len(), 2);
        assert_eq!(def.template(0).unwrap().key_diff().unwrap(), -3);
    }

    #[test]
    fn missing_structure_entry_is_malformed() {
        let def: StructureDefinition = serde_yaml::from_str("sections: []").unwrap();
        assert!(matches!(def.labels(), Err(FluidError::MalformedStructure(_))));
    }

    #[test]
    fn bad_label_is_malformed() {
        let def: StructureDefinition =
            serde_yaml::from_str("structure: [{ labels: [verse] }]").unwrap();
        assert!(matches!(def.labels(), Err(FluidError::MalformedStructure(_))));

        let def: StructureDefinition =
            serde_yaml::from_str("structure: [{ labels: [-1] }]").unwrap();
        assert!(def.labels().is_err());
    }

    #[test]
    fn missing_template_is_malformed() {
        let def: StructureDefinition = serde_yaml::from_str("sections: [[]]").unwrap();
        assert!(matches!(def.template(0), Err(FluidError::MalformedStructure(_))));
        assert!(def.template(5).is_err());
    }

    #[test]
    fn missing_fields_are_malformed() {
        let t = SectionTemplate::default();
        assert!(matches!(t.key_diff(), Err(FluidError::MalformedStructure(_))));
        assert!(t.drums_delta().is_err());

        let t = SectionTemplate {
            key_diff: Some("up".into()),
            drums_delta: None,
        };
        assert!(t.key_diff().is_err());
    }

    #[test]
    fn new_round_trips_through_accessors() {
        let labels = [Label::UniqueIntro, Label::Index(0), Label::UniqueOutro];
        let def = StructureDefinition::new(
            &labels,
            vec![
                SectionTemplate::new(0, 1),
                SectionTemplate::new(5, 0),
                SectionTemplate::new(-2, 1),
            ],
        );
        assert_eq!(def.labels().unwrap(), labels);
        assert_eq!(def.template(1).unwrap().key_diff().unwrap(), 5);

        let yaml = serde_yaml::to_string(&def).unwrap();
        let parsed: StructureDefinition = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.labels().unwrap(), labels);
    }

    #[test]
    fn float_values_truncate() {
        assert_eq!(Numeric::Float(2.9).as_int(), Some(2));
        assert_eq!(Numeric::Float(-2.9).as_int(), Some(-2));
        assert_eq!(Numeric::Float(f64::NAN).as_int(), None);
        assert_eq!(Numeric::Float(1e20).as_int(), None);
    }

    #[test]
    fn strings_and_floats_truncate_alike() {
        for (text, float) in [("2.9", 2.9), ("-2.9", -2.9), (" 0.5 ", 0.5)] {
            assert_eq!(Numeric::from(text).as_int(), Numeric::Float(float).as_int());
        }
        assert_eq!(Numeric::from("7").as_int(), Some(7));
        assert_eq!(Numeric::from("up").as_int(), None);
        assert_eq!(Numeric::from("NaN").as_int(), None);
        assert_eq!(Numeric::from("1e30").as_int(), None);
    }

    #[test]
    fn fractional_string_key_diff_truncates() {
        let t = SectionTemplate {
            key_diff: Some("2.9".into()),
            drums_delta: Some(Numeric::Float(0.4)),
        };
        assert_eq!(t.key_diff().unwrap(), 2);
        assert_eq!(t.drums_delta().unwrap(), 0);
    }
}
