//! Structure resolution — orders authored sections according to structure labels.

use std::collections::HashMap;

use log::debug;

use super::definition::Label;
use crate::error::{FluidError, Result};

/// Select sections in label order.
///
/// `UniqueIntro` takes the first section and shifts every later numeric label
/// by one, since the intro is no longer part of the repeatable pool.
/// `UniqueOutro` takes the last section without shifting anything.
/// The result always has one entry per label.
pub fn resolve<'a, T>(sections: &'a [T], labels: &[Label]) -> Result<Vec<&'a T>> {
    let mut offset = 0;
    let mut resolved = Vec::with_capacity(labels.len());

    for label in labels {
        let index = match label {
            Label::UniqueIntro => {
                offset += 1;
                0
            }
            Label::UniqueOutro => sections.len().saturating_sub(1),
            Label::Index(i) => i + offset,
        };
        let section = sections.get(index).ok_or(FluidError::StructureIndex {
            index,
            len: sections.len(),
        })?;
        resolved.push(section);
    }

    debug!(
        "resolved {} labels over {} authored sections",
        resolved.len(),
        sections.len()
    );
    Ok(resolved)
}

/// Display names for resolved sections: `Intro`, `Outro`, and for numeric
/// labels a letter with a running count per letter (`A0`, `B0`, `A1`).
pub fn section_names(labels: &[Label]) -> Vec<String> {
    const LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut counts: HashMap<usize, usize> = HashMap::new();

    labels
        .iter()
        .map(|label| match label {
            Label::UniqueIntro => "Intro".to_string(),
            Label::UniqueOutro => "Outro".to_string(),
            Label::Index(i) => {
                let count = counts.entry(*i).or_insert(0);
                let n = *count;
                *count += 1;
                match LETTERS.get(*i) {
                    Some(letter) => format!("{}{n}", *letter as char),
                    None => format!("S{i}_{n}"),
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECTIONS: [&str; 4] = ["intro", "verse", "chorus", "outro"];

    fn resolved(labels: &[Label]) -> Result<Vec<&'static str>> {
        resolve(&SECTIONS, labels).map(|v| v.into_iter().copied().collect())
    }

    #[test]
    fn intro_shifts_numeric_labels() {
        let labels = [
            Label::UniqueIntro,
            Label::Index(0),
            Label::Index(1),
            Label::UniqueOutro,
        ];
        assert_eq!(
            resolved(&labels).unwrap(),
            ["intro", "verse", "chorus", "outro"]
        );
    }

    #[test]
    fn without_intro_labels_are_direct() {
        let labels = [Label::Index(0), Label::Index(2), Label::Index(0)];
        assert_eq!(resolved(&labels).unwrap(), ["intro", "chorus", "intro"]);
    }

    #[test]
    fn repeated_sections() {
        let labels = [
            Label::UniqueIntro,
            Label::Index(0),
            Label::Index(1),
            Label::Index(0),
            Label::Index(1),
            Label::UniqueOutro,
        ];
        let out = resolved(&labels).unwrap();
        assert_eq!(out.len(), labels.len());
        assert_eq!(out, ["intro", "verse", "chorus", "verse", "chorus", "outro"]);
    }

    #[test]
    fn outro_does_not_shift() {
        let labels = [Label::UniqueOutro, Label::Index(1)];
        assert_eq!(resolved(&labels).unwrap(), ["outro", "verse"]);
    }

    #[test]
    fn out_of_range_reports_index_and_len() {
        let labels = [Label::UniqueIntro, Label::Index(3)];
        match resolved(&labels) {
            Err(FluidError::StructureIndex { index, len }) => {
                assert_eq!(index, 4);
                assert_eq!(len, 4);
            }
            other => panic!("expected StructureIndex, got {other:?}"),
        }
    }

    #[test]
    fn empty_sections_fail_for_any_label() {
        let empty: [&str; 0] = [];
        assert!(resolve(&empty, &[Label::UniqueOutro]).is_err());
        assert!(resolve(&empty, &[Label::UniqueIntro]).is_err());
        assert!(resolve(&empty, &[]).unwrap().is_empty());
    }

    #[test]
    fn names_count_per_letter() {
        let labels = [
            Label::UniqueIntro,
            Label::Index(0),
            Label::Index(1),
            Label::Index(0),
            Label::UniqueOutro,
        ];
        assert_eq!(section_names(&labels), ["Intro", "A0", "B0", "A1", "Outro"]);
    }

    #[test]
    fn names_beyond_alphabet() {
        assert_eq!(section_names(&[Label::Index(30), Label::Index(30)]), ["S30_0", "S30_1"]);
    }

    #[test]
    fn names_for_huge_labels() {
        let big = usize::MAX;
        assert_eq!(
            section_names(&[Label::Index(big), Label::Index(0), Label::Index(big)]),
            [format!("S{big}_0"), "A0".to_string(), format!("S{big}_1")]
        );
    }
}
