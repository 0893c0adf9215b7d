use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::data::{SessionType, TeachingAssignment, UnplacedReason};

/// Index pairs of the fixed five-subject rotation over the sorted lab names.
const FIXED_ROTATION: [(usize, usize); 5] = [(0, 1), (1, 0), (2, 3), (4, 2), (3, 4)];

/// How a section's lab subjects are paired across batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationStrategy {
    /// Hand-built five-pairing rotation. Needs at least five lab subjects and
    /// only looks at the first five in sorted order.
    #[default]
    Fixed,
    /// Every subject takes batch 1 once, paired with the next subject in
    /// sorted order (wrapping), so it also takes batch 2 once.
    Cyclic,
}

impl RotationStrategy {
    pub fn min_subjects(self) -> usize {
        match self {
            RotationStrategy::Fixed => FIXED_ROTATION.len(),
            RotationStrategy::Cyclic => 2,
        }
    }
}

impl FromStr for RotationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(RotationStrategy::Fixed),
            "cyclic" => Ok(RotationStrategy::Cyclic),
            other => Err(format!("unknown lab rotation '{}'", other)),
        }
    }
}

/// Two lab subjects run in the same block: `batch_one` for B-1 and
/// `batch_two` for B-2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabPairing {
    pub batch_one: String,
    pub batch_two: String,
    pub faculty_one: String,
    pub faculty_two: String,
}

impl LabPairing {
    pub fn subjects(&self) -> Vec<String> {
        vec![self.batch_one.clone(), self.batch_two.clone()]
    }
}

/// Lab subject -> faculty, sorted by subject. A later row for the same
/// subject replaces the earlier one.
fn lab_faculty<'a>(assignments: &[&'a TeachingAssignment]) -> BTreeMap<&'a str, &'a str> {
    assignments
        .iter()
        .filter(|a| a.session_type == SessionType::Lab)
        .map(|a| (a.subject.as_str(), a.faculty.as_str()))
        .collect()
}

/// Builds the ordered pairing sequence for one section.
///
/// A section with no lab rows resolves to nothing. Having some labs but
/// fewer than the strategy needs is reported as
/// [`UnplacedReason::InsufficientLabSubjects`] and nothing is paired.
pub fn resolve_pairings(
    assignments: &[&TeachingAssignment],
    strategy: RotationStrategy,
) -> Result<Vec<LabPairing>, UnplacedReason> {
    let labs = lab_faculty(assignments);
    if labs.is_empty() {
        return Ok(Vec::new());
    }
    let required = strategy.min_subjects();
    if labs.len() < required {
        return Err(UnplacedReason::InsufficientLabSubjects {
            found: labs.len(),
            required,
        });
    }

    let names: Vec<(&str, &str)> = labs.into_iter().collect();
    let pair = |(a, b): (&(&str, &str), &(&str, &str))| LabPairing {
        batch_one: a.0.to_string(),
        batch_two: b.0.to_string(),
        faculty_one: a.1.to_string(),
        faculty_two: b.1.to_string(),
    };

    let pairings: Vec<LabPairing> = match strategy {
        RotationStrategy::Fixed => FIXED_ROTATION
            .iter()
            .map(|&(i, j)| pair((&names[i], &names[j])))
            .collect(),
        RotationStrategy::Cyclic => names.iter().circular_tuple_windows().map(pair).collect(),
    };
    debug!(
        "{:?} rotation: {}",
        strategy,
        pairings
            .iter()
            .map(|p| format!("{}/{}", p.batch_one, p.batch_two))
            .join(", ")
    );
    Ok(pairings)
}

/// Sorted distinct lab subject names of a section.
pub fn lab_subjects(assignments: &[&TeachingAssignment]) -> Vec<String> {
    lab_faculty(assignments)
        .into_keys()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Batch;

    fn lab(faculty: &str, subject: &str) -> TeachingAssignment {
        TeachingAssignment {
            faculty: faculty.into(),
            subject: subject.into(),
            section: "A".into(),
            semester: "3".into(),
            session_type: SessionType::Lab,
            batch: Batch::One,
        }
    }

    fn order(pairings: &[LabPairing]) -> Vec<(&str, &str)> {
        pairings
            .iter()
            .map(|p| (p.batch_one.as_str(), p.batch_two.as_str()))
            .collect()
    }

    fn five_labs() -> Vec<TeachingAssignment> {
        vec![
            lab("Kumar", "JAVA"),
            lab("Rao", "OS"),
            lab("Iyer", "DSA"),
            lab("Das", "EXCEL"),
            lab("Nair", "DDCO"),
        ]
    }

    #[test]
    fn fixed_rotation_follows_sorted_positions() {
        let rows = five_labs();
        let refs: Vec<_> = rows.iter().collect();
        let pairings = resolve_pairings(&refs, RotationStrategy::Fixed).unwrap();
        assert_eq!(
            order(&pairings),
            vec![
                ("DDCO", "DSA"),
                ("DSA", "DDCO"),
                ("EXCEL", "JAVA"),
                ("OS", "EXCEL"),
                ("JAVA", "OS"),
            ]
        );
        assert_eq!(pairings[0].faculty_one, "Nair");
        assert_eq!(pairings[0].faculty_two, "Iyer");
    }

    #[test]
    fn fixed_rotation_needs_five_subjects() {
        let rows: Vec<_> = five_labs().into_iter().take(4).collect();
        let refs: Vec<_> = rows.iter().collect();
        assert_eq!(
            resolve_pairings(&refs, RotationStrategy::Fixed),
            Err(UnplacedReason::InsufficientLabSubjects {
                found: 4,
                required: 5
            })
        );
    }

    #[test]
    fn fixed_rotation_ignores_subjects_past_the_fifth() {
        let mut rows = five_labs();
        rows.push(lab("Sen", "PYTHON"));
        let refs: Vec<_> = rows.iter().collect();
        let pairings = resolve_pairings(&refs, RotationStrategy::Fixed).unwrap();
        assert_eq!(pairings.len(), 5);
        assert!(pairings.iter().all(|p| p.batch_one != "PYTHON" && p.batch_two != "PYTHON"));
    }

    #[test]
    fn no_labs_is_not_a_shortfall() {
        let resolved = resolve_pairings(&[], RotationStrategy::Fixed).unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn duplicate_subject_rows_keep_the_last_faculty() {
        let mut rows = five_labs();
        rows.push(lab("Menon", "JAVA"));
        let refs: Vec<_> = rows.iter().collect();
        let pairings = resolve_pairings(&refs, RotationStrategy::Fixed).unwrap();
        let java = pairings.iter().find(|p| p.batch_one == "JAVA").unwrap();
        assert_eq!(java.faculty_one, "Menon");
        assert_eq!(lab_subjects(&refs), vec!["DDCO", "DSA", "EXCEL", "JAVA", "OS"]);
    }

    #[test]
    fn cyclic_rotation_covers_both_roles() {
        let rows = vec![lab("Rao", "C"), lab("Das", "A"), lab("Iyer", "B")];
        let refs: Vec<_> = rows.iter().collect();
        let pairings = resolve_pairings(&refs, RotationStrategy::Cyclic).unwrap();
        assert_eq!(order(&pairings), vec![("A", "B"), ("B", "C"), ("C", "A")]);
    }

    #[test]
    fn cyclic_rotation_with_one_subject_is_a_shortfall() {
        let rows = vec![lab("Rao", "A")];
        let refs: Vec<_> = rows.iter().collect();
        assert!(resolve_pairings(&refs, RotationStrategy::Cyclic).is_err());
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Cyclic".parse::<RotationStrategy>(), Ok(RotationStrategy::Cyclic));
        assert_eq!(" fixed ".parse::<RotationStrategy>(), Ok(RotationStrategy::Fixed));
        assert!("round-robin".parse::<RotationStrategy>().is_err());
    }
}
