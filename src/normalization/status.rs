//! Equipment status normalization.
//!
//! Maps free-text statuses such as "no helmet", "NO_HELMET" or "nh" onto a
//! closed set of classifications using one declarative synonym table.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Monitored piece of protective equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    Helmet,
    Glove,
}

impl EquipmentKind {
    pub const ALL: [EquipmentKind; 2] = [EquipmentKind::Helmet, EquipmentKind::Glove];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentKind::Helmet => "helmet",
            EquipmentKind::Glove => "glove",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "helmet" => Some(EquipmentKind::Helmet),
            "glove" | "gloves" => Some(EquipmentKind::Glove),
            _ => None,
        }
    }
}

/// Normalized classification of one equipment field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizedStatus {
    Compliant,
    Violation,
    Unknown,
}

impl NormalizedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizedStatus::Compliant => "compliant",
            NormalizedStatus::Violation => "violation",
            NormalizedStatus::Unknown => "unknown",
        }
    }
}

/// Helmet statuses meaning the helmet was worn.
pub const HELMET_COMPLIANT: &[&str] = &[
    "helmet",
    "helm",
    "h",
    "helmet ok",
    "with helmet",
    "wearing helmet",
    "hardhat",
    "hard hat",
];

/// Helmet statuses meaning the helmet was absent.
pub const HELMET_VIOLATION: &[&str] = &[
    "no helmet",
    "nohelmet",
    "nh",
    "without helmet",
    "helmet missing",
    "no hardhat",
];

/// Glove statuses meaning gloves were worn.
pub const GLOVE_COMPLIANT: &[&str] = &[
    "glove",
    "gloves",
    "g",
    "glove ok",
    "with glove",
    "with gloves",
    "wearing gloves",
];

/// Glove statuses meaning gloves were absent.
pub const GLOVE_VIOLATION: &[&str] = &[
    "no glove",
    "no gloves",
    "noglove",
    "ng",
    "without glove",
    "without gloves",
    "glove missing",
];

lazy_static! {
    /// Runs of whitespace, underscores and hyphens collapse to one space.
    static ref SEPARATOR_RUNS: Regex = Regex::new(r"[\s_\-]+").unwrap();

    /// (kind, folded synonym) -> status
    static ref SYNONYM_TABLE: HashMap<(EquipmentKind, String), NormalizedStatus> =
        build_synonym_table();
}

fn build_synonym_table() -> HashMap<(EquipmentKind, String), NormalizedStatus> {
    let entries: [(EquipmentKind, NormalizedStatus, &[&str]); 4] = [
        (EquipmentKind::Helmet, NormalizedStatus::Compliant, HELMET_COMPLIANT),
        (EquipmentKind::Helmet, NormalizedStatus::Violation, HELMET_VIOLATION),
        (EquipmentKind::Glove, NormalizedStatus::Compliant, GLOVE_COMPLIANT),
        (EquipmentKind::Glove, NormalizedStatus::Violation, GLOVE_VIOLATION),
    ];

    let mut table = HashMap::new();
    for (kind, status, synonyms) in entries {
        for synonym in synonyms {
            table.insert((kind, fold_status_text(synonym)), status);
        }
    }
    table
}

/// Registered synonyms for a kind/status pair.
pub fn synonyms(kind: EquipmentKind, status: NormalizedStatus) -> &'static [&'static str] {
    match (kind, status) {
        (EquipmentKind::Helmet, NormalizedStatus::Compliant) => HELMET_COMPLIANT,
        (EquipmentKind::Helmet, NormalizedStatus::Violation) => HELMET_VIOLATION,
        (EquipmentKind::Glove, NormalizedStatus::Compliant) => GLOVE_COMPLIANT,
        (EquipmentKind::Glove, NormalizedStatus::Violation) => GLOVE_VIOLATION,
        (_, NormalizedStatus::Unknown) => &[],
    }
}

/// Fold raw status text into its lookup key.
///
/// Trims, lowercases and collapses separator runs, so `" NO_HELMET "`,
/// `"no-helmet"` and `"no  helmet"` all become `"no helmet"`.
pub fn fold_status_text(raw: &str) -> String {
    SEPARATOR_RUNS
        .replace_all(raw.trim(), " ")
        .trim()
        .to_lowercase()
}

/// Normalize a raw status string for the given equipment kind.
///
/// Absent or blank input is `Unknown`, never `Compliant`.
///
/// # Examples
/// ```
/// use ppe_compliance_core::normalization::{normalize_status, EquipmentKind, NormalizedStatus};
/// assert_eq!(normalize_status(Some("NO_HELMET"), EquipmentKind::Helmet), NormalizedStatus::Violation);
/// assert_eq!(normalize_status(Some("HELM"), EquipmentKind::Helmet), NormalizedStatus::Compliant);
/// assert_eq!(normalize_status(None, EquipmentKind::Glove), NormalizedStatus::Unknown);
/// ```
pub fn normalize_status(raw: Option<&str>, kind: EquipmentKind) -> NormalizedStatus {
    let key = match raw {
        Some(text) => fold_status_text(text),
        None => return NormalizedStatus::Unknown,
    };
    if key.is_empty() {
        return NormalizedStatus::Unknown;
    }

    SYNONYM_TABLE
        .get(&(kind, key))
        .copied()
        .unwrap_or(NormalizedStatus::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_synonym_maps_to_its_status() {
        for kind in EquipmentKind::ALL {
            for status in [NormalizedStatus::Compliant, NormalizedStatus::Violation] {
                for synonym in synonyms(kind, status) {
                    assert_eq!(
                        normalize_status(Some(*synonym), kind),
                        status,
                        "{} synonym {:?}",
                        kind.as_str(),
                        synonym
                    );
                }
            }
        }
    }

    #[test]
    fn test_case_and_whitespace_folding() {
        assert_eq!(
            normalize_status(Some("  No Helmet  "), EquipmentKind::Helmet),
            NormalizedStatus::Violation
        );
        assert_eq!(
            normalize_status(Some("NO_HELMET"), EquipmentKind::Helmet),
            NormalizedStatus::Violation
        );
        assert_eq!(
            normalize_status(Some("no-glove"), EquipmentKind::Glove),
            NormalizedStatus::Violation
        );
        assert_eq!(
            normalize_status(Some("GLOVE"), EquipmentKind::Glove),
            NormalizedStatus::Compliant
        );
    }

    #[test]
    fn test_nh_is_helmet_only() {
        assert_eq!(
            normalize_status(Some("NH"), EquipmentKind::Helmet),
            NormalizedStatus::Violation
        );
        assert_eq!(
            normalize_status(Some("NH"), EquipmentKind::Glove),
            NormalizedStatus::Unknown
        );
    }

    #[test]
    fn test_empty_and_absent_are_unknown() {
        assert_eq!(normalize_status(None, EquipmentKind::Helmet), NormalizedStatus::Unknown);
        assert_eq!(normalize_status(Some(""), EquipmentKind::Helmet), NormalizedStatus::Unknown);
        assert_eq!(normalize_status(Some("   "), EquipmentKind::Glove), NormalizedStatus::Unknown);
        assert_eq!(normalize_status(Some("__"), EquipmentKind::Glove), NormalizedStatus::Unknown);
    }

    #[test]
    fn test_unmatched_is_unknown() {
        assert_eq!(
            normalize_status(Some("helmet?"), EquipmentKind::Helmet),
            NormalizedStatus::Unknown
        );
        assert_eq!(
            normalize_status(Some("glove"), EquipmentKind::Helmet),
            NormalizedStatus::Unknown
        );
        assert_eq!(
            normalize_status(Some("person"), EquipmentKind::Glove),
            NormalizedStatus::Unknown
        );
    }

    #[test]
    fn test_equipment_kind_parse() {
        assert_eq!(EquipmentKind::parse("Helmet"), Some(EquipmentKind::Helmet));
        assert_eq!(EquipmentKind::parse("gloves"), Some(EquipmentKind::Glove));
        assert_eq!(EquipmentKind::parse("boots"), None);
    }
}
