//! Classification decision logic.

use serde::{Deserialize, Serialize};

use crate::normalization::status::NormalizedStatus;

/// Classification of a whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordClass {
    Violating,
    Compliant,
    Indeterminate,
}

impl RecordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordClass::Violating => "violating",
            RecordClass::Compliant => "compliant",
            RecordClass::Indeterminate => "indeterminate",
        }
    }
}

/// Classify a record from its two normalized statuses.
///
/// # Decision Tree
/// 1. If either field is Violation -> Violating
/// 2. If both fields are Compliant -> Compliant
/// 3. Otherwise (an Unknown, no Violation) -> Indeterminate
///
/// Indeterminate records count toward neither full PPE nor violations.
pub fn classify(helmet: NormalizedStatus, glove: NormalizedStatus) -> RecordClass {
    use NormalizedStatus::*;

    match (helmet, glove) {
        (Violation, _) | (_, Violation) => RecordClass::Violating,
        (Compliant, Compliant) => RecordClass::Compliant,
        _ => RecordClass::Indeterminate,
    }
}
