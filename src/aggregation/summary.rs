//! Compliance summary counters.

use serde::{Deserialize, Serialize};

use crate::classification::decision::RecordClass;
use crate::normalization::record::NormalizedRecord;
use crate::normalization::status::NormalizedStatus;

/// Summary counts derived from a record set. Never stored; recomputed on
/// every load and every filter change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceSummary {
    pub helmet_violations: usize,
    pub glove_violations: usize,
    #[serde(rename = "helmetOK")]
    pub helmet_ok: usize,
    #[serde(rename = "gloveOK")]
    pub glove_ok: usize,
    #[serde(rename = "fullPPE")]
    pub full_ppe: usize,
    /// Records classified Violating (not the sum of field violations).
    pub total_violations: usize,
    pub total_records: usize,
    pub helmet_unknown: usize,
    pub glove_unknown: usize,
    /// Records with an unknown field and no violation.
    pub indeterminate: usize,
}

impl ComplianceSummary {
    /// Fold one record into the counters.
    pub fn add(&mut self, record: &NormalizedRecord) {
        self.total_records += 1;

        match record.helmet {
            NormalizedStatus::Compliant => self.helmet_ok += 1,
            NormalizedStatus::Violation => self.helmet_violations += 1,
            NormalizedStatus::Unknown => self.helmet_unknown += 1,
        }

        match record.glove {
            NormalizedStatus::Compliant => self.glove_ok += 1,
            NormalizedStatus::Violation => self.glove_violations += 1,
            NormalizedStatus::Unknown => self.glove_unknown += 1,
        }

        match record.class {
            RecordClass::Violating => self.total_violations += 1,
            RecordClass::Compliant => self.full_ppe += 1,
            RecordClass::Indeterminate => self.indeterminate += 1,
        }
    }

    /// Share of records in full PPE, or None for an empty set.
    pub fn compliance_rate(&self) -> Option<f64> {
        if self.total_records == 0 {
            None
        } else {
            Some(self.full_ppe as f64 / self.total_records as f64)
        }
    }
}

/// Aggregate records into a [`ComplianceSummary`] in a single pass.
///
/// The result does not depend on record order.
pub fn aggregate<'a, I>(records: I) -> ComplianceSummary
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    records
        .into_iter()
        .fold(ComplianceSummary::default(), |mut summary, record| {
            summary.add(record);
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::structured::LogContext;
    use crate::normalization::record::{normalize_record, DetectionRecord};
    use proptest::prelude::*;

    fn record(helmet: Option<&str>, glove: Option<&str>) -> NormalizedRecord {
        let ctx = LogContext::new("test-load");
        normalize_record(
            DetectionRecord {
                helmet_status: helmet.map(|s| s.to_string()),
                glove_status: glove.map(|s| s.to_string()),
                ..Default::default()
            },
            &ctx,
        )
    }

    #[test]
    fn test_reference_example() {
        let records = vec![
            record(Some("helmet"), Some("no_glove")),
            record(Some("no helmet"), Some("glove")),
            record(Some("HELM"), Some("GLOVE")),
        ];

        let summary = aggregate(&records);
        assert_eq!(summary.helmet_violations, 1);
        assert_eq!(summary.glove_violations, 1);
        assert_eq!(summary.full_ppe, 1);
        assert_eq!(summary.helmet_ok, 2);
        assert_eq!(summary.glove_ok, 2);
        assert_eq!(summary.total_violations, 2);
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.indeterminate, 0);
        assert_eq!(summary.compliance_rate(), Some(1.0 / 3.0));
    }

    #[test]
    fn test_unknown_counts_toward_nothing() {
        let records = vec![
            record(Some("helmet"), Some("mittens")),
            record(None, Some("glove")),
        ];

        let summary = aggregate(&records);
        assert_eq!(summary.full_ppe, 0);
        assert_eq!(summary.total_violations, 0);
        assert_eq!(summary.indeterminate, 2);
        assert_eq!(summary.helmet_ok, 1);
        assert_eq!(summary.helmet_unknown, 1);
        assert_eq!(summary.glove_ok, 1);
        assert_eq!(summary.glove_unknown, 1);
        // Indeterminate records stay in the denominator.
        assert_eq!(summary.compliance_rate(), Some(0.0));
    }

    #[test]
    fn test_unknown_with_violation_is_violation() {
        let summary = aggregate(&[record(Some("??"), Some("no gloves"))]);
        assert_eq!(summary.total_violations, 1);
        assert_eq!(summary.glove_violations, 1);
        assert_eq!(summary.helmet_unknown, 1);
    }

    #[test]
    fn test_empty() {
        let summary = aggregate(&[]);
        assert_eq!(summary, ComplianceSummary::default());
        assert_eq!(summary.compliance_rate(), None);
    }

    #[test]
    fn test_serialized_keys() {
        let summary = aggregate(&[record(Some("helmet"), Some("glove"))]);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["helmetOK"], 1);
        assert_eq!(json["gloveOK"], 1);
        assert_eq!(json["fullPPE"], 1);
        assert_eq!(json["helmetViolations"], 0);
        assert_eq!(json["totalViolations"], 0);
        assert_eq!(json["totalRecords"], 1);
    }

    fn status_text() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("helmet".to_string())),
            Just(Some("no helmet".to_string())),
            Just(Some("glove".to_string())),
            Just(Some("no_glove".to_string())),
            Just(Some("NH".to_string())),
            "[a-z ]{0,8}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_summary_bounds(
            pairs in proptest::collection::vec((status_text(), status_text()), 0..50)
        ) {
            let records: Vec<NormalizedRecord> = pairs
                .iter()
                .map(|(h, g)| record(h.as_deref(), g.as_deref()))
                .collect();
            let s = aggregate(&records);

            prop_assert!(s.helmet_ok + s.helmet_violations <= s.total_records);
            prop_assert_eq!(
                s.helmet_ok + s.helmet_violations == s.total_records,
                s.helmet_unknown == 0
            );
            prop_assert!(s.glove_ok + s.glove_violations <= s.total_records);
            prop_assert!(s.full_ppe <= s.helmet_ok.min(s.glove_ok));
            prop_assert_eq!(s.full_ppe + s.total_violations + s.indeterminate, s.total_records);
        }

        #[test]
        fn prop_order_independent(
            pairs in proptest::collection::vec((status_text(), status_text()), 0..30)
        ) {
            let mut records: Vec<NormalizedRecord> = pairs
                .iter()
                .map(|(h, g)| record(h.as_deref(), g.as_deref()))
                .collect();
            let forward = aggregate(&records);
            records.reverse();
            prop_assert_eq!(forward, aggregate(&records));
        }
    }
}
