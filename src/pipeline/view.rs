//! View snapshot handed to the presentation layer.
//!
//! A view is fully replaced on every load or filter change; nothing in it
//! is updated incrementally.

use chrono::{DateTime, Local};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::aggregation::summary::ComplianceSummary;
use crate::classification::decision::RecordClass;
use crate::filtering::date_range::DateRange;
use crate::normalization::record::NormalizedRecord;
use crate::normalization::status::{EquipmentKind, NormalizedStatus};

use super::context::DataOrigin;
use super::payload::ReportedStats;

pub const NOT_AVAILABLE: &str = "N/A";
pub const PLACEHOLDER_IMAGE: &str =
    "https://via.placeholder.com/160x100/2c3e50/ffffff?text=No+Image";

lazy_static! {
    /// Drive share links: https://drive.google.com/file/d/<id>/view?usp=sharing
    static ref DRIVE_FILE_LINK: Regex =
        Regex::new(r"^https?://drive\.google\.com/file/d/([A-Za-z0-9_-]+)").unwrap();
}

/// Rewrite an image reference into something an `<img>` can load directly.
///
/// Drive share links become `uc?id=...&export=view`; other Drive links get
/// `export=view` appended; everything else passes through.
pub fn direct_image_url(raw: &str) -> String {
    if let Some(caps) = DRIVE_FILE_LINK.captures(raw) {
        return format!("https://drive.google.com/uc?id={}&export=view", &caps[1]);
    }

    if raw.contains("drive.google.com") && !raw.contains("export=view") {
        let sep = if raw.contains('?') { '&' } else { '?' };
        return format!("{}{}export=view", raw, sep);
    }

    raw.to_string()
}

/// Display label for a normalized field.
pub fn status_label(kind: EquipmentKind, status: NormalizedStatus) -> &'static str {
    match (kind, status) {
        (EquipmentKind::Helmet, NormalizedStatus::Compliant) => "HELMET OK",
        (EquipmentKind::Helmet, NormalizedStatus::Violation) => "NO HELMET",
        (EquipmentKind::Helmet, NormalizedStatus::Unknown) => "HELMET ?",
        (EquipmentKind::Glove, NormalizedStatus::Compliant) => "GLOVE OK",
        (EquipmentKind::Glove, NormalizedStatus::Violation) => "NO GLOVE",
        (EquipmentKind::Glove, NormalizedStatus::Unknown) => "GLOVE ?",
    }
}

/// One equipment cell of a table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCell {
    pub status: NormalizedStatus,
    pub label: &'static str,
    /// The raw text as reported, or N/A.
    pub detail: String,
}

impl StatusCell {
    fn new(kind: EquipmentKind, status: NormalizedStatus, raw: Option<&str>) -> Self {
        Self {
            status,
            label: status_label(kind, status),
            detail: raw.unwrap_or(NOT_AVAILABLE).to_string(),
        }
    }
}

/// One display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub row_number: usize,
    pub row_key: String,
    pub datetime: String,
    pub id: String,
    pub image_url: String,
    pub image_alt: &'static str,
    pub helmet: StatusCell,
    pub glove: StatusCell,
    pub class: RecordClass,
}

impl TableRow {
    pub fn from_record(row_number: usize, record: &NormalizedRecord) -> Self {
        let raw = &record.raw;
        let (image_url, image_alt) = match raw.image_url.as_deref() {
            Some(url) => (direct_image_url(url), "PPE Snapshot"),
            None => (PLACEHOLDER_IMAGE.to_string(), "No Image Available"),
        };

        Self {
            row_number,
            row_key: record.row_key.clone(),
            datetime: raw
                .datetime
                .clone()
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            id: raw.id.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            image_url,
            image_alt,
            helmet: StatusCell::new(
                EquipmentKind::Helmet,
                record.helmet,
                raw.helmet_status.as_deref(),
            ),
            glove: StatusCell::new(
                EquipmentKind::Glove,
                record.glove,
                raw.glove_status.as_deref(),
            ),
            class: record.class,
        }
    }
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub load_id: String,
    pub origin: DataOrigin,
    pub range: DateRange,
    pub loaded_at: DateTime<Local>,
    pub summary: ComplianceSummary,
    /// Newest first.
    pub rows: Vec<TableRow>,
    /// Records in the snapshot before filtering.
    pub total_count: usize,
    pub reported: Option<ReportedStats>,
}

impl DashboardView {
    pub fn filtered_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// "shown / loaded"
    pub fn records_counter(&self) -> String {
        format!("{} / {}", self.filtered_count(), self.total_count)
    }

    /// Full-PPE share of the shown records, e.g. "33.3%", or N/A when empty.
    pub fn compliance_text(&self) -> String {
        match self.summary.compliance_rate() {
            Some(rate) => format!("{:.1}%", rate * 100.0),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn last_update_text(&self) -> String {
        format!("Last updated: {}", self.loaded_at.format("%H:%M:%S"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::structured::LogContext;
    use crate::normalization::record::{normalize_record, DetectionRecord};

    #[test]
    fn test_drive_share_link_rewritten() {
        assert_eq!(
            direct_image_url("https://drive.google.com/file/d/1kaqbrGBlIDoGqj/view?usp=sharing"),
            "https://drive.google.com/uc?id=1kaqbrGBlIDoGqj&export=view"
        );
    }

    #[test]
    fn test_drive_export_appended() {
        assert_eq!(
            direct_image_url("https://drive.google.com/uc?id=abc"),
            "https://drive.google.com/uc?id=abc&export=view"
        );
        assert_eq!(
            direct_image_url("https://drive.google.com/thumbnail"),
            "https://drive.google.com/thumbnail?export=view"
        );
        assert_eq!(
            direct_image_url("https://drive.google.com/uc?id=abc&export=view"),
            "https://drive.google.com/uc?id=abc&export=view"
        );
    }

    #[test]
    fn test_other_urls_untouched() {
        assert_eq!(
            direct_image_url("https://cdn.example.com/snap.jpg"),
            "https://cdn.example.com/snap.jpg"
        );
    }

    #[test]
    fn test_row_defaults() {
        let ctx = LogContext::new("test-load");
        let record = normalize_record(
            DetectionRecord {
                helmet_status: Some("no_helmet".to_string()),
                ..Default::default()
            },
            &ctx,
        );

        let row = TableRow::from_record(1, &record);
        assert_eq!(row.datetime, NOT_AVAILABLE);
        assert_eq!(row.id, NOT_AVAILABLE);
        assert_eq!(row.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(row.image_alt, "No Image Available");
        assert_eq!(row.helmet.label, "NO HELMET");
        assert_eq!(row.helmet.detail, "no_helmet");
        assert_eq!(row.glove.label, "GLOVE ?");
        assert_eq!(row.glove.detail, NOT_AVAILABLE);
        assert_eq!(row.class, RecordClass::Violating);
    }

    #[test]
    fn test_row_prefers_display_datetime() {
        let ctx = LogContext::new("test-load");
        let record = normalize_record(
            DetectionRecord {
                id: Some("7".to_string()),
                datetime: Some("Nov 4, 2025, 09:55:42 AM".to_string()),
                timestamp: Some("2025-11-04T09:55:42".to_string()),
                image_url: Some("https://cdn.example.com/a.jpg".to_string()),
                ..Default::default()
            },
            &ctx,
        );

        let row = TableRow::from_record(3, &record);
        assert_eq!(row.row_number, 3);
        assert_eq!(row.id, "7");
        assert_eq!(row.datetime, "Nov 4, 2025, 09:55:42 AM");
        assert_eq!(row.image_alt, "PPE Snapshot");
    }

    #[test]
    fn test_row_datetime_never_shows_machine_timestamp() {
        let ctx = LogContext::new("test-load");
        let record = normalize_record(
            DetectionRecord {
                id: Some("8".to_string()),
                timestamp: Some("2025-11-04T09:55:42".to_string()),
                helmet_status: Some("helmet".to_string()),
                glove_status: Some("mittens".to_string()),
                ..Default::default()
            },
            &ctx,
        );

        let row = TableRow::from_record(1, &record);
        assert_eq!(row.datetime, NOT_AVAILABLE);
        assert!(record.recorded_at.is_some());
        assert_eq!(row.helmet.label, "HELMET OK");
        assert_eq!(row.glove.label, "GLOVE ?");
        assert_eq!(row.glove.detail, "mittens");
    }

    #[test]
    fn test_view_counters() {
        let ctx = LogContext::new("test-load");
        let statuses = [("helmet", "glove"), ("nh", "glove"), ("helmet", "ng")];
        let records: Vec<NormalizedRecord> = statuses
            .iter()
            .map(|(helmet, glove)| {
                normalize_record(
                    DetectionRecord {
                        helmet_status: Some(helmet.to_string()),
                        glove_status: Some(glove.to_string()),
                        ..Default::default()
                    },
                    &ctx,
                )
            })
            .collect();

        let mut view = DashboardView {
            load_id: "test-load".to_string(),
            origin: DataOrigin::Live,
            range: DateRange::All,
            loaded_at: Local::now(),
            summary: crate::aggregation::summary::aggregate(&records),
            rows: records
                .iter()
                .enumerate()
                .map(|(i, r)| TableRow::from_record(i + 1, r))
                .collect(),
            total_count: 5,
            reported: None,
        };
        assert_eq!(view.records_counter(), "3 / 5");
        assert_eq!(view.compliance_text(), "33.3%");

        view.rows.clear();
        view.summary = ComplianceSummary::default();
        assert!(view.is_empty());
        assert_eq!(view.compliance_text(), NOT_AVAILABLE);
    }

    #[test]
    fn test_status_labels() {
        use EquipmentKind::*;
        use NormalizedStatus::*;
        assert_eq!(status_label(Helmet, Compliant), "HELMET OK");
        assert_eq!(status_label(Helmet, Violation), "NO HELMET");
        assert_eq!(status_label(Helmet, Unknown), "HELMET ?");
        assert_eq!(status_label(Glove, Compliant), "GLOVE OK");
        assert_eq!(status_label(Glove, Violation), "NO GLOVE");
        assert_eq!(status_label(Glove, Unknown), "GLOVE ?");
    }
}
