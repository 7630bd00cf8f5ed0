//! Detection records, raw and normalized.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::classification::decision::{classify, RecordClass};
use crate::filtering::timestamp::parse_timestamp;
use crate::logging::structured::LogContext;

use super::fields::{
    field_text, DATETIME_FIELDS, GLOVE_FIELDS, HELMET_FIELDS, ID_FIELDS, IMAGE_FIELDS,
    TIMESTAMP_FIELDS,
};
use super::status::{normalize_status, EquipmentKind, NormalizedStatus};

/// A detection record exactly as the source reported it.
///
/// Field-name variants have been resolved, but no value has been
/// interpreted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    pub id: Option<String>,
    /// Human display string. Never parsed.
    pub datetime: Option<String>,
    /// Machine-parseable instant.
    pub timestamp: Option<String>,
    pub helmet_status: Option<String>,
    pub glove_status: Option<String>,
    pub image_url: Option<String>,
}

impl DetectionRecord {
    /// Build a record from one JSON entry. Returns None for non-objects.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        Some(Self {
            id: field_text(value, ID_FIELDS),
            datetime: field_text(value, DATETIME_FIELDS),
            timestamp: field_text(value, TIMESTAMP_FIELDS),
            helmet_status: field_text(value, HELMET_FIELDS),
            glove_status: field_text(value, GLOVE_FIELDS),
            image_url: field_text(value, IMAGE_FIELDS),
        })
    }

    /// Stable key for this record: its id, or a content fingerprint.
    pub fn row_key(&self) -> String {
        if let Some(id) = &self.id {
            return id.clone();
        }

        let mut hasher = Sha256::new();
        for part in [
            &self.timestamp,
            &self.datetime,
            &self.helmet_status,
            &self.glove_status,
            &self.image_url,
        ] {
            hasher.update(part.as_deref().unwrap_or("").as_bytes());
            hasher.update([0x1f_u8]);
        }
        format!("fp-{}", &hex::encode(hasher.finalize())[..12])
    }
}

/// A record after status normalization, classification and timestamp parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub row_key: String,
    pub raw: DetectionRecord,
    pub helmet: NormalizedStatus,
    pub glove: NormalizedStatus,
    pub recorded_at: Option<NaiveDateTime>,
    pub class: RecordClass,
}

impl NormalizedRecord {
    pub fn status(&self, kind: EquipmentKind) -> NormalizedStatus {
        match kind {
            EquipmentKind::Helmet => self.helmet,
            EquipmentKind::Glove => self.glove,
        }
    }
}

/// Normalize one raw record.
///
/// Malformed fields never fail the record: unrecognized statuses become
/// `Unknown` and an unparseable timestamp leaves `recorded_at` empty.
pub fn normalize_record(raw: DetectionRecord, ctx: &LogContext) -> NormalizedRecord {
    let row_key = raw.row_key();
    let log_ctx = ctx.with_record(&row_key);

    let helmet = normalize_status(raw.helmet_status.as_deref(), EquipmentKind::Helmet);
    let glove = normalize_status(raw.glove_status.as_deref(), EquipmentKind::Glove);

    for (kind, status, text) in [
        (EquipmentKind::Helmet, helmet, &raw.helmet_status),
        (EquipmentKind::Glove, glove, &raw.glove_status),
    ] {
        if status == NormalizedStatus::Unknown {
            log::debug!(
                "{} STATUS_UNKNOWN field={} raw={:?}",
                log_ctx,
                kind.as_str(),
                text
            );
        }
    }

    let recorded_at = match raw.timestamp.as_deref() {
        Some(ts) => {
            let parsed = parse_timestamp(ts);
            if parsed.is_none() {
                log::warn!("{} TIMESTAMP_INVALID raw={:?}", log_ctx, ts);
            }
            parsed
        }
        None => {
            log::debug!("{} TIMESTAMP_MISSING", log_ctx);
            None
        }
    };

    let class = classify(helmet, glove);

    log::debug!(
        "{} RECORD_NORMALIZED helmet={} glove={} class={}",
        log_ctx,
        helmet.as_str(),
        glove.as_str(),
        class.as_str()
    );

    NormalizedRecord {
        row_key,
        raw,
        helmet,
        glove,
        recorded_at,
        class,
    }
}
