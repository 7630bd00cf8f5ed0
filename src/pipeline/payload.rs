//! Response payload parsing.
//!
//! The records endpoint answers either with a bare JSON array of records or
//! with an object wrapping them:
//!
//! ```json
//! {"success": true, "data": [...], "stats": {"helmetViolations": 3}}
//! {"records": [...], "summary": {...}}
//! {"rows": [...]}
//! ```
//!
//! `{"success": false, "error": "..."}` is a load failure.

use serde::Serialize;
use serde_json::Value;

use crate::aggregation::summary::ComplianceSummary;
use crate::error::{PpeError, Result};
use crate::logging::structured::LogContext;
use crate::normalization::fields::{first_field, value_to_string};
use crate::normalization::record::DetectionRecord;

const RECORD_KEYS: &[&str] = &["records", "rows", "data"];
const STATS_KEYS: &[&str] = &["summary", "stats"];

/// Parsed response of the records endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiPayload {
    pub records: Vec<DetectionRecord>,
    pub reported: Option<ReportedStats>,
    /// Entries dropped because they were not JSON objects.
    pub skipped: usize,
}

/// Statistics the server computed itself. Advisory only: the view always
/// shows counts recomputed from the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedStats {
    pub helmet_violations: Option<u64>,
    pub glove_violations: Option<u64>,
    #[serde(rename = "helmetOK")]
    pub helmet_ok: Option<u64>,
    #[serde(rename = "gloveOK")]
    pub glove_ok: Option<u64>,
    #[serde(rename = "fullPPE")]
    pub full_ppe: Option<u64>,
    pub total_records: Option<u64>,
}

impl ReportedStats {
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }

        Some(Self {
            helmet_violations: count_field(value, &["helmetViolations", "helmet_violations"]),
            glove_violations: count_field(value, &["gloveViolations", "glove_violations"]),
            helmet_ok: count_field(value, &["helmetOK", "helmetOk", "helmet_ok"]),
            glove_ok: count_field(value, &["gloveOK", "gloveOk", "glove_ok"]),
            full_ppe: count_field(value, &["fullPPE", "fullPpe", "full_ppe"]),
            total_records: count_field(value, &["totalRecords", "total_records", "total"]),
        })
    }

    /// Fields where the server disagrees with the recomputed summary, as
    /// (field, reported, computed).
    pub fn mismatches(&self, computed: &ComplianceSummary) -> Vec<(&'static str, u64, u64)> {
        [
            ("helmetViolations", self.helmet_violations, computed.helmet_violations),
            ("gloveViolations", self.glove_violations, computed.glove_violations),
            ("helmetOK", self.helmet_ok, computed.helmet_ok),
            ("gloveOK", self.glove_ok, computed.glove_ok),
            ("fullPPE", self.full_ppe, computed.full_ppe),
            ("totalRecords", self.total_records, computed.total_records),
        ]
        .into_iter()
        .filter_map(|(field, reported, computed)| {
            let computed = computed as u64;
            match reported {
                Some(reported) if reported != computed => Some((field, reported, computed)),
                _ => None,
            }
        })
        .collect()
    }
}

fn count_field(value: &Value, aliases: &[&str]) -> Option<u64> {
    first_field(value, aliases).and_then(value_to_count)
}

/// Counts may arrive as numbers or numeric strings (spreadsheet cells).
fn value_to_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse a response body.
pub fn parse_payload(body: &str, ctx: &LogContext) -> Result<ApiPayload> {
    let value: Value = serde_json::from_str(body)?;
    payload_from_value(&value, ctx)
}

/// Interpret an already-decoded response.
pub fn payload_from_value(value: &Value, ctx: &LogContext) -> Result<ApiPayload> {
    let (entries, reported) = match value {
        Value::Array(entries) => (entries, None),
        Value::Object(obj) => {
            if obj.get("success").and_then(|v| v.as_bool()) == Some(false) {
                let message = obj
                    .get("error")
                    .map(value_to_string)
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "unknown error".to_string());
                return Err(PpeError::Api { message });
            }

            let entries = RECORD_KEYS
                .iter()
                .find_map(|key| obj.get(*key).and_then(|v| v.as_array()))
                .ok_or_else(|| PpeError::Payload {
                    reason: format!("object has no array under any of {:?}", RECORD_KEYS),
                })?;

            let reported = first_field(value, STATS_KEYS).and_then(ReportedStats::from_value);
            (entries, reported)
        }
        other => {
            return Err(PpeError::Payload {
                reason: format!("expected array or object, got {}", json_kind(other)),
            })
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    let mut skipped = 0;

    for (index, entry) in entries.iter().enumerate() {
        match DetectionRecord::from_value(entry) {
            Some(record) => records.push(record),
            None => {
                log::warn!(
                    "{} RECORD_SKIPPED index={} kind={}",
                    ctx,
                    index,
                    json_kind(entry)
                );
                skipped += 1;
            }
        }
    }

    log::debug!(
        "{} PAYLOAD_PARSED records={} skipped={} stats={}",
        ctx,
        records.len(),
        skipped,
        reported.is_some()
    );

    Ok(ApiPayload {
        records,
        reported,
        skipped,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
