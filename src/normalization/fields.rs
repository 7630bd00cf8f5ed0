//! JSON field lookup across naming variants.
//!
//! Record sources disagree on field names (`helmet_status` vs
//! `helmetStatus`, `image_url` vs `imageUrl`). These helpers resolve the
//! first present alias and coerce scalar values to text.

use serde_json::Value;

pub const ID_FIELDS: &[&str] = &["id", "ID", "recordId", "record_id"];
pub const DATETIME_FIELDS: &[&str] = &["datetime", "dateTime", "date_time", "displayDate"];
pub const TIMESTAMP_FIELDS: &[&str] = &["timestamp", "ts", "recordedAt", "recorded_at"];
pub const HELMET_FIELDS: &[&str] = &["helmetStatus", "helmet_status", "helmet"];
pub const GLOVE_FIELDS: &[&str] = &["gloveStatus", "glove_status", "glove", "gloves"];
pub const IMAGE_FIELDS: &[&str] = &["imageUrl", "image_url", "imageURL", "image"];

/// Resolve the first alias present (and not null) on a JSON object.
pub fn first_field<'a>(data: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    let obj = data.as_object()?;
    aliases
        .iter()
        .filter_map(|alias| obj.get(*alias))
        .find(|v| !v.is_null())
}

/// Convert a JSON value to its text representation.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(), // Arrays and objects as JSON strings
    }
}

/// Text of the first alias present, with blank values treated as absent.
pub fn field_text(data: &Value, aliases: &[&str]) -> Option<String> {
    first_field(data, aliases)
        .map(value_to_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
