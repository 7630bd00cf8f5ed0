//! Log line prefixes for one load of the record list.
//!
//! Live loads print `[load=<id>]`. Sample loads add `[sample]` so
//! substituted data is never mistaken for live records when reading the
//! log. View computations add the date range and per-record messages add the
//! row key:
//!
//! ```text
//! [load=load-1a2b3c4d] [sample] [range=week] [record=fp-9f86d081884c]
//! ```

use std::fmt;
use std::sync::Arc;

use crate::filtering::date_range::DateRange;
use crate::pipeline::context::DataOrigin;

/// Prefix shared by every message of one load.
///
/// Cloning is cheap; the load id is shared between the per-record contexts
/// derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    load_id: Arc<str>,
    origin: DataOrigin,
    range: Option<DateRange>,
    record_key: Option<String>,
}

impl LogContext {
    /// Context for a live load.
    pub fn new(load_id: &str) -> Self {
        Self {
            load_id: Arc::from(load_id),
            origin: DataOrigin::Live,
            range: None,
            record_key: None,
        }
    }

    pub fn with_origin(mut self, origin: DataOrigin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_range(&self, range: DateRange) -> Self {
        Self {
            range: Some(range),
            ..self.clone()
        }
    }

    pub fn with_record(&self, record_key: &str) -> Self {
        Self {
            record_key: Some(record_key.to_string()),
            ..self.clone()
        }
    }

    pub fn load_id(&self) -> &str {
        &self.load_id
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[load={}]", self.load_id)?;
        if self.origin == DataOrigin::Sample {
            f.write_str(" [sample]")?;
        }
        if let Some(range) = self.range {
            write!(f, " [range={}]", range)?;
        }
        if let Some(key) = &self.record_key {
            write!(f, " [record={}]", key)?;
        }
        Ok(())
    }
}
