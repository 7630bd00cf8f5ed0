//! Pipeline context management.
//!
//! Provides load context for logging and for labeling where a view's
//! records came from.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Where a record snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataOrigin {
    /// Fetched from the configured endpoint.
    Live,
    /// The fixed sample dataset, substituted after a failed load.
    Sample,
}

impl DataOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataOrigin::Live => "live",
            DataOrigin::Sample => "sample",
        }
    }
}

/// Context for one load of the record list.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub load_id: String,
    pub loaded_at: DateTime<Local>,
    pub origin: DataOrigin,
}

impl LoadContext {
    pub fn new(origin: DataOrigin) -> Self {
        Self::at(origin, Local::now())
    }

    pub fn at(origin: DataOrigin, loaded_at: DateTime<Local>) -> Self {
        let load_id = format!("load-{}", &Uuid::new_v4().to_string()[..8]);

        Self {
            load_id,
            loaded_at,
            origin,
        }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.load_id).with_origin(self.origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_ids_are_unique() {
        let a = LoadContext::new(DataOrigin::Live);
        let b = LoadContext::new(DataOrigin::Live);
        assert!(a.load_id.starts_with("load-"));
        assert_eq!(a.load_id.len(), 13);
        assert_ne!(a.load_id, b.load_id);
    }

    #[test]
    fn test_log_context_carries_load_id_and_origin() {
        let live = LoadContext::new(DataOrigin::Live);
        assert_eq!(
            live.log_context().to_string(),
            format!("[load={}]", live.load_id)
        );

        let sample = LoadContext::new(DataOrigin::Sample);
        assert_eq!(
            sample.log_context().to_string(),
            format!("[load={}] [sample]", sample.load_id)
        );
    }
}
