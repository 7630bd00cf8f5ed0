//! PPE Compliance Core - helmet/glove compliance over detection records
//!
//! This crate turns the detection records of a spreadsheet-backed API into
//! compliance views: normalized statuses, date-filtered record tables and
//! summary counters. The implementation prioritizes:
//!
//! 1. **Honest counts** - unrecognized statuses are never counted as
//!    compliant or violating
//! 2. **Logging** - every load and filter decision logged with its load_id
//! 3. **Immutability** - each load produces a snapshot; views are computed
//!    from it and never patched in place
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `normalization` - Field-name absorption and status normalization
//! - `classification` - Record classification (violating/compliant/indeterminate)
//! - `filtering` - Timestamp parsing and date-range filtering
//! - `aggregation` - Compliance summary counters
//! - `pipeline` - Payload parsing, snapshots and view projection
//! - `source` - HTTP and sample record sources
//! - `monitor` - Load triggers and the periodic refresh timer
//! - `config` - Layered configuration
//! - `logging` - Structured logging with load context

pub mod aggregation;
pub mod classification;
pub mod config;
pub mod error;
pub mod filtering;
pub mod logging;
pub mod monitor;
pub mod normalization;
pub mod pipeline;
pub mod source;

#[cfg(feature = "python")]
mod python;

pub use aggregation::{aggregate, ComplianceSummary};
pub use classification::{classify, RecordClass};
pub use config::MonitorConfig;
pub use error::{PpeError, Result};
pub use filtering::{filter_records, filter_records_now, DateRange};
pub use monitor::{ApiStatus, LoadOutcome, Monitor, RefreshScheduler};
pub use normalization::{
    normalize_record, normalize_status, DetectionRecord, EquipmentKind, NormalizedRecord,
    NormalizedStatus,
};
pub use pipeline::{build_view, normalize_batch, parse_payload, DashboardView, RecordSnapshot};
pub use source::{HttpSource, RecordSource, SampleSource};

/// Initialize the process-wide logger.
///
/// Info level with millisecond timestamps unless `RUST_LOG` says otherwise.
/// Safe to call more than once.
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .format_timestamp_millis()
    .try_init();
}
