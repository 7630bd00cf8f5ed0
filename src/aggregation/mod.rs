//! Compliance aggregation module.
//!
//! Folds normalized records into the counters shown on the dashboard.

pub mod summary;

pub use summary::*;
