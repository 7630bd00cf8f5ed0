//! Pipeline orchestration module.
//!
//! Coordinates one load of the compliance view:
//! - Payload parsing (bare array or wrapped object)
//! - Record normalization and classification
//! - Date-range filtering
//! - Aggregation
//! - Projection into display rows

pub mod context;
pub mod ingestion;
pub mod payload;
pub mod view;

pub use context::*;
pub use ingestion::*;
pub use payload::*;
pub use view::*;
