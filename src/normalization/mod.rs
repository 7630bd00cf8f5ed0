//! Record normalization module.
//!
//! Turns raw detection records (inconsistent field names, free-text
//! statuses) into normalized records the rest of the pipeline can count.

pub mod fields;
pub mod record;
pub mod status;

pub use fields::*;
pub use record::*;
pub use status::*;
