//! Date-range filtering module.
//!
//! Parses record timestamps and keeps the records that fall inside a
//! selected window (all, today, yesterday, week, month).

pub mod date_range;
pub mod timestamp;

pub use date_range::*;
pub use timestamp::*;
