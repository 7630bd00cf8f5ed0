//! Record classification module.
//!
//! Decides whether a record counts as a violation, as full PPE, or as
//! neither:
//! - Violating (any field is a violation)
//! - Compliant (both fields compliant)
//! - Indeterminate (an unknown field and no violation)

pub mod decision;

pub use decision::*;
