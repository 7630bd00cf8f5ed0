//! Log context for load and view messages.
//!
//! Every line emitted while loading or filtering records starts with the
//! load id, so one refresh cycle can be followed end to end. Events are
//! upper-snake names followed by `key=value` pairs.

pub mod structured;

pub use structured::*;
