//! Monitor module.
//!
//! Holds the latest record snapshot and drives the load triggers:
//! - Initial load (probe, then fetch)
//! - Manual refresh
//! - Periodic refresh timer
//! - Date-range changes

pub mod dashboard;
pub mod scheduler;

pub use dashboard::*;
pub use scheduler::*;
