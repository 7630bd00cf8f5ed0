//! Record sources.
//!
//! A source produces the raw payload for one load. The HTTP source talks to
//! the spreadsheet-backed endpoint; the sample source serves the fixed
//! demonstration dataset.

pub mod http;
pub mod sample;

pub use http::*;
pub use sample::*;

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::pipeline::context::DataOrigin;
use crate::pipeline::payload::ApiPayload;

/// Anything that can supply the current record list.
pub trait RecordSource: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Label carried by every snapshot this source produces.
    fn origin(&self) -> DataOrigin {
        DataOrigin::Live
    }

    /// Check that the source is reachable and answering.
    fn probe(&self, ctx: &LogContext) -> Result<()>;

    /// Fetch the full record list.
    fn fetch(&self, ctx: &LogContext) -> Result<ApiPayload>;
}
