//! Fixed sample dataset.
//!
//! Substituted when a live load fails and sample data is enabled. Views
//! built from it are labeled `DataOrigin::Sample`.

use serde_json::json;

use crate::error::Result;
use crate::logging::structured::LogContext;
use crate::pipeline::context::DataOrigin;
use crate::pipeline::payload::{payload_from_value, ApiPayload};

use super::RecordSource;

/// The three demonstration records.
pub fn sample_payload(ctx: &LogContext) -> Result<ApiPayload> {
    let body = json!([
        {
            "id": 1,
            "datetime": "Nov 4, 2025, 09:55:42 AM",
            "timestamp": "2025-11-04T09:55:42",
            "imageUrl": "https://drive.google.com/uc?id=1kaqbrGBlIDoGqj&export=view",
            "helmetStatus": "no_helmet",
            "gloveStatus": "glove"
        },
        {
            "id": 2,
            "datetime": "Nov 4, 2025, 09:56:09 AM",
            "timestamp": "2025-11-04T09:56:09",
            "imageUrl": "https://drive.google.com/uc?id=1nOxycdenBHwUJ&export=view",
            "helmetStatus": "helmet",
            "gloveStatus": "glove"
        },
        {
            "id": 3,
            "datetime": "Nov 4, 2025, 10:15:33 AM",
            "timestamp": "2025-11-04T10:15:33",
            "imageUrl": "https://drive.google.com/uc?id=1abc123def456&export=view",
            "helmetStatus": "helmet",
            "gloveStatus": "no_glove"
        }
    ]);
    payload_from_value(&body, ctx)
}

/// Source that always serves the sample dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleSource;

impl RecordSource for SampleSource {
    fn name(&self) -> &str {
        "sample"
    }

    fn origin(&self) -> DataOrigin {
        DataOrigin::Sample
    }

    fn probe(&self, _ctx: &LogContext) -> Result<()> {
        Ok(())
    }

    fn fetch(&self, ctx: &LogContext) -> Result<ApiPayload> {
        log::info!("{} SAMPLE_DATA_SERVED", ctx);
        sample_payload(ctx)
    }
}
