//! Compliance monitor.
//!
//! Owns the last loaded snapshot and re-runs the pipeline for every
//! trigger: initial load, manual refresh, periodic timer, filter change.
//! Refreshes may overlap; whichever finishes last replaces the snapshot.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfig;
use crate::filtering::date_range::DateRange;
use crate::pipeline::context::{DataOrigin, LoadContext};
use crate::pipeline::ingestion::{build_view, normalize_batch, RecordSnapshot};
use crate::pipeline::view::DashboardView;
use crate::source::sample::sample_payload;
use crate::source::RecordSource;

/// Connection state toward the records endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Connecting,
    Connected,
    Disconnected,
}

impl ApiStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiStatus::Connecting => "connecting",
            ApiStatus::Connected => "connected",
            ApiStatus::Disconnected => "disconnected",
        }
    }
}

/// Result of one load trigger.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// Live records loaded.
    Loaded(DashboardView),
    /// The live load failed and the sample dataset was substituted.
    Sample { view: DashboardView, error: String },
    /// The load failed; no data is shown.
    Failed { error: String },
}

impl LoadOutcome {
    pub fn view(&self) -> Option<&DashboardView> {
        match self {
            LoadOutcome::Loaded(view) | LoadOutcome::Sample { view, .. } => Some(view),
            LoadOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Sample { error, .. } | LoadOutcome::Failed { error } => Some(error.as_str()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadOutcome::Failed { .. })
    }
}

/// Monitor over one record source.
pub struct Monitor<S: RecordSource> {
    source: S,
    config: MonitorConfig,
    snapshot: RwLock<Option<Arc<RecordSnapshot>>>,
    status: RwLock<ApiStatus>,
    range: RwLock<DateRange>,
    clock: fn() -> NaiveDateTime,
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<S: RecordSource> Monitor<S> {
    pub fn new(source: S, config: MonitorConfig) -> Self {
        let range = config.default_range;
        Self {
            source,
            config,
            snapshot: RwLock::new(None),
            status: RwLock::new(ApiStatus::Connecting),
            range: RwLock::new(range),
            clock: local_now,
        }
    }

    /// Replace the clock used for date-range windows.
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn status(&self) -> ApiStatus {
        *self.status.read()
    }

    pub fn range(&self) -> DateRange {
        *self.range.read()
    }

    pub fn snapshot(&self) -> Option<Arc<RecordSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Probe the source, then load.
    ///
    /// A failed probe skips straight to the fallback (sample data or no
    /// data) without a fetch.
    pub fn start(&self) -> LoadOutcome {
        let ctx = LoadContext::new(self.source.origin());
        let log_ctx = ctx.log_context();
        *self.status.write() = ApiStatus::Connecting;

        match self.source.probe(&log_ctx) {
            Ok(()) => {
                *self.status.write() = ApiStatus::Connected;
                log::info!("{} MONITOR_CONNECTED source={}", log_ctx, self.source.name());
                self.refresh()
            }
            Err(e) => {
                *self.status.write() = ApiStatus::Disconnected;
                log::error!(
                    "{} MONITOR_CONNECT_FAILED source={} error={}",
                    log_ctx,
                    self.source.name(),
                    e
                );
                self.fallback(e.to_string())
            }
        }
    }

    /// Fetch and recompute. Used by manual refresh and by the timer.
    pub fn refresh(&self) -> LoadOutcome {
        let ctx = LoadContext::new(self.source.origin());
        let log_ctx = ctx.log_context();

        log::info!("{} LOAD_START source={}", log_ctx, self.source.name());

        match self.source.fetch(&log_ctx) {
            Ok(payload) => {
                let snapshot = Arc::new(normalize_batch(&ctx, payload));
                *self.snapshot.write() = Some(Arc::clone(&snapshot));
                *self.status.write() = ApiStatus::Connected;

                let view = build_view(&snapshot, self.range(), (self.clock)());
                log::info!(
                    "{} LOAD_COMPLETE records={} shown={}",
                    log_ctx,
                    snapshot.len(),
                    view.filtered_count()
                );
                LoadOutcome::Loaded(view)
            }
            Err(e) => {
                *self.status.write() = ApiStatus::Disconnected;
                log::error!("{} LOAD_FAILED error={}", log_ctx, e);
                self.fallback(e.to_string())
            }
        }
    }

    /// Change the date range and recompute from the current snapshot.
    ///
    /// Returns None when nothing has been loaded yet.
    pub fn set_range(&self, range: DateRange) -> Option<DashboardView> {
        *self.range.write() = range;
        let snapshot = self.snapshot()?;
        let view = build_view(&snapshot, range, (self.clock)());
        log::info!(
            "{} FILTER_APPLIED shown={}",
            snapshot.log_context().with_range(range),
            view.filtered_count()
        );
        Some(view)
    }

    /// View of the current snapshot under the current range.
    pub fn current_view(&self) -> Option<DashboardView> {
        let snapshot = self.snapshot()?;
        Some(build_view(&snapshot, self.range(), (self.clock)()))
    }

    /// Plain-text status block for the operator.
    pub fn system_info(&self) -> String {
        let snapshot = self.snapshot();
        let last_update = snapshot
            .as_ref()
            .map(|s| s.loaded_at.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "Never".to_string());
        let records = snapshot.as_ref().map(|s| s.len()).unwrap_or(0);
        let origin = snapshot
            .as_ref()
            .map(|s| s.origin.as_str())
            .unwrap_or("none");

        [
            "PPE MONITORING".to_string(),
            "=========================".to_string(),
            format!("Last Update: {}", last_update),
            format!("API Status: {}", self.status().as_str()),
            format!("Records Loaded: {}", records),
            format!("Data Origin: {}", origin),
            format!("Date Range: {}", self.range()),
            format!("API URL: {}", self.config.api_url),
            "=========================".to_string(),
        ]
        .join("\n")
    }

    fn fallback(&self, error: String) -> LoadOutcome {
        if !self.config.use_sample_data {
            return LoadOutcome::Failed { error };
        }

        let ctx = LoadContext::new(DataOrigin::Sample);
        let log_ctx = ctx.log_context();
        match sample_payload(&log_ctx) {
            Ok(payload) => {
                let snapshot = Arc::new(normalize_batch(&ctx, payload));
                *self.snapshot.write() = Some(Arc::clone(&snapshot));
                log::warn!("{} SAMPLE_DATA_SUBSTITUTED reason={}", log_ctx, error);
                let view = build_view(&snapshot, self.range(), (self.clock)());
                LoadOutcome::Sample { view, error }
            }
            Err(e) => {
                log::error!("{} SAMPLE_DATA_FAILED error={}", log_ctx, e);
                LoadOutcome::Failed { error }
            }
        }
    }
}
