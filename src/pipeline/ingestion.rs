//! Main record pipeline.
//!
//! Coordinates the full compute path for one view:
//! 1. Normalize statuses and parse timestamps (once per load)
//! 2. Classify each record
//! 3. Filter by date range (on every filter change)
//! 4. Aggregate the filtered records
//! 5. Order newest first and project into display rows

use std::cmp::Reverse;

use chrono::{DateTime, Local, NaiveDateTime};

use crate::aggregation::summary::aggregate;
use crate::filtering::date_range::{filter_records, DateRange};
use crate::logging::structured::LogContext;
use crate::normalization::record::{normalize_record, NormalizedRecord};

use super::context::{DataOrigin, LoadContext};
use super::payload::{ApiPayload, ReportedStats};
use super::view::{DashboardView, TableRow};

/// Immutable result of one load. Views are computed from it; a newer load
/// replaces it wholesale.
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    pub load_id: String,
    pub loaded_at: DateTime<Local>,
    pub origin: DataOrigin,
    pub records: Vec<NormalizedRecord>,
    pub reported: Option<ReportedStats>,
}

impl RecordSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.load_id).with_origin(self.origin)
    }
}

/// Normalize a parsed payload into a snapshot.
///
/// Server-reported statistics are compared against the recomputed counts;
/// disagreements are logged and the recomputed counts win.
pub fn normalize_batch(ctx: &LoadContext, payload: ApiPayload) -> RecordSnapshot {
    let log_ctx = ctx.log_context();

    let records: Vec<NormalizedRecord> = payload
        .records
        .into_iter()
        .map(|raw| normalize_record(raw, &log_ctx))
        .collect();

    let summary = aggregate(&records);

    if let Some(reported) = &payload.reported {
        for (field, reported, computed) in reported.mismatches(&summary) {
            log::warn!(
                "{} STATS_MISMATCH field={} reported={} computed={}",
                log_ctx,
                field,
                reported,
                computed
            );
        }
    }

    log::info!(
        "{} BATCH_NORMALIZED origin={} records={} skipped={} violations={} full_ppe={} indeterminate={}",
        log_ctx,
        ctx.origin.as_str(),
        records.len(),
        payload.skipped,
        summary.total_violations,
        summary.full_ppe,
        summary.indeterminate
    );

    RecordSnapshot {
        load_id: ctx.load_id.clone(),
        loaded_at: ctx.loaded_at,
        origin: ctx.origin,
        records,
        reported: payload.reported,
    }
}

/// Compute the view of a snapshot for one date range.
pub fn build_view(snapshot: &RecordSnapshot, range: DateRange, now: NaiveDateTime) -> DashboardView {
    let mut filtered = filter_records(&snapshot.records, range, now);
    let summary = aggregate(&filtered);

    // Newest first; undated records sink to the bottom in their original order.
    filtered.sort_by_key(|r| (r.recorded_at.is_none(), Reverse(r.recorded_at)));

    let rows: Vec<TableRow> = filtered
        .iter()
        .enumerate()
        .map(|(i, record)| TableRow::from_record(i + 1, record))
        .collect();

    log::debug!(
        "{} VIEW_BUILT shown={} total={}",
        snapshot.log_context().with_range(range),
        rows.len(),
        snapshot.len()
    );

    DashboardView {
        load_id: snapshot.load_id.clone(),
        origin: snapshot.origin,
        range,
        loaded_at: snapshot.loaded_at,
        summary,
        rows,
        total_count: snapshot.len(),
        reported: snapshot.reported.clone(),
    }
}
