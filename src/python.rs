//! Python bindings.
//!
//! Exposes the compliance pipeline to a Python presentation layer. Built
//! only with the `python` feature.

use chrono::Local;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::aggregation::summary::ComplianceSummary;
use crate::filtering::date_range::DateRange;
use crate::normalization::status::{normalize_status, EquipmentKind};
use crate::pipeline::context::{DataOrigin, LoadContext};
use crate::pipeline::ingestion::{build_view, normalize_batch};
use crate::pipeline::payload::parse_payload;
use crate::pipeline::view::DashboardView;

fn to_py_err(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn summary_dict<'py>(py: Python<'py>, summary: &ComplianceSummary) -> PyResult<&'py PyDict> {
    let dict = PyDict::new(py);
    dict.set_item("helmetViolations", summary.helmet_violations)?;
    dict.set_item("gloveViolations", summary.glove_violations)?;
    dict.set_item("helmetOK", summary.helmet_ok)?;
    dict.set_item("gloveOK", summary.glove_ok)?;
    dict.set_item("fullPPE", summary.full_ppe)?;
    dict.set_item("totalViolations", summary.total_violations)?;
    dict.set_item("totalRecords", summary.total_records)?;
    dict.set_item("helmetUnknown", summary.helmet_unknown)?;
    dict.set_item("gloveUnknown", summary.glove_unknown)?;
    dict.set_item("indeterminate", summary.indeterminate)?;
    dict.set_item("complianceRate", summary.compliance_rate())?;
    Ok(dict)
}

fn view_dict(py: Python<'_>, view: &DashboardView) -> PyResult<Py<PyAny>> {
    let result = PyDict::new(py);
    result.set_item("load_id", &view.load_id)?;
    result.set_item("origin", view.origin.as_str())?;
    result.set_item("range", view.range.as_str())?;
    result.set_item("loaded_at", view.loaded_at.to_rfc3339())?;
    result.set_item("total_count", view.total_count)?;
    result.set_item("filtered_count", view.filtered_count())?;
    result.set_item("summary", summary_dict(py, &view.summary)?)?;

    let rows = PyList::empty(py);
    for row in &view.rows {
        let row_dict = PyDict::new(py);
        row_dict.set_item("row_number", row.row_number)?;
        row_dict.set_item("row_key", &row.row_key)?;
        row_dict.set_item("id", &row.id)?;
        row_dict.set_item("datetime", &row.datetime)?;
        row_dict.set_item("image_url", &row.image_url)?;
        row_dict.set_item("image_alt", row.image_alt)?;
        row_dict.set_item("helmet_status", row.helmet.status.as_str())?;
        row_dict.set_item("helmet_label", row.helmet.label)?;
        row_dict.set_item("helmet_detail", &row.helmet.detail)?;
        row_dict.set_item("glove_status", row.glove.status.as_str())?;
        row_dict.set_item("glove_label", row.glove.label)?;
        row_dict.set_item("glove_detail", &row.glove.detail)?;
        row_dict.set_item("class", row.class.as_str())?;
        rows.append(row_dict)?;
    }
    result.set_item("rows", rows)?;

    Ok(result.into())
}

/// Compute the compliance view of a records response body.
///
/// # Arguments
/// * `body` - Response body (bare array, or object with records/rows/data)
/// * `range` - "all", "today", "yesterday", "week" or "month"
#[pyfunction]
#[pyo3(signature = (body, range="all".to_string()))]
fn summarize_payload(py: Python<'_>, body: String, range: String) -> PyResult<Py<PyAny>> {
    crate::init_logger();

    let range: DateRange = range.parse().map_err(to_py_err)?;
    let ctx = LoadContext::new(DataOrigin::Live);
    let payload = parse_payload(&body, &ctx.log_context()).map_err(to_py_err)?;
    let snapshot = normalize_batch(&ctx, payload);
    let view = build_view(&snapshot, range, Local::now().naive_local());

    view_dict(py, &view)
}

/// Normalize one raw status for "helmet" or "glove".
#[pyfunction]
#[pyo3(signature = (raw, kind))]
fn normalize(raw: Option<String>, kind: String) -> PyResult<String> {
    let kind = EquipmentKind::parse(&kind)
        .ok_or_else(|| PyValueError::new_err(format!("unknown equipment kind '{}'", kind)))?;
    Ok(normalize_status(raw.as_deref(), kind).as_str().to_string())
}

/// Python module definition
#[pymodule]
fn ppe_compliance_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(summarize_payload, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    Ok(())
}
