//! HTTP source for the spreadsheet-backed records endpoint.
//!
//! Requests carry `action=<name>` and a millisecond `t=` parameter so
//! intermediate caches never serve a stale sheet.

use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::Value;

use crate::error::{PpeError, Result};
use crate::logging::structured::LogContext;
use crate::pipeline::payload::{parse_payload, ApiPayload};

use super::RecordSource;

const ACTION_TEST: &str = "test";
const ACTION_GET_DATA: &str = "getData";

/// Blocking HTTP client for the records endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    api_url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(api_url).map_err(|e| PpeError::Config {
            field: "api_url".to_string(),
            message: e.to_string(),
        })?;

        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self { api_url, client })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Endpoint URL for an action, with a cache-busting timestamp.
    pub fn action_url(&self, action: &str, now_millis: i64) -> Url {
        let mut url = self.api_url.clone();
        url.query_pairs_mut()
            .append_pair("action", action)
            .append_pair("t", &now_millis.to_string());
        url
    }

    fn get_text(&self, action: &str, ctx: &LogContext) -> Result<String> {
        let url = self.action_url(action, Utc::now().timestamp_millis());
        log::debug!("{} HTTP_GET action={} url={}", ctx, action, url);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} HTTP_STATUS action={} status={}", ctx, action, status);
            return Err(PpeError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.text()?)
    }
}

/// Interpret a probe response: `{"success": true, ...}` means connected.
pub fn check_probe_response(body: &str) -> Result<()> {
    let value: Value = serde_json::from_str(body)?;
    if value.get("success").and_then(|v| v.as_bool()) == Some(true) {
        return Ok(());
    }

    let message = value
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or("API test failed")
        .to_string();
    Err(PpeError::Api { message })
}

impl RecordSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    fn probe(&self, ctx: &LogContext) -> Result<()> {
        let body = self.get_text(ACTION_TEST, ctx)?;
        check_probe_response(&body)?;
        log::info!("{} API_PROBE_OK url={}", ctx, self.api_url);
        Ok(())
    }

    fn fetch(&self, ctx: &LogContext) -> Result<ApiPayload> {
        let body = self.get_text(ACTION_GET_DATA, ctx)?;
        log::debug!("{} HTTP_BODY_RECEIVED bytes={}", ctx, body.len());
        parse_payload(&body, ctx)
    }
}
