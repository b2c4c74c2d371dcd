//! JSON summary returned for every probe.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ProbeError;

/// Status code reported for any failed probe.
pub const GATEWAY_ERROR: u16 = 502;

/// What came back from the upstream server.
#[derive(Debug, Clone)]
pub struct Exchange {
    pub latency_ms: u64,
    pub status_code: u16,
    pub status: String,
    pub headers: BTreeMap<String, String>,
    pub content_length: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProbeResult {
    #[serde(rename = "URL")]
    pub url: String,
    pub method: String,
    /// Milliseconds; zero when the requested value did not parse.
    pub timeout: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latency: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub is_error: bool,
}

impl ProbeResult {
    pub fn new(url: &str, method: &str) -> Self {
        Self {
            url: url.to_string(),
            method: method.to_string(),
            ..Default::default()
        }
    }

    /// Copy timing, size and status line from an upstream response.
    pub fn record(&mut self, exchange: &Exchange) {
        self.latency = Some(exchange.latency_ms);
        self.content_length = Some(exchange.content_length);
        self.status_code = Some(exchange.status_code);
        self.status = Some(exchange.status.clone());
    }

    pub fn succeed(mut self, exchange: Exchange) -> Self {
        self.record(&exchange);
        self.headers = Some(exchange.headers);
        self
    }

    pub fn fail(mut self, err: ProbeError) -> Self {
        self.is_error = true;
        self.error = Some(err.to_string());
        self.status_code = Some(GATEWAY_ERROR);
        self
    }
}
