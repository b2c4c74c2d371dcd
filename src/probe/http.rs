//! HTTP probe implementation.

use std::collections::BTreeMap;
use std::time::Instant;

use reqwest::header::HeaderMap;

use super::{parse_timeout, Exchange, ProbeError, ProbeRequest, ProbeResult};

/// Issues probes and turns their outcome into a [`ProbeResult`].
#[derive(Debug, Clone)]
pub struct Prober {
    strict_status: bool,
}

impl Prober {
    /// With `strict_status`, any upstream code other than 200 is an error.
    pub fn new(strict_status: bool) -> Self {
        Self { strict_status }
    }

    /// Validate the raw parameters, run the probe and report the outcome.
    ///
    /// Never fails: every problem ends up in the `Error` field.
    pub async fn probe(&self, url: &str, method: &str, timeout: &str) -> ProbeResult {
        let mut result = ProbeResult::new(url, method);
        result.timeout = parse_timeout(timeout).unwrap_or(0);

        let request = match ProbeRequest::parse(url, method, timeout) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("Rejected probe of {}: {}", url, e);
                return result.fail(e);
            }
        };

        match run_http_probe(&request).await {
            Ok(exchange) if self.strict_status && exchange.status_code != 200 => {
                tracing::warn!(
                    "Probe {} {} got status {}",
                    request.method, request.url, exchange.status_code
                );
                let code = exchange.status_code;
                result.record(&exchange);
                result.fail(ProbeError::UpstreamStatus(code))
            }
            Ok(exchange) => {
                tracing::debug!(
                    "Probe {} {} answered {} in {}ms",
                    request.method, request.url, exchange.status, exchange.latency_ms
                );
                result.succeed(exchange)
            }
            Err(e) => {
                tracing::warn!("Probe {} {} failed: {}", request.method, request.url, e);
                result.fail(e)
            }
        }
    }
}

/// Run a single HTTP request against the target.
///
/// Latency is measured up to the response head; the body is then drained
/// to count its bytes. The timeout covers the whole round trip.
pub async fn run_http_probe(request: &ProbeRequest) -> Result<Exchange, ProbeError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = request.timeout() {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| ProbeError::Transport(e.to_string()))?;

    let start = Instant::now();

    let mut response = client
        .request(request.method.into(), &request.url)
        .send()
        .await
        .map_err(|e| classify(e, &request.url))?;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status();
    let headers = flatten_headers(response.headers());

    let mut content_length = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| classify(e, &request.url))?
    {
        content_length += chunk.len() as u64;
    }

    Ok(Exchange {
        latency_ms,
        status_code: status.as_u16(),
        status: status.to_string(),
        headers,
        content_length,
    })
}

/// Map a client error onto the reported failure kinds.
fn classify(err: reqwest::Error, url: &str) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout
    } else if err.is_connect() {
        ProbeError::Unreachable(url.to_string())
    } else {
        ProbeError::Transport(err.to_string())
    }
}

/// Repeated header values are joined with ", ". Names are reported in
/// canonical form (`Content-Type`).
fn flatten_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut flat = BTreeMap::new();
    for name in headers.keys() {
        let values: Vec<String> = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        flat.insert(canonical_name(name.as_str()), values.join(", "));
    }
    flat
}

/// Upper-case the first letter and every letter after a hyphen.
fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}
