//! Probe module.
//!
//! Validates probe parameters, runs the outbound HTTP request and shapes
//! the JSON result returned to the caller.

mod http;
mod result;

pub use http::*;
pub use result::*;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Probe error types.
///
/// The `Display` output is the message reported in the `Error` field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    #[error("{0:?} is not a valid timeout value")]
    InvalidTimeout(String),
    #[error("Method {0:?} is not supported")]
    UnsupportedMethod(String),
    #[error("Can't access {0}")]
    Unreachable(String),
    #[error("Timeout")]
    Timeout,
    #[error("Server responded {0}")]
    UpstreamStatus(u16),
    #[error("{0}")]
    Transport(String),
}

/// Supported outbound methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeMethod {
    Get,
    Head,
}

impl ProbeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Get => "GET",
            ProbeMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for ProbeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProbeMethod {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(ProbeMethod::Get)
        } else if s.eq_ignore_ascii_case("HEAD") {
            Ok(ProbeMethod::Head)
        } else {
            Err(ProbeError::UnsupportedMethod(s.to_string()))
        }
    }
}

impl From<ProbeMethod> for reqwest::Method {
    fn from(method: ProbeMethod) -> Self {
        match method {
            ProbeMethod::Get => reqwest::Method::GET,
            ProbeMethod::Head => reqwest::Method::HEAD,
        }
    }
}

/// Parse a timeout given in milliseconds.
pub fn parse_timeout(raw: &str) -> Result<u64, ProbeError> {
    raw.parse()
        .map_err(|_| ProbeError::InvalidTimeout(raw.to_string()))
}

/// A validated probe.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub url: String,
    pub method: ProbeMethod,
    pub timeout_ms: u64,
}

impl ProbeRequest {
    /// Validate raw parameters. The timeout is checked before the method.
    pub fn parse(url: &str, method: &str, timeout: &str) -> Result<Self, ProbeError> {
        let timeout_ms = parse_timeout(timeout)?;
        let method = method.parse()?;
        Ok(Self {
            url: url.to_string(),
            method,
            timeout_ms,
        })
    }

    /// Round-trip deadline; `None` when the timeout is zero.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout("250"), Ok(250));
        assert_eq!(parse_timeout("0"), Ok(0));
        for bad in ["abc", "", "1.5", "-1", " 10"] {
            assert_eq!(parse_timeout(bad), Err(ProbeError::InvalidTimeout(bad.to_string())));
        }
    }

    #[test]
    fn test_method_is_case_insensitive() {
        assert_eq!("get".parse::<ProbeMethod>(), Ok(ProbeMethod::Get));
        assert_eq!("HeAd".parse::<ProbeMethod>(), Ok(ProbeMethod::Head));
        for bad in ["POST", "", "options", "GETS"] {
            assert_eq!(
                bad.parse::<ProbeMethod>(),
                Err(ProbeError::UnsupportedMethod(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProbeError::InvalidTimeout("abc".into()).to_string(),
            "\"abc\" is not a valid timeout value"
        );
        assert_eq!(
            ProbeError::UnsupportedMethod("POST".into()).to_string(),
            "Method \"POST\" is not supported"
        );
        assert_eq!(
            ProbeError::Unreachable("http://host.test".into()).to_string(),
            "Can't access http://host.test"
        );
        assert_eq!(ProbeError::Timeout.to_string(), "Timeout");
        assert_eq!(ProbeError::UpstreamStatus(404).to_string(), "Server responded 404");
    }

    #[test]
    fn test_request_validates_timeout_first() {
        let err = ProbeRequest::parse("http://a.test", "POST", "soon").unwrap_err();
        assert_eq!(err, ProbeError::InvalidTimeout("soon".into()));

        let err = ProbeRequest::parse("http://a.test", "POST", "100").unwrap_err();
        assert_eq!(err, ProbeError::UnsupportedMethod("POST".into()));

        let req = ProbeRequest::parse("http://a.test", "head", "100").unwrap();
        assert_eq!(req.method, ProbeMethod::Head);
        assert_eq!(req.timeout(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_zero_timeout_means_no_deadline() {
        let req = ProbeRequest::parse("http://a.test", "GET", "0").unwrap();
        assert_eq!(req.timeout(), None);
    }
}
