//! Configuration module for pinger.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;

/// Target probed when a request carries no `url` parameter.
pub const DEFAULT_TARGET_URL: &str = "http://localhost:5555";

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8000)
    pub http_port: u16,
    /// Target used when the request has no `url` parameter
    pub default_url: String,
    /// When set, every probe goes to this URL and the `url` parameter is ignored
    pub fixed_url: Option<String>,
    /// Report any upstream status other than 200 as an error (default: true)
    pub strict_status: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8000,
            default_url: DEFAULT_TARGET_URL.to_string(),
            fixed_url: None,
            strict_status: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PINGER_HTTP_PORT`: HTTP port (default: 8000)
    /// - `PINGER_DEFAULT_URL`: fallback target (default: "http://localhost:5555")
    /// - `PINGER_FIXED_URL`: always probe this target (default: unset)
    /// - `PINGER_STRICT_STATUS`: treat non-200 upstream codes as errors (default: true)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port_str) = lookup("PINGER_HTTP_PORT") {
            if let Ok(port) = port_str.trim().parse() {
                cfg.http_port = port;
            }
        }

        if let Some(url) = lookup("PINGER_DEFAULT_URL").filter(|u| !u.trim().is_empty()) {
            cfg.default_url = url.trim().to_string();
        }

        cfg.fixed_url = lookup("PINGER_FIXED_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        if let Some(strict) = lookup("PINGER_STRICT_STATUS").and_then(|s| parse_flag(&s)) {
            cfg.strict_status = strict;
        }

        cfg
    }

    /// Pick the URL to probe for a request that asked for `requested`.
    pub fn target_for(&self, requested: Option<&str>) -> String {
        if let Some(fixed) = &self.fixed_url {
            return fixed.clone();
        }
        match requested {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => self.default_url.clone(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
