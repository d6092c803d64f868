//! Request/response logging.

use crate::Response;
use http::{HeaderMap, Method};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

/// How much of each exchange is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LoggingScope {
    /// Nothing beyond trace-level internals.
    #[default]
    None,
    /// Request line and response status.
    RequestResponse,
    /// Request line, status, headers and body.
    All,
}

impl FromStr for LoggingScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "none" => Ok(Self::None),
            "request-response" => Ok(Self::RequestResponse),
            "all" => Ok(Self::All),
            other => Err(format!("unknown logging scope '{}'", other)),
        }
    }
}

impl TryFrom<String> for LoggingScope {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Body text cut to `limit` bytes on a char boundary.
pub(crate) fn truncate_body(body: &[u8], limit: usize) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= limit {
        return text.into_owned();
    }

    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value.to_str().unwrap_or("<binary>")))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn log_request(scope: LoggingScope, method: &Method, url: &url::Url, headers: &HeaderMap) {
    match scope {
        LoggingScope::None => {
            debug!(method = %method, url = %url, "Sending HTTP request");
        }
        LoggingScope::RequestResponse => {
            info!(method = %method, url = %url, "Sending HTTP request");
        }
        LoggingScope::All => {
            info!(
                method = %method,
                url = %url,
                headers = %format_headers(headers),
                "Sending HTTP request"
            );
        }
    }
}

pub(crate) fn log_response(
    scope: LoggingScope,
    body_limit: usize,
    response: &Response,
    elapsed: Duration,
) {
    let elapsed_ms = elapsed.as_millis() as u64;

    match scope {
        LoggingScope::None => {
            debug!(status = %response.status(), url = %response.url(), elapsed_ms, "Received HTTP response");
        }
        LoggingScope::RequestResponse => {
            info!(status = %response.status(), url = %response.url(), elapsed_ms, "Received HTTP response");
        }
        LoggingScope::All => {
            info!(
                status = %response.status(),
                url = %response.url(),
                elapsed_ms,
                headers = %format_headers(response.headers()),
                body = %truncate_body(response.bytes(), body_limit),
                "Received HTTP response"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scope() {
        assert_eq!("ALL".parse(), Ok(LoggingScope::All));
        assert_eq!("request_response".parse(), Ok(LoggingScope::RequestResponse));
        assert_eq!("none".parse(), Ok(LoggingScope::None));
        assert!("verbose".parse::<LoggingScope>().is_err());
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body(b"short", 10), "short");
        assert_eq!(truncate_body(b"0123456789abc", 10), "0123456789...");
        // 'é' is two bytes; never split it
        assert_eq!(truncate_body("aé".as_bytes(), 2), "a...");
    }

    #[test]
    fn test_format_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-one", "1".parse().unwrap());
        assert_eq!(format_headers(&headers), "x-one: 1");
    }
}
