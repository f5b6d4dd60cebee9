// # HTTP List Source
//
// This crate provides an HTTP-based address list source for cfsync.
//
// ## Format
//
// The list is plain text, one address per line. Any line boundary counts:
// `\n`, `\r\n`, a bare `\r`, and the vertical tab, form feed, file/group/record
// separators, NEL and the Unicode line/paragraph separators. Lines are
// trimmed, blank lines are dropped and order is preserved. Entries are not
// validated as addresses; the record kind is inferred later from their text.
//
// ## Timeout
//
// Each fetch is bounded by a 10 second timeout.

use cfsync_core::traits::IpListSource;
use cfsync_core::{Error, Result};

use std::time::Duration;

/// Default timeout for list fetches
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Returns true for every character that ends a line in a list body
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split a list body into trimmed, non-empty lines, preserving order
pub fn parse_ip_list(body: &str) -> Vec<String> {
    body.split(is_line_boundary)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// HTTP-based address list source
#[derive(Debug, Clone)]
pub struct HttpListSource {
    /// HTTP client
    client: reqwest::Client,
}

impl HttpListSource {
    /// Create a new HTTP list source with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    /// Create with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl IpListSource for HttpListSource {
    async fn fetch(&self, url: &str) -> Result<Vec<String>> {
        tracing::debug!("Fetching address list from {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::http(format!(
                "List fetch failed: {} ({})",
                response.status(),
                url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        Ok(parse_ip_list(&body))
    }
}
