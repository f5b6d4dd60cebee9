// # Cloudflare DNS Provider
//
// This crate provides a Cloudflare DNS provider implementation for cfsync.
//
// ## Behavior
//
// - One HTTP request per trait call; the sync engine owns sequencing
// - Full error propagation for listing and deletion
// - Creation answered with anything but 200 is reported, not raised
// - Specific error messages for HTTP status codes (401/403, 404, 429, 5xx)
// - No retry logic, no backoff, no caching, no background tasks
//
// ## Security Requirements
//
// - API token NEVER appears in logs
// - Provider MUST fail fast if token is empty (enforced by `ApiToken`)
//
// ## API Reference
//
// - Cloudflare API v4: https://developers.cloudflare.com/api/
// - List Zones: GET `/zones`
// - List DNS Records: GET `/zones/:zone_id/dns_records?type=...&name=...`
// - Delete DNS Record: DELETE `/zones/:zone_id/dns_records/:record_id`
// - Create DNS Record: POST `/zones/:zone_id/dns_records`

use async_trait::async_trait;
use cfsync_core::record::{CreateOutcome, DnsRecord, NewRecord, RecordKind, Zone};
use cfsync_core::traits::DnsProvider;
use cfsync_core::{ApiToken, Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;

/// Cloudflare API base URL
pub const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

const PROVIDER: &str = "cloudflare";

/// Envelope shared by every Cloudflare API v4 response
///
/// A missing or null `result` is treated as an empty list.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    result: Option<Vec<T>>,
}

impl<T> ApiResponse<T> {
    fn into_result(self) -> Vec<T> {
        self.result.unwrap_or_default()
    }
}

/// A record as returned by the list endpoint
#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    content: String,
}

/// Cloudflare DNS provider
///
/// # Trust Level: Untrusted
///
/// This provider is isolated, stateless, and single-shot. Ordering,
/// pagination and failure policy are owned by `SyncEngine`.
///
/// # Timeouts
///
/// API calls use reqwest's default behavior (no overall timeout).
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct CloudflareProvider {
    /// Cloudflare API token
    /// ⚠️ NEVER log this value
    api_token: ApiToken,

    /// API base URL, without trailing slash
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for CloudflareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudflareProvider")
            .field("api_token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudflareProvider {
    /// Create a new Cloudflare provider
    ///
    /// # Parameters
    ///
    /// - `api_token`: Cloudflare API token with Zone:Read and DNS:Edit permissions
    pub fn new(api_token: ApiToken) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cfsync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_token,
            base_url: CLOUDFLARE_API_BASE.to_string(),
            client,
        })
    }

    /// Point the provider at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn records_url(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/dns_records", self.base_url, zone_id)
    }

    /// Send a request with the bearer token attached
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        request
            .bearer_auth(self.api_token.expose())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("HTTP request failed: {}", e)))
    }

    /// Parse a successful list response
    async fn parse_list<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Vec<T>> {
        let body = response
            .text()
            .await
            .map_err(|e| Error::provider(PROVIDER, format!("Failed to read response: {}", e)))?;

        let parsed: ApiResponse<T> = serde_json::from_str(&body)?;

        Ok(parsed.into_result())
    }
}

/// Map an unsuccessful response to an error
///
/// `action` names the failed operation, e.g. "Zone lookup failed".
async fn status_error(response: reqwest::Response, action: &str) -> Error {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unable to read error response".to_string());

    match status.as_u16() {
        401 | 403 => Error::provider(
            PROVIDER,
            format!(
                "Authentication failed: Invalid API token or insufficient permissions. Status: {}",
                status
            ),
        ),
        404 => Error::not_found(format!("{}: {} - {}", action, status, error_text)),
        429 => Error::provider(
            PROVIDER,
            format!("Rate limit exceeded. Please retry later. Status: {}", status),
        ),
        500..=599 => Error::provider(
            PROVIDER,
            format!("Cloudflare server error (transient): {} - {}", status, error_text),
        ),
        _ => Error::provider(PROVIDER, format!("{}: {} - {}", action, status, error_text)),
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    /// # API Call
    ///
    /// ```http
    /// GET /zones
    /// Authorization: Bearer <token>
    /// ```
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let url = format!("{}/zones", self.base_url);
        tracing::debug!("Listing zones");

        let response = self.send(self.client.get(&url)).await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Zone lookup failed").await);
        }

        Self::parse_list(response).await
    }

    /// # API Call
    ///
    /// ```http
    /// GET /zones/:zone_id/dns_records?type=A&name=sub.example.com
    /// Authorization: Bearer <token>
    /// ```
    async fn list_records(
        &self,
        zone_id: &str,
        kind: RecordKind,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        tracing::debug!("Listing records: {} (type: {})", name, kind);

        let request = self
            .client
            .get(self.records_url(zone_id))
            .query(&[("type", kind.as_str()), ("name", name)]);

        let response = self.send(request).await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Record lookup failed").await);
        }

        let records: Vec<ApiRecord> = Self::parse_list(response).await?;
        Ok(records
            .into_iter()
            .map(|r| DnsRecord {
                id: r.id,
                kind,
                name: r.name.unwrap_or_else(|| name.to_string()),
                content: r.content,
            })
            .collect())
    }

    /// # API Call
    ///
    /// ```http
    /// DELETE /zones/:zone_id/dns_records/:record_id
    /// Authorization: Bearer <token>
    /// ```
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let url = format!("{}/{}", self.records_url(zone_id), record_id);
        tracing::debug!("Deleting record ID: {}", record_id);

        let response = self.send(self.client.delete(&url)).await?;
        if !response.status().is_success() {
            return Err(status_error(response, "Failed to delete record").await);
        }

        Ok(())
    }

    /// # API Call
    ///
    /// ```http
    /// POST /zones/:zone_id/dns_records
    /// {
    ///   "type": "A" or "AAAA",
    ///   "name": "sub.example.com",
    ///   "content": "1.2.3.4",
    ///   "ttl": 1,
    ///   "proxied": false
    /// }
    /// ```
    async fn create_record(&self, zone_id: &str, record: &NewRecord) -> Result<CreateOutcome> {
        tracing::debug!(
            "Creating record: {} -> {} ({})",
            record.name,
            record.content,
            record.kind
        );

        let response = self
            .send(self.client.post(self.records_url(zone_id)).json(record))
            .await?;

        let status = response.status();
        if status == StatusCode::OK {
            return Ok(CreateOutcome::Created);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        Ok(CreateOutcome::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
