// # DNS Provider Trait
//
// Defines the interface for reading and changing address records via a
// provider API.
//
// ## Implementations
//
// - Cloudflare: `cfsync-provider-cloudflare` crate
//
// ## Usage
//
// ```rust,ignore
// use cfsync_core::DnsProvider;
// use cfsync_core::record::{NewRecord, RecordKind};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     let zone = provider.list_zones().await?.remove(0);
//     for record in provider.list_records(&zone.id, RecordKind::A, "www.example.com").await? {
//         provider.delete_record(&zone.id, &record.id).await?;
//     }
//
//     let record = NewRecord::for_address("www.example.com", "192.0.2.1");
//     provider.create_record(&zone.id, &record).await?;
//
//     Ok(())
// }
// ```

use crate::record::{CreateOutcome, DnsRecord, NewRecord, RecordKind, Zone};
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// This trait defines the record operations the sync engine needs.
/// Implementations handle the specifics of each provider's API.
///
/// # Trust Level: Untrusted
///
/// Providers are isolated, stateless, and single-shot:
///
/// - One HTTP request per method call
/// - No retry logic or backoff
/// - No caching between calls
/// - No decisions about what to delete or create (owned by `SyncEngine`)
///
/// # Thread Safety
///
/// Implementations must be usable across async tasks.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List the zones visible to the configured credential, in provider order
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Zone>)`: The zones (possibly empty)
    /// - `Err(Error)`: If the request failed or returned an error status
    async fn list_zones(&self) -> Result<Vec<Zone>, crate::Error>;

    /// List records of one kind matching a fully-qualified name
    ///
    /// Returns a single page; the caller re-queries until the page is empty.
    ///
    /// # Parameters
    ///
    /// - `zone_id`: The zone identifier
    /// - `kind`: Record kind to match
    /// - `name`: Fully-qualified record name to match
    async fn list_records(
        &self,
        zone_id: &str,
        kind: RecordKind,
        name: &str,
    ) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Delete a single record
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The record was deleted
    /// - `Err(Error)`: If the request failed or returned an error status
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<(), crate::Error>;

    /// Create a single record
    ///
    /// A response other than 200 is not an error: it is reported as
    /// [`CreateOutcome::Rejected`] so the caller can continue. Only a failure
    /// to get any response at all is returned as `Err`.
    async fn create_record(
        &self,
        zone_id: &str,
        record: &NewRecord,
    ) -> Result<CreateOutcome, crate::Error>;

    /// Get the provider name (for logging/debugging)
    ///
    /// # Returns
    ///
    /// A static string identifying the provider (e.g., "cloudflare")
    fn provider_name(&self) -> &'static str;
}
