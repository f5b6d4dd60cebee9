// # Address List Source Trait
//
// Defines the interface for fetching the candidate address list that feeds
// a record name.
//
// ## Implementations
//
// - HTTP text list: `cfsync-list-http` crate
//
// ## Usage
//
// ```rust,ignore
// use cfsync_core::IpListSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpListSource implementation */;
//
//     for address in source.fetch("https://lists.example.net/best").await? {
//         println!("candidate: {}", address);
//     }
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for address list sources
///
/// A source returns the addresses found at a location, one per entry, in
/// the order the location lists them. Entries are trimmed and never empty.
/// Addresses are returned as text and are not validated.
///
/// Sources are single-shot: one fetch per call, no retries, no caching.
#[async_trait]
pub trait IpListSource: Send + Sync {
    /// Fetch the address list at `url`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: The addresses, in source order (possibly empty)
    /// - `Err(Error)`: If the fetch failed or the location answered with an error status
    async fn fetch(&self, url: &str) -> Result<Vec<String>, crate::Error>;
}
