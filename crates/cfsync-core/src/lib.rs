// # cfsync-core
//
// Core library for syncing fetched address lists into DNS zone records.
//
// ## Architecture Overview
//
// - **IpListSource**: Trait for fetching a candidate address list
// - **DnsProvider**: Trait for listing, deleting and creating address records
// - **SyncEngine**: Orchestrates zone resolution and fetch → prune → publish
// - **record**: Record kinds, names, zones and creation payloads
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from HTTP implementations
// 2. **Sequential**: Every provider call completes before the next starts
// 3. **Replace, not diff**: Old records are deleted before the fetched set is created
// 4. **Library-First**: All core functionality can be used as a library

pub mod traits;
pub mod sync;
pub mod record;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpListSource, DnsProvider};
pub use sync::{PublishSummary, SyncEngine, RunReport, TargetReport};
pub use record::{RecordKind, Zone};
pub use config::{ApiToken, SyncConfig, SyncTarget};
pub use error::{Error, Result};
