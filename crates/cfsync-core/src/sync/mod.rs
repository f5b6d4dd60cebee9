//! Core sync engine
//!
//! The SyncEngine is responsible for:
//! - Resolving the zone the run operates on
//! - Fetching each target's address list via IpListSource
//! - Pruning existing address records via DnsProvider
//! - Publishing one record per fetched address
//!
//! ## Flow
//!
//! ```text
//!                 ┌──────────────┐
//!                 │ resolve_zone │  (once per run)
//!                 └──────────────┘
//!                        │
//!        for each target, in configuration order
//!                        │
//!   ┌──────────────┐     ▼      ┌───────────────┐     ┌─────────────────┐
//!   │ IpListSource │──fetch──▶  │ prune_records │───▶ │ publish_records │
//!   └──────────────┘            └───────────────┘     └─────────────────┘
//! ```
//!
//! Everything runs sequentially: every provider call completes before the
//! next one starts. Records are never diffed: all address records for the
//! name are deleted, then the fetched set is created.
//!
//! ## Failure Model
//!
//! Errors from list fetching, zone resolution, record listing and record
//! deletion abort the run. A creation rejected by the provider is logged and
//! the remaining addresses are still published.

use crate::config::{SyncConfig, SyncTarget};
use crate::error::{Error, Result};
use crate::record::{self, CreateOutcome, NewRecord, RecordKind, Zone};
use crate::traits::{DnsProvider, IpListSource};
use tracing::{debug, info, warn};

/// Outcome of syncing a single target
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetReport {
    /// Fully-qualified record name
    pub record_name: String,
    /// Addresses fetched from the source list
    pub fetched: usize,
    /// Records deleted (or that would be deleted in dry-run mode)
    pub deleted: usize,
    /// Records created (or that would be created in dry-run mode)
    pub created: usize,
    /// Creations rejected by the provider
    pub failed: usize,
}

/// Outcome of a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The zone the run operated on
    pub zone: Zone,
    /// One report per target, in configuration order
    pub targets: Vec<TargetReport>,
}

impl RunReport {
    /// Total creations rejected across all targets
    pub fn failed(&self) -> usize {
        self.targets.iter().map(|t| t.failed).sum()
    }
}

/// Counts produced by [`SyncEngine::publish_records`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishSummary {
    /// Records created (or that would be created in dry-run mode)
    pub created: usize,
    /// Creations rejected by the provider
    pub failed: usize,
}

/// Core sync engine
///
/// The engine orchestrates one complete run: zone resolution followed by
/// fetch → prune → publish for each configured target.
///
/// ## Lifecycle
///
/// 1. Create with [`SyncEngine::new()`]
/// 2. Call [`SyncEngine::run()`] once per scheduled invocation
///
/// The engine holds no state between runs.
pub struct SyncEngine {
    /// Source of address lists
    source: Box<dyn IpListSource>,

    /// DNS provider for record operations
    provider: Box<dyn DnsProvider>,

    /// Targets to sync, in order
    targets: Vec<SyncTarget>,

    /// Skip deletions and creations
    dry_run: bool,
}

impl SyncEngine {
    /// Create a new sync engine
    ///
    /// # Parameters
    ///
    /// - `source`: Address list source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: Sync configuration
    pub fn new(
        source: Box<dyn IpListSource>,
        provider: Box<dyn DnsProvider>,
        config: SyncConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            source,
            provider,
            targets: config.targets,
            dry_run: config.engine.dry_run,
        })
    }

    /// Run a full sync
    ///
    /// Resolves the zone once, then processes each target in order. The
    /// first fatal error stops the run; targets after it are not processed.
    ///
    /// # Returns
    ///
    /// - `Ok(RunReport)`: All targets processed (some creations may have been rejected)
    /// - `Err(Error)`: Fatal error
    pub async fn run(&self) -> Result<RunReport> {
        if self.dry_run {
            warn!("Running in DRY-RUN mode - no records will be deleted or created");
        }

        let zone = self.resolve_zone().await?;
        info!("Using zone {} ({})", zone.name, zone.id);

        let mut targets = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            targets.push(self.sync_target(&zone, target).await?);
        }

        Ok(RunReport { zone, targets })
    }

    /// Sync a single target: fetch, prune, publish
    async fn sync_target(&self, zone: &Zone, target: &SyncTarget) -> Result<TargetReport> {
        let record_name = record::record_name(&target.subdomain, &zone.name);
        info!("=== Updating {} ===", record_name);

        let addresses = self.source.fetch(&target.source_url).await?;
        debug!(
            "Fetched {} address(es) from {}",
            addresses.len(),
            target.source_url
        );

        let deleted = self.prune_records(zone, &target.subdomain).await?;
        let summary = self
            .publish_records(zone, &target.subdomain, &addresses)
            .await?;

        Ok(TargetReport {
            record_name,
            fetched: addresses.len(),
            deleted,
            created: summary.created,
            failed: summary.failed,
        })
    }

    /// Resolve the zone this run operates on
    ///
    /// Selection is positional: the first zone the provider lists is used,
    /// whatever its name. Accounts with several zones get whichever the
    /// provider returns first.
    ///
    /// # Returns
    ///
    /// - `Ok(Zone)`: The first listed zone
    /// - `Err(Error::NotFound)`: If the provider lists no zones
    pub async fn resolve_zone(&self) -> Result<Zone> {
        let zones = self.provider.list_zones().await?;
        debug!(
            "Provider {} listed {} zone(s)",
            self.provider.provider_name(),
            zones.len()
        );

        zones
            .into_iter()
            .next()
            .ok_or_else(|| Error::not_found("No zones found"))
    }

    /// Delete every address record for a subdomain
    ///
    /// For each kind (A, then AAAA) the provider is queried until it returns
    /// an empty page; each returned record is deleted individually. In
    /// dry-run mode each kind is listed once and nothing is deleted.
    ///
    /// # Returns
    ///
    /// The number of records deleted
    pub async fn prune_records(&self, zone: &Zone, subdomain: &str) -> Result<usize> {
        let name = record::record_name(subdomain, &zone.name);
        let mut deleted = 0;

        for kind in RecordKind::ALL {
            loop {
                let records = self.provider.list_records(&zone.id, kind, &name).await?;
                if records.is_empty() {
                    break;
                }

                for record in &records {
                    if self.dry_run {
                        info!("Would delete {} {} -> {}", kind, name, record.content);
                    } else {
                        self.provider.delete_record(&zone.id, &record.id).await?;
                        info!("Del {} {} -> {}", kind, name, record.content);
                    }
                    deleted += 1;
                }

                // Nothing was removed, so the next page would be identical
                if self.dry_run {
                    break;
                }
            }
        }

        Ok(deleted)
    }

    /// Create one address record per entry in `addresses`, in order
    ///
    /// A creation rejected by the provider is logged with its status and
    /// body, and publishing continues with the next address.
    ///
    /// # Returns
    ///
    /// - `Ok(PublishSummary)`: Every address was attempted
    /// - `Err(Error)`: The provider could not be reached at all
    pub async fn publish_records(
        &self,
        zone: &Zone,
        subdomain: &str,
        addresses: &[String],
    ) -> Result<PublishSummary> {
        let name = record::record_name(subdomain, &zone.name);
        let mut summary = PublishSummary::default();

        for address in addresses {
            let new_record = NewRecord::for_address(name.as_str(), address.as_str());

            if self.dry_run {
                info!("Would add {} {} -> {}", new_record.kind, name, address);
                summary.created += 1;
                continue;
            }

            match self.provider.create_record(&zone.id, &new_record).await? {
                CreateOutcome::Created => {
                    info!("Add {} {} -> {}", new_record.kind, name, address);
                    summary.created += 1;
                }
                CreateOutcome::Rejected { status, body } => {
                    warn!(
                        "Failed {} {} -> {} | {} {}",
                        new_record.kind, name, address, status, body
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
