//! Test doubles and common utilities for sync contract tests
//!
//! This module provides an in-memory zone provider and a static list source
//! that record every call the engine makes.

#![allow(dead_code)]

use cfsync_core::error::{Error, Result};
use cfsync_core::record::{CreateOutcome, DnsRecord, NewRecord, RecordKind, Zone};
use cfsync_core::traits::{DnsProvider, IpListSource};
use cfsync_core::{SyncConfig, SyncEngine, SyncTarget};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Everything a mock provider has seen and holds
#[derive(Default)]
struct ZoneState {
    zones: Vec<Zone>,
    records: Vec<DnsRecord>,
    next_id: usize,
    page_size: Option<usize>,
    rejected_addresses: HashSet<String>,
    fail_deletes: bool,
    list_zone_calls: usize,
    list_calls: Vec<(RecordKind, String)>,
    deleted_ids: Vec<String>,
    created: Vec<NewRecord>,
}

/// An in-memory DnsProvider holding the records of its zones
///
/// Clones share state, so a test can keep one handle while the engine owns
/// another.
#[derive(Clone, Default)]
pub struct MockZoneProvider {
    state: Arc<Mutex<ZoneState>>,
}

impl MockZoneProvider {
    /// Create a provider listing the given zones
    pub fn new(zones: Vec<Zone>) -> Self {
        let provider = Self::default();
        provider.state.lock().unwrap().zones = zones;
        provider
    }

    /// Create a provider with the single zone `z1` / `example.com`
    pub fn example() -> Self {
        Self::new(vec![zone("z1", "example.com")])
    }

    /// Return at most `size` records per listing
    pub fn with_page_size(self, size: usize) -> Self {
        self.state.lock().unwrap().page_size = Some(size);
        self
    }

    /// Answer creations for `address` with a 400
    pub fn rejecting(self, address: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .rejected_addresses
            .insert(address.to_string());
        self
    }

    /// Fail every delete call
    pub fn failing_deletes(self) -> Self {
        self.state.lock().unwrap().fail_deletes = true;
        self
    }

    /// Seed an existing record
    pub fn seed(&self, kind: RecordKind, name: &str, content: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("seed-{}", state.next_id);
        state.records.push(DnsRecord {
            id,
            kind,
            name: name.to_string(),
            content: content.to_string(),
        });
    }

    /// Contents of the current records of one kind and name, in creation order
    pub fn contents(&self, kind: RecordKind, name: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.kind == kind && r.name == name)
            .map(|r| r.content.clone())
            .collect()
    }

    /// Total number of records held
    pub fn record_count(&self) -> usize {
        self.state.lock().unwrap().records.len()
    }

    pub fn list_zone_calls(&self) -> usize {
        self.state.lock().unwrap().list_zone_calls
    }

    /// Every list_records() call as (kind, name)
    pub fn list_calls(&self) -> Vec<(RecordKind, String)> {
        self.state.lock().unwrap().list_calls.clone()
    }

    /// Number of list_records() calls for one kind
    pub fn list_calls_for(&self, kind: RecordKind) -> usize {
        self.list_calls().iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted_ids.clone()
    }

    /// Every create_record() payload, in call order
    pub fn created(&self) -> Vec<NewRecord> {
        self.state.lock().unwrap().created.clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockZoneProvider {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        let mut state = self.state.lock().unwrap();
        state.list_zone_calls += 1;
        Ok(state.zones.clone())
    }

    async fn list_records(
        &self,
        _zone_id: &str,
        kind: RecordKind,
        name: &str,
    ) -> Result<Vec<DnsRecord>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls.push((kind, name.to_string()));

        let limit = state.page_size.unwrap_or(usize::MAX);
        Ok(state
            .records
            .iter()
            .filter(|r| r.kind == kind && r.name == name)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn delete_record(&self, _zone_id: &str, record_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(Error::provider("mock", "Failed to delete record: 500"));
        }

        state.deleted_ids.push(record_id.to_string());
        state.records.retain(|r| r.id != record_id);
        Ok(())
    }

    async fn create_record(&self, _zone_id: &str, record: &NewRecord) -> Result<CreateOutcome> {
        let mut state = self.state.lock().unwrap();
        state.created.push(record.clone());

        if state.rejected_addresses.contains(&record.content) {
            return Ok(CreateOutcome::Rejected {
                status: 400,
                body: r#"{"success":false}"#.to_string(),
            });
        }

        state.next_id += 1;
        let id = format!("rec-{}", state.next_id);
        state.records.push(DnsRecord {
            id,
            kind: record.kind,
            name: record.name.clone(),
            content: record.content.clone(),
        });
        Ok(CreateOutcome::Created)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A list source serving fixed lists by URL
#[derive(Clone, Default)]
pub struct StaticListSource {
    lists: Arc<HashMap<String, Vec<String>>>,
    fetched: Arc<Mutex<Vec<String>>>,
}

impl StaticListSource {
    /// Serve `addresses` at `url`; any other URL fails
    pub fn new(url: &str, addresses: &[&str]) -> Self {
        Self::default().with_list(url, addresses)
    }

    pub fn with_list(self, url: &str, addresses: &[&str]) -> Self {
        let mut lists = (*self.lists).clone();
        lists.insert(
            url.to_string(),
            addresses.iter().map(|a| a.to_string()).collect(),
        );
        Self {
            lists: Arc::new(lists),
            fetched: self.fetched,
        }
    }

    /// URLs fetched so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IpListSource for StaticListSource {
    async fn fetch(&self, url: &str) -> Result<Vec<String>> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.lists
            .get(url)
            .cloned()
            .ok_or_else(|| Error::http(format!("HTTP error: 404 Not Found ({})", url)))
    }
}

pub const LIST_URL: &str = "https://lists.example.net/best";

pub fn zone(id: &str, name: &str) -> Zone {
    Zone {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Helper to create an engine syncing `subdomain` from [`LIST_URL`]
pub fn engine_for(
    source: &StaticListSource,
    provider: &MockZoneProvider,
    subdomain: &str,
    dry_run: bool,
) -> SyncEngine {
    let config = SyncConfig::new(vec![SyncTarget::new(subdomain, LIST_URL)]).with_dry_run(dry_run);

    SyncEngine::new(Box::new(source.clone()), Box::new(provider.clone()), config)
        .expect("engine construction succeeds")
}
