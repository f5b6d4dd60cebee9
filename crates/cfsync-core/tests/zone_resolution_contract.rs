//! Contract Test: Zone Resolution
//!
//! Constraints verified:
//! - The first listed zone is used, whatever its name
//! - An account with no zones is a fatal error
//! - The zone is resolved once per run, before any list is fetched
//!
//! If this test fails, the engine may operate on the wrong zone.

mod common;

use cfsync_core::{Error, SyncConfig, SyncEngine, SyncTarget};
use common::*;

#[tokio::test]
async fn first_listed_zone_is_selected() {
    let provider = MockZoneProvider::new(vec![
        zone("z-first", "first.example"),
        zone("z-second", "second.example"),
    ]);
    let source = StaticListSource::new(LIST_URL, &[]);
    let engine = engine_for(&source, &provider, "bestcf", false);

    let zone = engine.resolve_zone().await.expect("zone resolves");

    assert_eq!(zone.id, "z-first");
    assert_eq!(zone.name, "first.example");
}

#[tokio::test]
async fn empty_zone_list_is_fatal() {
    let provider = MockZoneProvider::new(Vec::new());
    let source = StaticListSource::new(LIST_URL, &["1.1.1.1"]);
    let engine = engine_for(&source, &provider, "bestcf", false);

    let err = engine.resolve_zone().await.expect_err("no zones must fail");
    assert!(matches!(err, Error::NotFound(ref msg) if msg == "No zones found"));

    // A full run stops before touching the list source
    assert!(engine.run().await.is_err());
    assert!(source.fetched().is_empty());
    assert!(provider.list_calls().is_empty());
    assert!(provider.created().is_empty());
}

#[tokio::test]
async fn zone_is_resolved_once_for_all_targets() {
    let provider = MockZoneProvider::example();
    let source = StaticListSource::new("https://lists.example.net/a", &["1.1.1.1"])
        .with_list("https://lists.example.net/b", &["2.2.2.2"]);

    let config = SyncConfig::new(vec![
        SyncTarget::new("a", "https://lists.example.net/a"),
        SyncTarget::new("b", "https://lists.example.net/b"),
    ]);
    let engine = SyncEngine::new(Box::new(source.clone()), Box::new(provider.clone()), config)
        .expect("engine construction succeeds");

    let report = engine.run().await.expect("run succeeds");

    assert_eq!(provider.list_zone_calls(), 1);
    assert_eq!(report.zone.id, "z1");
    assert_eq!(report.targets.len(), 2);
}
