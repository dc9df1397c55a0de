//! Collection against the fallback adapter used on non-Windows hosts.
#![cfg(not(windows))]

use std::sync::Arc;

use upcheck_core::{Catalog, CollectionState, Collector, Domain, EligibilityStore, Status};
use upcheck_runtime::default_platform;

#[test]
fn test_collection_stops_at_os_probe() {
    let collector = Collector::new(
        Arc::new(EligibilityStore::new()),
        default_platform(),
        Arc::new(Catalog::english()),
    );

    let err = collector.run().unwrap_err();
    let fatal = err.fatal().unwrap();
    assert_eq!(fatal.domain, Domain::Os);
    assert_eq!(fatal.source.operation(), "RtlGetVersion");
    assert_eq!(collector.state(), CollectionState::FatallyFailed);

    let store = collector.store();
    assert_eq!(store.status(Domain::Os), Status::Initializing);
    for domain in &Domain::PROBED[1..] {
        assert_eq!(store.status(*domain), Status::Unknown, "{domain}");
    }
    assert!(!store.is_system_upgradable());
}

#[test]
fn test_spawned_worker_reports_fatal_error() {
    let collector = Arc::new(Collector::new(
        Arc::new(EligibilityStore::new()),
        default_platform(),
        Arc::new(Catalog::english()),
    ));

    let handle = Arc::clone(&collector).spawn().unwrap();
    let result = handle.join().unwrap();
    assert!(result.is_err());
    assert!(collector.state().is_finished());
}
