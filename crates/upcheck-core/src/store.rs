//! Shared status and fact state for all domains.
//!
//! The collection worker is the only writer; the presentation layer polls it
//! every frame and the exporter reads it on demand. Status, rendered record
//! and typed facts of one domain live in a single entry behind one lock, so a
//! reader never sees a record without its terminal status or the reverse.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError, RwLock};

use crate::domain::{Domain, DomainFacts, FactRecord, Status};
use crate::eligibility;

#[derive(Debug, Clone, Default)]
struct Entry {
    status: Status,
    record: Option<FactRecord>,
    facts: Option<DomainFacts>,
}

/// Point-in-time copy of one domain's state.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainSnapshot {
    pub domain: Domain,
    pub status: Status,
    pub record: Option<FactRecord>,
    pub facts: Option<DomainFacts>,
}

/// Status + facts for every domain, plus the monitor info log.
#[derive(Debug)]
pub struct EligibilityStore {
    entries: RwLock<BTreeMap<Domain, Entry>>,
    monitor_info: Mutex<Vec<String>>,
}

impl EligibilityStore {
    /// Create a store with every domain seeded to `Unknown`.
    pub fn new() -> Self {
        let store = Self {
            entries: RwLock::new(BTreeMap::new()),
            monitor_info: Mutex::new(Vec::new()),
        };
        store.initialize();
        store
    }

    /// Seed every domain to `Unknown`, dropping any published records.
    pub fn initialize(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
        for domain in Domain::ALL {
            entries.insert(domain, Entry::default());
        }
    }

    pub fn set_status(&self, domain: Domain, status: Status) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(domain).or_default().status = status;
    }

    /// Current status; `Unknown` for anything not tracked.
    pub fn status(&self, domain: Domain) -> Status {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&domain).map(|e| e.status).unwrap_or_default()
    }

    pub fn set_fact_record(&self, domain: Domain, record: FactRecord) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.entry(domain).or_default().record = Some(record);
    }

    /// Copy of the domain's record; empty if the probe has not published yet.
    pub fn fact_record(&self, domain: Domain) -> FactRecord {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&domain)
            .and_then(|e| e.record.clone())
            .unwrap_or_default()
    }

    /// Copy of the domain's typed facts, if published.
    pub fn facts(&self, domain: Domain) -> Option<DomainFacts> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&domain).and_then(|e| e.facts.clone())
    }

    /// Publish a probe's result: record, facts and terminal status together.
    pub fn publish(&self, domain: Domain, record: FactRecord, facts: DomainFacts, status: Status) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(domain).or_default();
        entry.record = Some(record);
        entry.facts = Some(facts);
        entry.status = status;
    }

    /// Append a line to the monitor info log.
    pub fn append_monitor_info(&self, line: impl Into<String>) {
        self.monitor_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.into());
    }

    pub fn monitor_info(&self) -> Vec<String> {
        self.monitor_info
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of domains currently reporting `Ok`.
    pub fn ok_count(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|e| e.status == Status::Ok).count()
    }

    /// Overall go/no-go, see [`eligibility::is_upgradable`].
    pub fn is_system_upgradable(&self) -> bool {
        eligibility::is_upgradable(self.ok_count())
    }

    /// Consistent copy of every domain, in domain order.
    pub fn snapshot(&self) -> Vec<DomainSnapshot> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .map(|(domain, entry)| DomainSnapshot {
                domain: *domain,
                status: entry.status,
                record: entry.record.clone(),
                facts: entry.facts.clone(),
            })
            .collect()
    }

    /// Domains that have a published record, in domain order.
    pub fn records(&self) -> Vec<(Domain, FactRecord)> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .iter()
            .filter_map(|(domain, entry)| entry.record.clone().map(|r| (*domain, r)))
            .collect()
    }
}

impl Default for EligibilityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InternetFacts;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_every_domain_starts_unknown() {
        let store = EligibilityStore::new();
        for domain in Domain::ALL {
            assert_eq!(store.status(domain), Status::Unknown);
            assert!(store.fact_record(domain).is_empty());
            assert!(store.facts(domain).is_none());
        }
        assert_eq!(store.snapshot().len(), Domain::ALL.len());
    }

    #[test]
    fn test_publish_sets_record_and_status_together() {
        let store = EligibilityStore::new();
        store.set_status(Domain::Internet, Status::Initializing);

        let mut record = FactRecord::new("\u{f1eb}  Internet Details:");
        record.push("Network state: true");
        store.publish(
            Domain::Internet,
            record.clone(),
            DomainFacts::Internet(InternetFacts::default()),
            Status::Fail,
        );

        assert_eq!(store.status(Domain::Internet), Status::Fail);
        assert_eq!(store.fact_record(Domain::Internet), record);
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_initialize_resets_state() {
        let store = EligibilityStore::new();
        store.set_status(Domain::Ram, Status::Ok);
        store.set_fact_record(Domain::Ram, FactRecord::new("x"));
        store.initialize();
        assert_eq!(store.status(Domain::Ram), Status::Unknown);
        assert!(store.records().is_empty());
    }

    #[test]
    fn test_monitor_info_is_ordered_and_append_only() {
        let store = EligibilityStore::new();
        store.append_monitor_info("Monitor: 1");
        store.append_monitor_info("Monitor: 2");
        assert_eq!(store.monitor_info(), vec!["Monitor: 1", "Monitor: 2"]);
    }

    #[test]
    fn test_upgradable_requires_all_probed_domains_ok() {
        let store = EligibilityStore::new();
        for domain in &Domain::PROBED[..6] {
            store.set_status(*domain, Status::Ok);
        }
        assert!(!store.is_system_upgradable());
        store.set_status(Domain::Internet, Status::Ok);
        assert!(store.is_system_upgradable());
    }

    #[test]
    fn test_concurrent_reader_never_sees_record_without_terminal_status() {
        let store = Arc::new(EligibilityStore::new());
        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for round in 0..200 {
                    store.set_status(Domain::Cpu, Status::Initializing);
                    let mut record = FactRecord::new("t");
                    record.push(format!("round {round}"));
                    store.publish(
                        Domain::Cpu,
                        record,
                        DomainFacts::Internet(InternetFacts::default()),
                        Status::Ok,
                    );
                    store.initialize();
                }
            })
        };

        for _ in 0..2000 {
            for snapshot in store.snapshot() {
                if snapshot.record.is_some() {
                    assert!(snapshot.status.is_terminal());
                }
            }
        }
        writer.join().unwrap();
    }
}
