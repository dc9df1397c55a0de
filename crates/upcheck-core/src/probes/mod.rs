//! Per-domain fact probes.
//!
//! A probe queries the [`HostPlatform`] for one domain, builds the typed
//! facts and decides the verdict. Status transitions, rendering and
//! publishing are handled by the [`Collector`](crate::collector::Collector).

mod boot;
mod cpu;
mod disk;
mod display;
mod internet;
mod os;
mod ram;

pub use boot::BootProbe;
pub use cpu::CpuProbe;
pub use disk::DiskProbe;
pub use display::DisplayProbe;
pub use internet::InternetProbe;
pub use os::OsProbe;
pub use ram::RamProbe;

use crate::domain::{Domain, DomainFacts};
use crate::error::ProbeResult;
use crate::ports::HostPlatform;
use crate::store::EligibilityStore;

/// What a probe reaches during one run.
pub struct ProbeContext<'a> {
    pub host: &'a dyn HostPlatform,
    pub store: &'a EligibilityStore,
}

/// Facts gathered by a probe plus its verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub facts: DomainFacts,
    pub eligible: bool,
}

impl ProbeOutcome {
    pub const fn new(facts: DomainFacts, eligible: bool) -> Self {
        Self { facts, eligible }
    }
}

/// One checklist probe.
///
/// `Err` means the probe could not run at all. A failed predicate is an
/// `Ok` outcome with `eligible == false`.
pub trait FactProbe: Send + Sync {
    fn domain(&self) -> Domain;

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome>;
}

/// The seven probes in collection order.
pub fn default_probes() -> Vec<Box<dyn FactProbe>> {
    vec![
        Box::new(OsProbe),
        Box::new(BootProbe),
        Box::new(CpuProbe),
        Box::new(RamProbe),
        Box::new(DiskProbe),
        Box::new(DisplayProbe),
        Box::new(InternetProbe),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_probes_follow_collection_order() {
        let domains: Vec<Domain> = default_probes().iter().map(|p| p.domain()).collect();
        assert_eq!(domains, Domain::PROBED.to_vec());
    }
}
