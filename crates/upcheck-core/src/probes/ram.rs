use tracing::{debug, warn};

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{Domain, DomainFacts, MemorySource, RamFacts};
use crate::eligibility;
use crate::error::ProbeResult;

/// Total physical memory.
///
/// Falls back to the installed-memory estimate when the live status query
/// fails; only both failing is fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct RamProbe;

impl FactProbe for RamProbe {
    fn domain(&self) -> Domain {
        Domain::Ram
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let facts = match ctx.host.memory_status() {
            Ok(status) => RamFacts {
                total_kb: status.total_bytes / 1024,
                available_kb: Some(status.available_bytes / 1024),
                source: MemorySource::Status,
            },
            Err(e) => {
                warn!(error = %e, "Memory status query failed, trying installed memory");
                RamFacts {
                    total_kb: ctx.host.installed_memory_kb()?,
                    available_kb: None,
                    source: MemorySource::Installed,
                }
            }
        };
        debug!(total_kb = facts.total_kb, source = ?facts.source, "Physical memory");

        let eligible = eligibility::ram_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Ram(facts), eligible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::ports::{MemoryStatus, MockHostPlatform};
    use crate::store::EligibilityStore;

    fn collect(host: &MockHostPlatform) -> ProbeResult<ProbeOutcome> {
        let store = EligibilityStore::new();
        RamProbe.collect(&ProbeContext { host, store: &store })
    }

    #[test]
    fn test_status_query_is_primary() {
        let mut host = MockHostPlatform::new();
        host.expect_memory_status().returning(|| {
            Ok(MemoryStatus {
                total_bytes: 16 * 1024 * 1024 * 1024,
                available_bytes: 8 * 1024 * 1024 * 1024,
            })
        });
        host.expect_installed_memory_kb().never();

        let outcome = collect(&host).unwrap();
        assert!(outcome.eligible);
        assert_eq!(
            outcome.facts,
            DomainFacts::Ram(RamFacts {
                total_kb: 16 * 1024 * 1024,
                available_kb: Some(8 * 1024 * 1024),
                source: MemorySource::Status,
            })
        );
    }

    #[test]
    fn test_falls_back_to_installed_memory() {
        let mut host = MockHostPlatform::new();
        host.expect_memory_status()
            .returning(|| Err(ProbeError::unavailable("GlobalMemoryStatusEx", 8_i64)));
        host.expect_installed_memory_kb()
            .times(1)
            .returning(|| Ok(2 * 1024 * 1024));

        let outcome = collect(&host).unwrap();
        assert!(!outcome.eligible);
        let DomainFacts::Ram(facts) = outcome.facts else {
            panic!("expected RAM facts");
        };
        assert_eq!(facts.source, MemorySource::Installed);
    }

    #[test]
    fn test_both_sources_failing_is_fatal() {
        let mut host = MockHostPlatform::new();
        host.expect_memory_status()
            .returning(|| Err(ProbeError::unavailable("GlobalMemoryStatusEx", 8_i64)));
        host.expect_installed_memory_kb().returning(|| {
            Err(ProbeError::unavailable(
                "GetPhysicallyInstalledSystemMemory",
                1_i64,
            ))
        });

        let err = collect(&host).unwrap_err();
        assert_eq!(err.operation(), "GetPhysicallyInstalledSystemMemory");
    }
}
