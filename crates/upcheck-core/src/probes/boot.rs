use tracing::{debug, warn};

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{BootFacts, Domain, DomainFacts, FirmwareType};
use crate::eligibility;
use crate::error::ProbeResult;

/// Firmware type, secure boot and TPM.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootProbe;

impl FactProbe for BootProbe {
    fn domain(&self) -> Domain {
        Domain::Boot
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let environment = ctx.host.boot_environment()?;
        let secure_boot = ctx.host.secure_boot()?;
        let tpm = ctx.host.tpm()?;

        if !tpm.present {
            warn!("TPM device not found");
        }

        let facts = BootFacts {
            firmware: FirmwareType::from_raw(environment.firmware_type),
            boot_flags: environment.boot_flags,
            secure_boot_capable: secure_boot.capable,
            secure_boot_enabled: secure_boot.enabled,
            tpm_present: tpm.present,
            tpm_version: if tpm.present { tpm.version } else { 0 },
        };
        debug!(
            firmware = %facts.firmware.name(),
            secure_boot_capable = facts.secure_boot_capable,
            tpm_version = facts.tpm_version,
            "Boot environment"
        );

        let eligible = eligibility::boot_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Boot(facts), eligible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProbeError;
    use crate::ports::{BootEnvironment, MockHostPlatform, SecureBootState, TpmInfo};
    use crate::store::EligibilityStore;

    fn host(firmware_type: u32, capable: bool, tpm: TpmInfo) -> MockHostPlatform {
        let mut host = MockHostPlatform::new();
        host.expect_boot_environment().returning(move || {
            Ok(BootEnvironment {
                firmware_type,
                boot_flags: 0,
            })
        });
        host.expect_secure_boot().returning(move || {
            Ok(SecureBootState {
                capable,
                enabled: capable,
            })
        });
        host.expect_tpm().returning(move || Ok(tpm));
        host
    }

    fn collect(host: &MockHostPlatform) -> ProbeResult<ProbeOutcome> {
        let store = EligibilityStore::new();
        BootProbe.collect(&ProbeContext { host, store: &store })
    }

    #[test]
    fn test_uefi_secure_boot_tpm2_is_eligible() {
        let tpm = TpmInfo {
            present: true,
            version: 2,
        };
        assert!(collect(&host(2, true, tpm)).unwrap().eligible);
    }

    #[test]
    fn test_missing_tpm_is_a_verdict_not_an_error() {
        let tpm = TpmInfo {
            present: false,
            version: 2,
        };
        let outcome = collect(&host(2, true, tpm)).unwrap();
        assert!(!outcome.eligible);
        let DomainFacts::Boot(facts) = outcome.facts else {
            panic!("expected boot facts");
        };
        assert_eq!(facts.tpm_version, 0);
    }

    #[test]
    fn test_legacy_bios_fails() {
        let tpm = TpmInfo {
            present: true,
            version: 2,
        };
        let outcome = collect(&host(1, true, tpm)).unwrap();
        assert!(!outcome.eligible);
    }

    #[test]
    fn test_secure_boot_query_failure_is_fatal() {
        let mut host = MockHostPlatform::new();
        host.expect_boot_environment()
            .returning(|| Ok(BootEnvironment::default()));
        host.expect_secure_boot().returning(|| {
            Err(ProbeError::unavailable(
                "NtQuerySystemInformation(SystemSecureBootInformation)",
                0xC000_0003_i64,
            ))
        });
        host.expect_tpm().never();

        assert!(collect(&host).is_err());
    }
}
