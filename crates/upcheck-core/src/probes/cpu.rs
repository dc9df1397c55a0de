use tracing::{debug, warn};

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{CpuFacts, Domain, DomainFacts};
use crate::eligibility::{self, CpuIdentity};
use crate::error::{ProbeError, ProbeResult};

/// Processor identity, topology, clock and vendor allow-list.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuProbe;

impl FactProbe for CpuProbe {
    fn domain(&self) -> Domain {
        Domain::Cpu
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let host = ctx.host;

        let active = host.active_processor_count()?;
        if active == 0 {
            return Err(ProbeError::malformed(
                "GetActiveProcessorCount",
                "no active processor reported",
            ));
        }

        let topology = host.cpu_topology()?;
        let model = topology.revision >> 8;
        let [stepping, _] = topology.revision.to_le_bytes();

        let vendor = host.cpu_vendor()?;
        let registry = host.processor_registry()?.unwrap_or_default();

        let max_mhz = host.processor_max_mhz(topology.logical_processors)?;
        let cores_at_speed = eligibility::cores_at_speed(&max_mhz);

        let is_qualcomm = vendor.contains("Qualcomm");
        let identity = CpuIdentity {
            vendor: vendor.clone(),
            family: topology.level,
            model,
            stepping,
            platform_specific_field: registry.platform_specific_field,
            arm_atomics: is_qualcomm && host.arm_atomics_present(),
            atomic_register: if is_qualcomm {
                host.atomic_support_register()
            } else {
                None
            },
        };
        let support = eligibility::vendor_support(&identity);
        if let eligibility::VendorSupport::Unsupported(reason) = &support {
            warn!(vendor = %vendor, model, stepping, "{reason}");
        }

        let facts = CpuFacts {
            name: registry.name,
            vendor,
            family: topology.level,
            model,
            stepping,
            architecture: topology.architecture,
            is_64bit: eligibility::is_64bit_architecture(topology.architecture),
            active_processor_count: active,
            logical_processor_count: topology.logical_processors,
            cores_at_speed,
            vendor_supported: support.is_supported(),
            vendor_note: support.into_note(),
        };
        debug!(
            name = %facts.name,
            family = facts.family,
            model = facts.model,
            cores_at_speed = facts.cores_at_speed,
            "Processor"
        );

        let eligible = eligibility::cpu_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Cpu(facts), eligible))
    }
}
