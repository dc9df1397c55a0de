use tracing::{debug, info};

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{DiskFacts, Domain, DomainFacts};
use crate::eligibility;
use crate::error::ProbeResult;

/// Mounted volumes and free space.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskProbe;

impl FactProbe for DiskProbe {
    fn domain(&self) -> Domain {
        Domain::Disk
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let volumes: Vec<_> = ctx
            .host
            .volumes()?
            .into_iter()
            .inspect(|v| {
                debug!(
                    device = %v.device_name,
                    volume = %v.volume_name,
                    path = %v.path,
                    "Found a device"
                );
            })
            .filter(|v| eligibility::is_accessible_volume_path(&v.path))
            .collect();

        for volume in &volumes {
            if let Some(mb) = volume.free_mb()
                && mb > eligibility::MIN_FREE_DISK_MB
            {
                info!(path = %volume.path, free_mb = mb, "Volume with enough free space");
            }
        }

        let facts = DiskFacts { volumes };
        let eligible = eligibility::disk_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Disk(facts), eligible))
    }
}
