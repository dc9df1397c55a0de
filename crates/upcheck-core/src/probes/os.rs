use tracing::debug;

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{Domain, DomainFacts, OsFacts};
use crate::eligibility;
use crate::error::ProbeResult;

/// OS version and product SKU.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsProbe;

impl FactProbe for OsProbe {
    fn domain(&self) -> Domain {
        Domain::Os
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let version = ctx.host.os_version()?;
        let product_type = ctx.host.product_type(version.major, version.minor)?;

        let facts = OsFacts {
            major: version.major,
            minor: version.minor,
            build: version.build,
            service_pack_major: version.service_pack_major,
            service_pack_minor: version.service_pack_minor,
            platform_id: version.platform_id,
            product_type,
        };
        debug!(
            major = facts.major,
            minor = facts.minor,
            build = facts.build,
            product_type = format_args!("{:#x}", facts.product_type),
            "OS version"
        );

        let eligible = eligibility::os_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Os(facts), eligible))
    }
}
