use tracing::debug;

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{Domain, DomainFacts, InternetFacts};
use crate::eligibility;
use crate::error::ProbeResult;

/// Network and internet reachability.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternetProbe;

impl FactProbe for InternetProbe {
    fn domain(&self) -> Domain {
        Domain::Internet
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let state = ctx.host.internet_connected();
        let can_connect = ctx.host.internet_attempt_connect();

        let facts = InternetFacts {
            connected: state.connected,
            connection_flags: state.flags,
            can_connect,
        };
        debug!(
            connected = facts.connected,
            flags = format_args!("{:#x}", facts.connection_flags),
            can_connect,
            "Internet"
        );

        let eligible = eligibility::internet_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Internet(facts), eligible))
    }
}
