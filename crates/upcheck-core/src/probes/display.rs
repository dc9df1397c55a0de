use tracing::{debug, info, warn};

use super::{FactProbe, ProbeContext, ProbeOutcome};
use crate::domain::{DisplayFacts, Domain, DomainFacts};
use crate::edid;
use crate::eligibility;
use crate::error::ProbeResult;

/// Monitors, physical display size, graphics driver model and DirectX.
///
/// Every monitor is appended to the store's monitor info log as it is
/// enumerated; the log is folded into the record once all queries finish.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayProbe;

impl FactProbe for DisplayProbe {
    fn domain(&self) -> Domain {
        Domain::Display
    }

    fn collect(&self, ctx: &ProbeContext<'_>) -> ProbeResult<ProbeOutcome> {
        let monitors = ctx.host.monitors()?;
        for monitor in &monitors {
            ctx.store.append_monitor_info(monitor.log_line());
        }

        let mut devices = Vec::new();
        for blob in ctx.host.display_edids()? {
            match edid::parse(&blob) {
                Some(device) => {
                    let inches = eligibility::diagonal_inches(
                        f64::from(device.width_cm),
                        f64::from(device.height_cm),
                    );
                    if inches >= eligibility::MIN_DIAGONAL_INCHES {
                        info!(inches, "Available display device with size: {inches:.2} detected!");
                    }
                    devices.push(device);
                }
                None => warn!(
                    path = %blob.registry_path,
                    len = blob.bytes.len(),
                    "EDID block too short"
                ),
            }
        }

        let adapters = ctx.host.graphics_adapters()?;
        let directx = ctx.host.directx_version()?;
        debug!(
            monitors = monitors.len(),
            devices = devices.len(),
            adapters = adapters.len(),
            directx = format_args!("{}.{}", directx.major, directx.minor),
            "Display"
        );

        let facts = DisplayFacts {
            monitors,
            devices,
            adapters,
            directx,
            monitor_log: ctx.store.monitor_info(),
        };
        let eligible = eligibility::display_eligible(&facts);
        Ok(ProbeOutcome::new(DomainFacts::Display(facts), eligible))
    }
}
