//! Processor topology, identity and clocks.

use std::ffi::c_void;

use tracing::debug;
use upcheck_core::{CpuTopology, ProbeError, ProbeResult, ProcessorRegistry};
use windows::Win32::System::Power::{
    CallNtPowerInformation, PROCESSOR_POWER_INFORMATION, ProcessorInformation,
};
use windows::Win32::System::SystemInformation::{GetNativeSystemInfo, SYSTEM_INFO};
use windows::Win32::System::Threading::{
    ALL_PROCESSOR_GROUPS, GetActiveProcessorCount, IsProcessorFeaturePresent,
    PF_ARM_V81_ATOMIC_INSTRUCTIONS_AVAILABLE,
};

use super::registry::{RegKey, registry_error};
use super::struct_size;

const CENTRAL_PROCESSOR_KEY: &str = "HARDWARE\\DESCRIPTION\\System\\CentralProcessor\\0";

pub(super) fn active_processor_count() -> u32 {
    unsafe { GetActiveProcessorCount(ALL_PROCESSOR_GROUPS) }
}

pub(super) fn topology() -> CpuTopology {
    let mut info = SYSTEM_INFO::default();
    unsafe { GetNativeSystemInfo(&mut info) };
    let architecture = unsafe { info.Anonymous.Anonymous.wProcessorArchitecture.0 };
    CpuTopology {
        architecture,
        level: info.wProcessorLevel,
        revision: info.wProcessorRevision,
        logical_processors: info.dwNumberOfProcessors,
    }
}

/// Vendor id string, e.g. `GenuineIntel` or `Qualcomm Technologies Inc`.
pub(super) fn vendor() -> ProbeResult<String> {
    let key = RegKey::open(CENTRAL_PROCESSOR_KEY)
        .map_err(|status| registry_error("RegOpenKeyExW(CentralProcessor)", status))?;
    key.string("VendorIdentifier")
        .map_err(|status| registry_error("RegGetValueW(VendorIdentifier)", status))
}

pub(super) fn registry_values() -> ProbeResult<Option<ProcessorRegistry>> {
    let Ok(key) = RegKey::open(CENTRAL_PROCESSOR_KEY) else {
        return Ok(None);
    };

    let name = key.string("ProcessorNameString").unwrap_or_default();
    let platform_specific_field = key
        .dword("Platform Specific Field 1")
        .map_err(|status| registry_error("RegGetValueW(Platform Specific Field 1)", status))?;

    Ok(Some(ProcessorRegistry {
        name: name.trim().to_string(),
        platform_specific_field,
    }))
}

pub(super) fn max_mhz(processors: u32) -> ProbeResult<Vec<u32>> {
    let mut buffer = vec![PROCESSOR_POWER_INFORMATION::default(); processors as usize];
    let size = struct_size::<PROCESSOR_POWER_INFORMATION>().saturating_mul(processors);
    let status = unsafe {
        CallNtPowerInformation(
            ProcessorInformation,
            None,
            0,
            Some(buffer.as_mut_ptr().cast::<c_void>()),
            size,
        )
    };
    if status.is_err() {
        return Err(ProbeError::unavailable(
            "CallNtPowerInformation(ProcessorInformation)",
            status.0,
        ));
    }

    Ok(buffer.iter().map(|info| info.MaxMhz).collect())
}

pub(super) fn arm_atomics_present() -> bool {
    unsafe { IsProcessorFeaturePresent(PF_ARM_V81_ATOMIC_INSTRUCTIONS_AVAILABLE) }.as_bool()
}

/// `ID_AA64ISAR0_EL1` as mirrored under the processor key (`CP 4030`).
pub(super) fn atomic_support_register() -> Option<u64> {
    let key = RegKey::open(CENTRAL_PROCESSOR_KEY).ok()?;
    match key.qword("CP 4030") {
        Ok(value) => Some(value),
        Err(status) => {
            debug!(status = status.0, "CP 4030 is not readable");
            None
        }
    }
}
