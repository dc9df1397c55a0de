//! Physical memory.

use sysinfo::System;
use tracing::warn;
use upcheck_core::{MemoryStatus, ProbeResult};
use windows::Win32::System::SystemInformation::{
    GetPhysicallyInstalledSystemMemory, GlobalMemoryStatusEx, MEMORYSTATUSEX,
};

use super::{os_error, struct_size};

pub(super) fn status() -> ProbeResult<MemoryStatus> {
    let mut info = MEMORYSTATUSEX {
        dwLength: struct_size::<MEMORYSTATUSEX>(),
        ..Default::default()
    };
    unsafe { GlobalMemoryStatusEx(&mut info) }
        .map_err(|e| os_error("GlobalMemoryStatusEx", &e))?;

    Ok(MemoryStatus {
        total_bytes: info.ullTotalPhys,
        available_bytes: info.ullAvailPhys,
    })
}

/// Installed memory in KB.
///
/// SMBIOS tables can be missing on virtual machines; the OS-visible total
/// from `sysinfo` is used then.
pub(super) fn installed_kb() -> ProbeResult<u64> {
    let mut kilobytes = 0u64;
    match unsafe { GetPhysicallyInstalledSystemMemory(&mut kilobytes) } {
        Ok(()) => Ok(kilobytes),
        Err(e) => {
            let mut system = System::new();
            system.refresh_memory();
            match system.total_memory() {
                0 => Err(os_error("GetPhysicallyInstalledSystemMemory", &e)),
                bytes => {
                    warn!(error = %e, "Installed memory unavailable, using visible total");
                    Ok(bytes / 1024)
                }
            }
        }
    }
}
