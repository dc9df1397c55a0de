//! Adapter for hosts without the Windows interfaces.

use sysinfo::System;
use upcheck_core::{
    AdapterFacts, BootEnvironment, CpuTopology, DirectXVersion, EdidBlob, HostPlatform,
    InternetState, MemoryStatus, MonitorFacts, OsVersion, ProbeError, ProbeResult,
    ProcessorRegistry, SecureBootState, TpmInfo, VolumeFacts,
};

/// Status reported for every interface this host does not provide
/// (`STATUS_NOT_IMPLEMENTED`).
pub const NOT_IMPLEMENTED: i64 = 0xC000_0002;

fn unavailable<T>(operation: &str) -> ProbeResult<T> {
    Err(ProbeError::unavailable(operation, NOT_IMPLEMENTED))
}

/// `HostPlatform` for non-Windows targets.
///
/// Memory figures come from `sysinfo`; everything else is unavailable, so a
/// collection run stops at the OS probe.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedPlatform;

impl UnsupportedPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl HostPlatform for UnsupportedPlatform {
    fn os_version(&self) -> ProbeResult<OsVersion> {
        unavailable("RtlGetVersion")
    }

    fn product_type(&self, _major: u32, _minor: u32) -> ProbeResult<u32> {
        unavailable("GetProductInfo")
    }

    fn boot_environment(&self) -> ProbeResult<BootEnvironment> {
        unavailable("NtQuerySystemInformation(SystemBootEnvironmentInformation)")
    }

    fn secure_boot(&self) -> ProbeResult<SecureBootState> {
        unavailable("NtQuerySystemInformation(SystemSecureBootInformation)")
    }

    fn tpm(&self) -> ProbeResult<TpmInfo> {
        unavailable("Tbsi_GetDeviceInfo")
    }

    fn active_processor_count(&self) -> ProbeResult<u32> {
        unavailable("GetActiveProcessorCount")
    }

    fn cpu_topology(&self) -> ProbeResult<CpuTopology> {
        unavailable("GetNativeSystemInfo")
    }

    fn cpu_vendor(&self) -> ProbeResult<String> {
        unavailable("VendorIdentifier")
    }

    fn processor_registry(&self) -> ProbeResult<Option<ProcessorRegistry>> {
        Ok(None)
    }

    fn processor_max_mhz(&self, _processors: u32) -> ProbeResult<Vec<u32>> {
        unavailable("CallNtPowerInformation(ProcessorInformation)")
    }

    fn arm_atomics_present(&self) -> bool {
        false
    }

    fn atomic_support_register(&self) -> Option<u64> {
        None
    }

    fn memory_status(&self) -> ProbeResult<MemoryStatus> {
        let mut system = System::new();
        system.refresh_memory();
        let total_bytes = system.total_memory();
        if total_bytes == 0 {
            return unavailable("GlobalMemoryStatusEx");
        }
        Ok(MemoryStatus {
            total_bytes,
            available_bytes: system.available_memory(),
        })
    }

    fn installed_memory_kb(&self) -> ProbeResult<u64> {
        let mut system = System::new();
        system.refresh_memory();
        match system.total_memory() {
            0 => unavailable("GetPhysicallyInstalledSystemMemory"),
            bytes => Ok(bytes / 1024),
        }
    }

    fn volumes(&self) -> ProbeResult<Vec<VolumeFacts>> {
        unavailable("FindFirstVolumeW")
    }

    fn monitors(&self) -> ProbeResult<Vec<MonitorFacts>> {
        unavailable("EnumDisplayMonitors")
    }

    fn display_edids(&self) -> ProbeResult<Vec<EdidBlob>> {
        Ok(Vec::new())
    }

    fn graphics_adapters(&self) -> ProbeResult<Vec<AdapterFacts>> {
        unavailable("CreateDXGIFactory1")
    }

    fn directx_version(&self) -> ProbeResult<DirectXVersion> {
        unavailable("D3D12CreateDevice")
    }

    fn internet_connected(&self) -> InternetState {
        InternetState::default()
    }

    fn internet_attempt_connect(&self) -> bool {
        false
    }
}
