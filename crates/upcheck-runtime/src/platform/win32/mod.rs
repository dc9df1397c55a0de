//! Windows implementation of [`HostPlatform`].
//!
//! Each submodule wraps one family of OS interfaces and returns the raw
//! port types; eligibility decisions stay in `upcheck-core`.
#![allow(unsafe_code)]

mod display;
mod internet;
mod memory;
mod processor;
mod registry;
mod storage;
mod system;

use upcheck_core::{
    AdapterFacts, BootEnvironment, CpuTopology, DirectXVersion, EdidBlob, HostPlatform,
    InternetState, MemoryStatus, MonitorFacts, OsVersion, ProbeError, ProbeResult,
    ProcessorRegistry, SecureBootState, TpmInfo, VolumeFacts,
};

/// `HostPlatform` backed by Win32, NT and DXGI calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub const fn new() -> Self {
        Self
    }
}

impl HostPlatform for WindowsPlatform {
    fn os_version(&self) -> ProbeResult<OsVersion> {
        system::os_version()
    }

    fn product_type(&self, major: u32, minor: u32) -> ProbeResult<u32> {
        system::product_type(major, minor)
    }

    fn boot_environment(&self) -> ProbeResult<BootEnvironment> {
        system::boot_environment()
    }

    fn secure_boot(&self) -> ProbeResult<SecureBootState> {
        system::secure_boot()
    }

    fn tpm(&self) -> ProbeResult<TpmInfo> {
        system::tpm()
    }

    fn active_processor_count(&self) -> ProbeResult<u32> {
        Ok(processor::active_processor_count())
    }

    fn cpu_topology(&self) -> ProbeResult<CpuTopology> {
        Ok(processor::topology())
    }

    fn cpu_vendor(&self) -> ProbeResult<String> {
        processor::vendor()
    }

    fn processor_registry(&self) -> ProbeResult<Option<ProcessorRegistry>> {
        processor::registry_values()
    }

    fn processor_max_mhz(&self, processors: u32) -> ProbeResult<Vec<u32>> {
        processor::max_mhz(processors)
    }

    fn arm_atomics_present(&self) -> bool {
        processor::arm_atomics_present()
    }

    fn atomic_support_register(&self) -> Option<u64> {
        processor::atomic_support_register()
    }

    fn memory_status(&self) -> ProbeResult<MemoryStatus> {
        memory::status()
    }

    fn installed_memory_kb(&self) -> ProbeResult<u64> {
        memory::installed_kb()
    }

    fn volumes(&self) -> ProbeResult<Vec<VolumeFacts>> {
        storage::volumes()
    }

    fn monitors(&self) -> ProbeResult<Vec<MonitorFacts>> {
        display::monitors()
    }

    fn display_edids(&self) -> ProbeResult<Vec<EdidBlob>> {
        display::edids()
    }

    fn graphics_adapters(&self) -> ProbeResult<Vec<AdapterFacts>> {
        display::adapters()
    }

    fn directx_version(&self) -> ProbeResult<DirectXVersion> {
        display::directx_version()
    }

    fn internet_connected(&self) -> InternetState {
        internet::connected_state()
    }

    fn internet_attempt_connect(&self) -> bool {
        internet::attempt_connect()
    }
}

/// String from a NUL-terminated UTF-16 buffer.
fn from_wide(buffer: &[u16]) -> String {
    let len = buffer.iter().position(|&c| c == 0).unwrap_or(buffer.len());
    String::from_utf16_lossy(&buffer[..len])
}

/// `size_of::<T>()` as the `u32` the Win32 structs expect.
fn struct_size<T>() -> u32 {
    u32::try_from(size_of::<T>()).unwrap_or(u32::MAX)
}

/// Map a `windows` error to a probe error, keeping the HRESULT.
fn os_error(operation: &str, error: &windows::core::Error) -> ProbeError {
    ProbeError::unavailable(operation, error.code().0)
}
