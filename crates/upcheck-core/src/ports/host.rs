//! Host platform port for hardware, firmware and OS queries.
//!
//! This port abstracts every OS interface the probes touch. The core domain
//! owns the trait and the raw types; implementations live in adapters
//! (e.g., `upcheck-runtime`).
//!
//! # Design Notes
//!
//! - One method per OS interface, returning raw values only
//! - Decisions (predicates, filtering, EDID decoding) stay in core
//! - `Err` means the interface could not be reached at all
//! - Absence (no TPM, no registry key, offline) comes back as `Option`/`bool`

use crate::domain::{AdapterFacts, DirectXVersion, MonitorFacts, VolumeFacts};
use crate::error::ProbeResult;

/// Result of the OS version query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OsVersion {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
    pub platform_id: u32,
}

/// Raw boot environment information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootEnvironment {
    /// Raw `FIRMWARE_TYPE`.
    pub firmware_type: u32,
    pub boot_flags: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecureBootState {
    pub capable: bool,
    pub enabled: bool,
}

/// TPM device information; `present == false` when no TPM was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TpmInfo {
    pub present: bool,
    pub version: u32,
}

/// Native system information relevant to the CPU check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTopology {
    /// Raw `PROCESSOR_ARCHITECTURE_*` id.
    pub architecture: u16,
    /// Processor level (family).
    pub level: u16,
    /// Processor revision: model in the high byte, stepping in the low byte.
    pub revision: u16,
    pub logical_processors: u32,
}

/// Values read from the first central processor's registry key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessorRegistry {
    pub name: String,
    pub platform_specific_field: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStatus {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// Raw EDID block read from a display device's registry parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdidBlob {
    pub registry_path: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InternetState {
    pub connected: bool,
    pub flags: u32,
}

/// Port for querying the host.
///
/// All methods block; they are only ever called from the collection worker.
#[cfg_attr(test, mockall::automock)]
pub trait HostPlatform: Send + Sync {
    /// Kernel-reported OS version (not subject to manifest shims).
    fn os_version(&self) -> ProbeResult<OsVersion>;

    /// Product type (SKU) for the given OS version.
    fn product_type(&self, major: u32, minor: u32) -> ProbeResult<u32>;

    fn boot_environment(&self) -> ProbeResult<BootEnvironment>;

    fn secure_boot(&self) -> ProbeResult<SecureBootState>;

    /// TPM presence and version. A missing TPM is `Ok` with `present == false`.
    fn tpm(&self) -> ProbeResult<TpmInfo>;

    /// Active processors across all processor groups.
    fn active_processor_count(&self) -> ProbeResult<u32>;

    fn cpu_topology(&self) -> ProbeResult<CpuTopology>;

    /// CPU vendor id string, e.g. `"GenuineIntel"`.
    fn cpu_vendor(&self) -> ProbeResult<String>;

    /// Processor name and platform field.
    ///
    /// `Ok(None)` when the processor key does not exist; `Err` when the key
    /// exists but the platform field cannot be read.
    fn processor_registry(&self) -> ProbeResult<Option<ProcessorRegistry>>;

    /// Maximum clock (MHz) per logical processor.
    fn processor_max_mhz(&self, processors: u32) -> ProbeResult<Vec<u32>>;

    /// ARMv8.1 atomic instructions available.
    fn arm_atomics_present(&self) -> bool;

    /// Raw atomic support register, `None` if it could not be read.
    fn atomic_support_register(&self) -> Option<u64>;

    fn memory_status(&self) -> ProbeResult<MemoryStatus>;

    /// Installed physical memory in KB, used when `memory_status` fails.
    fn installed_memory_kb(&self) -> ProbeResult<u64>;

    /// Every volume with a mount path, unfiltered.
    fn volumes(&self) -> ProbeResult<Vec<VolumeFacts>>;

    /// Every attached monitor, in enumeration order.
    fn monitors(&self) -> ProbeResult<Vec<MonitorFacts>>;

    /// EDID blocks of registry-enumerated display devices.
    ///
    /// An absent display registry key yields an empty list.
    fn display_edids(&self) -> ProbeResult<Vec<EdidBlob>>;

    fn graphics_adapters(&self) -> ProbeResult<Vec<AdapterFacts>>;

    fn directx_version(&self) -> ProbeResult<DirectXVersion>;

    fn internet_connected(&self) -> InternetState;

    fn internet_attempt_connect(&self) -> bool;
}
