//! Per-domain eligibility predicates.
//!
//! Pure functions over the typed facts. Probes call these to turn what they
//! measured into an Ok/Fail verdict; nothing in here touches the OS.

use crate::domain::{
    BootFacts, CpuFacts, DiskFacts, DisplayFacts, FirmwareType, InternetFacts, MonitorFacts,
    OsFacts, RamFacts, STATUS_SLOTS,
};

/// `PRODUCT_CLOUD` and `PRODUCT_CLOUDN` SKUs.
pub const CLOUD_PRODUCT_TYPES: [u32; 2] = [0xB2, 0xB3];

/// First build number that reports itself as major version 11.
pub const WINDOWS_11_FIRST_BUILD: u32 = 21_996;

pub const PROCESSOR_ARCHITECTURE_IA64: u16 = 6;
pub const PROCESSOR_ARCHITECTURE_AMD64: u16 = 9;
pub const PROCESSOR_ARCHITECTURE_ARM64: u16 = 12;

pub const MIN_LOGICAL_PROCESSORS: u32 = 2;
pub const MIN_CORE_MHZ: u32 = 1000;
pub const MIN_CORES_AT_SPEED: u32 = 2;

pub const MIN_RAM_KB: u64 = 4_096_000;

pub const MIN_FREE_DISK_MB: u64 = 64_000;

/// Mount paths this long or longer are sandbox/container volumes.
pub const MAX_VOLUME_PATH_LEN: usize = 5;

pub const MIN_MONITOR_HEIGHT: i32 = 720;
pub const MIN_COLOR_DEPTH: u32 = 8;
pub const MIN_DIAGONAL_INCHES: f64 = 9.0;
pub const CM_TO_INCH: f64 = 0.393_700_787;
pub const MIN_DIRECTX_MAJOR: u32 = 12;
pub const SUPPORTED_WDDM_MARKERS: [&str; 2] = ["WDDM 2", "WDDM 3"];

/// Major version as reported to the user; late Windows 10 kernels are 11.
pub const fn effective_major_version(major: u32, build: u32) -> u32 {
    if build >= WINDOWS_11_FIRST_BUILD {
        11
    } else {
        major
    }
}

pub fn os_eligible(facts: &OsFacts) -> bool {
    !CLOUD_PRODUCT_TYPES.contains(&facts.product_type)
}

pub fn boot_eligible(facts: &BootFacts) -> bool {
    facts.firmware == FirmwareType::Uefi
        && facts.secure_boot_capable
        && facts.tpm_present
        && facts.tpm_version == 2
}

pub const fn is_64bit_architecture(architecture: u16) -> bool {
    matches!(
        architecture,
        PROCESSOR_ARCHITECTURE_AMD64 | PROCESSOR_ARCHITECTURE_IA64 | PROCESSOR_ARCHITECTURE_ARM64
    )
}

/// Number of logical processors clocked at or above [`MIN_CORE_MHZ`].
pub fn cores_at_speed(max_mhz: &[u32]) -> u32 {
    let count = max_mhz.iter().filter(|mhz| **mhz >= MIN_CORE_MHZ).count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Inputs of the vendor allow-list check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CpuIdentity {
    pub vendor: String,
    pub family: u16,
    pub model: u16,
    pub stepping: u8,
    pub platform_specific_field: u32,
    pub arm_atomics: bool,
    pub atomic_register: Option<u64>,
}

/// Outcome of the vendor allow-list check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorSupport {
    Supported,
    Unsupported(String),
}

impl VendorSupport {
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Supported)
    }

    pub fn into_note(self) -> Option<String> {
        match self {
            Self::Supported => None,
            Self::Unsupported(reason) => Some(reason),
        }
    }
}

/// Vendor allow-list, reproduced from the checks of the vendor's own tool.
pub fn vendor_support(cpu: &CpuIdentity) -> VendorSupport {
    match cpu.vendor.as_str() {
        "AuthenticAMD" => amd_support(cpu),
        "GenuineIntel" => intel_support(cpu),
        vendor if vendor.contains("Qualcomm") => qualcomm_support(cpu),
        _ => VendorSupport::Unsupported("Unknown CPU vendor detected!".to_string()),
    }
}

fn amd_support(cpu: &CpuIdentity) -> VendorSupport {
    // Family 17h models 01h and 11h (first generation Zen parts).
    let early_zen = cpu.family == 0x17 && (u32::from(cpu.model).wrapping_sub(1) & 0xFFFF_FFEF) == 0;
    if cpu.family < 0x17 || early_zen {
        VendorSupport::Unsupported("Unsupported AMD CPU detected!".to_string())
    } else {
        VendorSupport::Supported
    }
}

fn intel_support(cpu: &CpuIdentity) -> VendorSupport {
    if cpu.family != 6 {
        return VendorSupport::Supported;
    }

    let mut supported = true;
    if cpu.model > 0x5F {
        if cpu.model == 142 && (cpu.stepping != 9 || cpu.platform_specific_field != 16) {
            supported = false;
        }
        if cpu.model != 158 || cpu.stepping != 9 || cpu.platform_specific_field == 8 {
            supported = false;
        }
    }
    if cpu.model != 85 {
        supported = false;
    }

    if supported {
        VendorSupport::Supported
    } else {
        VendorSupport::Unsupported("Unsupported Intel CPU detected!".to_string())
    }
}

fn qualcomm_support(cpu: &CpuIdentity) -> VendorSupport {
    if !cpu.arm_atomics {
        return VendorSupport::Unsupported("Unsupported Qualcomm CPU detected!".to_string());
    }
    let Some(register) = cpu.atomic_register else {
        return VendorSupport::Unsupported("Atomic support registry read failed".to_string());
    };
    let atomics = (register >> 20) & 0xF;
    if atomics < 2 {
        return VendorSupport::Unsupported(format!(
            "Qualcomm CPU family check failed, atomicsResult: {atomics}"
        ));
    }
    VendorSupport::Supported
}

pub fn cpu_eligible(facts: &CpuFacts) -> bool {
    facts.is_64bit
        && facts.logical_processor_count >= MIN_LOGICAL_PROCESSORS
        && facts.cores_at_speed >= MIN_CORES_AT_SPEED
        && facts.vendor_supported
}

pub const fn ram_eligible(facts: &RamFacts) -> bool {
    facts.total_kb >= MIN_RAM_KB
}

/// Drive-letter style mount paths only (`C:\`).
pub fn is_accessible_volume_path(path: &str) -> bool {
    !path.is_empty() && path.len() < MAX_VOLUME_PATH_LEN
}

pub fn disk_eligible(facts: &DiskFacts) -> bool {
    facts
        .volumes
        .iter()
        .filter_map(crate::domain::VolumeFacts::free_mb)
        .any(|mb| mb > MIN_FREE_DISK_MB)
}

pub const fn monitor_qualifies(monitor: &MonitorFacts) -> bool {
    monitor.height() >= MIN_MONITOR_HEIGHT && monitor.color_depth >= MIN_COLOR_DEPTH
}

/// Physical diagonal in inches from EDID width/height in centimetres.
pub fn diagonal_inches(width: f64, height: f64) -> f64 {
    width.hypot(height) * CM_TO_INCH
}

pub fn wddm_supported(driver_model: &str) -> bool {
    SUPPORTED_WDDM_MARKERS
        .iter()
        .any(|marker| driver_model.contains(marker))
}

pub fn display_eligible(facts: &DisplayFacts) -> bool {
    let has_monitor = facts.monitors.iter().any(monitor_qualifies);
    let has_large_display = facts.devices.iter().any(|device| {
        diagonal_inches(f64::from(device.width_cm), f64::from(device.height_cm))
            >= MIN_DIAGONAL_INCHES
    });
    let has_wddm = facts
        .adapters
        .iter()
        .any(|adapter| wddm_supported(&adapter.driver_model));

    has_monitor && has_large_display && facts.directx.major >= MIN_DIRECTX_MAJOR && has_wddm
}

pub const fn internet_eligible(facts: &InternetFacts) -> bool {
    facts.connected && facts.can_connect
}

/// Overall go/no-go from the number of domains reporting Ok.
///
/// The denominator excludes the sentinel slot and the Summary pseudo-domain.
pub const fn is_upgradable(ok_count: usize) -> bool {
    ok_count == STATUS_SLOTS - 2
}
