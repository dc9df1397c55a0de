//! Typed fact records produced by the probes.
//!
//! These hold raw values only. Rendering into localized detail lines
//! happens in [`crate::render`].

use serde::{Deserialize, Serialize};

use super::Domain;

/// Operating system version and edition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsFacts {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub service_pack_major: u16,
    pub service_pack_minor: u16,
    pub platform_id: u32,
    /// `GetProductInfo` SKU identifier.
    pub product_type: u32,
}

/// Firmware interface reported by the boot environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirmwareType {
    Bios,
    Uefi,
    Unknown(u32),
}

impl FirmwareType {
    /// Map the raw `FIRMWARE_TYPE` value.
    pub const fn from_raw(value: u32) -> Self {
        match value {
            1 => Self::Bios,
            2 => Self::Uefi,
            other => Self::Unknown(other),
        }
    }

    pub fn name(self) -> String {
        match self {
            Self::Bios => "Legacy/Bios".to_string(),
            Self::Uefi => "UEFI".to_string(),
            Self::Unknown(raw) => format!("Unknown: {raw}"),
        }
    }
}

/// Firmware, secure boot and TPM state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootFacts {
    pub firmware: FirmwareType,
    pub boot_flags: u64,
    pub secure_boot_capable: bool,
    pub secure_boot_enabled: bool,
    pub tpm_present: bool,
    /// TPM major version, 0 when no TPM is present.
    pub tpm_version: u32,
}

/// Processor identity, topology and allow-list verdict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuFacts {
    pub name: String,
    pub vendor: String,
    /// Processor level (family).
    pub family: u16,
    pub model: u16,
    pub stepping: u8,
    /// Raw `PROCESSOR_ARCHITECTURE_*` id.
    pub architecture: u16,
    pub is_64bit: bool,
    pub active_processor_count: u32,
    pub logical_processor_count: u32,
    /// Logical processors whose max clock is at least 1000 MHz.
    pub cores_at_speed: u32,
    pub vendor_supported: bool,
    /// Why the vendor allow-list rejected the processor.
    pub vendor_note: Option<String>,
}

/// Where the total memory figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemorySource {
    /// Live memory status query.
    Status,
    /// Installed-memory estimate used when the status query failed.
    Installed,
}

/// Physical memory in kilobytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RamFacts {
    pub total_kb: u64,
    pub available_kb: Option<u64>,
    pub source: MemorySource,
}

/// Partition table style of the disk backing a volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionStyle {
    Mbr,
    Gpt,
    Raw,
    Unknown,
}

impl PartitionStyle {
    /// Map the raw `PARTITION_STYLE` value; anything else is `Unknown`.
    pub const fn from_raw(value: i64) -> Self {
        match value {
            0 => Self::Mbr,
            1 => Self::Gpt,
            2 => Self::Raw,
            _ => Self::Unknown,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Mbr => "MBR",
            Self::Gpt => "GPT",
            Self::Raw => "RAW",
            Self::Unknown => "Unknown",
        }
    }
}

/// One mounted volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeFacts {
    /// Mount path, e.g. `C:\`.
    pub path: String,
    pub device_name: String,
    /// Volume GUID path without the trailing backslash.
    pub volume_name: String,
    pub file_system: String,
    pub partition: PartitionStyle,
    /// `None` when the space query failed for this volume.
    pub free_bytes: Option<u64>,
    pub total_bytes: Option<u64>,
}

impl VolumeFacts {
    pub fn free_mb(&self) -> Option<u64> {
        self.free_bytes.map(|b| b / 1024 / 1024)
    }

    pub fn total_mb(&self) -> Option<u64> {
        self.total_bytes.map(|b| b / 1024 / 1024)
    }
}

/// All accessible volumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskFacts {
    pub volumes: Vec<VolumeFacts>,
}

/// One enumerated monitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorFacts {
    /// 1-based enumeration index.
    pub index: u32,
    pub device_id: String,
    pub device_name: String,
    pub device_string: String,
    pub primary: bool,
    /// Colour depth reported for the monitor's device context.
    pub color_depth: u32,
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl MonitorFacts {
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Line appended to the monitor info log.
    pub fn log_line(&self) -> String {
        format!(
            "Monitor: {}\n\t\tID: {}\n\t\tName: {} - {}\n\t\tPrimary: {}\n\t\tBPC: {}\n\t\tResolution: {}x{}",
            self.index,
            self.device_id,
            self.device_name,
            self.device_string,
            self.primary,
            self.color_depth,
            self.width(),
            self.height()
        )
    }
}

/// Display device found in the registry with its EDID size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayDeviceFacts {
    pub registry_path: String,
    /// Three-letter PNP manufacturer id decoded from the EDID.
    pub manufacturer: Option<String>,
    /// EDID maximum horizontal image size (cm).
    pub width_cm: u8,
    /// EDID maximum vertical image size (cm).
    pub height_cm: u8,
}

/// Graphics adapter and its driver model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterFacts {
    pub description: String,
    /// e.g. `"WDDM 2.7"`.
    pub driver_model: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectXVersion {
    pub major: u32,
    pub minor: u32,
}

/// Monitors, physical displays, adapters and DirectX runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayFacts {
    pub monitors: Vec<MonitorFacts>,
    pub devices: Vec<DisplayDeviceFacts>,
    pub adapters: Vec<AdapterFacts>,
    pub directx: DirectXVersion,
    /// Snapshot of the monitor info log taken when the probe finished.
    pub monitor_log: Vec<String>,
}

/// Connectivity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternetFacts {
    pub connected: bool,
    pub connection_flags: u32,
    pub can_connect: bool,
}

/// Facts for any probed domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum DomainFacts {
    Os(OsFacts),
    Boot(BootFacts),
    Cpu(CpuFacts),
    Ram(RamFacts),
    Disk(DiskFacts),
    Display(DisplayFacts),
    Internet(InternetFacts),
}

impl DomainFacts {
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Os(_) => Domain::Os,
            Self::Boot(_) => Domain::Boot,
            Self::Cpu(_) => Domain::Cpu,
            Self::Ram(_) => Domain::Ram,
            Self::Disk(_) => Domain::Disk,
            Self::Display(_) => Domain::Display,
            Self::Internet(_) => Domain::Internet,
        }
    }
}
