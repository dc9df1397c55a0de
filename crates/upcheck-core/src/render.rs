//! Render typed facts into display-ready fact records.

use crate::domain::{
    BootFacts, CpuFacts, DiskFacts, DisplayFacts, Domain, DomainFacts, FactRecord, InternetFacts,
    MemorySource, OsFacts, RamFacts,
};
use crate::eligibility;
use crate::i18n::{CommonText, DetailText, Localizer};

/// Title in the `"<icon>  <Domain> <Details>:"` layout.
pub fn title(domain: Domain, text: &dyn Localizer) -> String {
    format!(
        "{}  {} {}:",
        domain.icon(),
        text.text(domain.into()),
        text.text(CommonText::Details.into())
    )
}

/// Build the record for one domain's facts.
pub fn render(facts: &DomainFacts, text: &dyn Localizer) -> FactRecord {
    let mut record = FactRecord::new(title(facts.domain(), text));
    let lines = match facts {
        DomainFacts::Os(f) => os_lines(f, text),
        DomainFacts::Boot(f) => boot_lines(f, text),
        DomainFacts::Cpu(f) => cpu_lines(f, text),
        DomainFacts::Ram(f) => ram_lines(f, text),
        DomainFacts::Disk(f) => disk_lines(f, text),
        DomainFacts::Display(f) => display_lines(f, text),
        DomainFacts::Internet(f) => internet_lines(f, text),
    };
    for line in lines {
        record.push(line);
    }
    record
}

fn label(text: &dyn Localizer, id: DetailText) -> String {
    text.text(id.into())
}

fn common(text: &dyn Localizer, id: CommonText) -> String {
    text.text(id.into())
}

fn os_lines(f: &OsFacts, text: &dyn Localizer) -> Vec<String> {
    vec![
        format!(
            "{}: {}.{}",
            label(text, DetailText::OsVersion),
            eligibility::effective_major_version(f.major, f.build),
            f.minor
        ),
        format!(
            "{}: {}.{}",
            label(text, DetailText::OsServicePack),
            f.service_pack_major,
            f.service_pack_minor
        ),
        format!("{}: {}", label(text, DetailText::OsBuild), f.build),
        format!("{}: {}", label(text, DetailText::OsPlatformId), f.platform_id),
        format!("{}: {}", label(text, DetailText::OsProductType), f.product_type),
    ]
}

fn boot_lines(f: &BootFacts, text: &dyn Localizer) -> Vec<String> {
    let tpm_state = if f.tpm_present {
        common(text, CommonText::Enabled)
    } else {
        common(text, CommonText::Disabled)
    };
    vec![
        format!(
            "{}:\n\t\tFirmware: {}\n\t\tFlags: {}",
            label(text, DetailText::BootEnvironment),
            f.firmware.name(),
            f.boot_flags
        ),
        format!(
            "{}:\n\t\t{}: {}\n\t\t{}: {}",
            label(text, DetailText::BootSecureBoot),
            common(text, CommonText::Capable),
            f.secure_boot_capable,
            common(text, CommonText::Enabled),
            f.secure_boot_enabled
        ),
        format!(
            "{}:\n\t\t{}: {}\n\t\t{}: {}",
            label(text, DetailText::BootTpm),
            common(text, CommonText::Status),
            tpm_state,
            common(text, CommonText::Version),
            f.tpm_version
        ),
    ]
}

fn cpu_lines(f: &CpuFacts, text: &dyn Localizer) -> Vec<String> {
    let mut lines = vec![
        format!("{}:\n\t\t{}", label(text, DetailText::CpuName), f.name),
        format!(
            "{}:\n\t\tModel: {}\n\t\tStepping: {}",
            label(text, DetailText::CpuDetails),
            f.model,
            f.stepping
        ),
        format!(
            "{}:\n\t\tID: {}\n\t\tx64: {}",
            label(text, DetailText::CpuArchitecture),
            f.architecture,
            f.is_64bit
        ),
        format!(
            "{}: {}",
            label(text, DetailText::CpuActiveProcessors),
            f.active_processor_count
        ),
        format!(
            "{}: {}",
            label(text, DetailText::CpuProcessors),
            f.logical_processor_count
        ),
        format!("{}: {}", label(text, DetailText::CpuVendor), f.vendor),
        format!(
            "{}: {}",
            label(text, DetailText::CpuCoresAtSpeed),
            f.cores_at_speed
        ),
    ];

    let mut supported = format!(
        "{}: {}",
        label(text, DetailText::CpuSupported),
        f.vendor_supported
    );
    if let Some(note) = &f.vendor_note {
        supported.push_str(&format!(" ({note})"));
    }
    lines.push(supported);
    lines
}

fn ram_lines(f: &RamFacts, text: &dyn Localizer) -> Vec<String> {
    let available = f
        .available_kb
        .map_or_else(|| "-".to_string(), |kb| (kb / 1024).to_string());
    let mut line = format!(
        "{}:\n\t\tTotal: {} MB\n\t\tAvailable: {} MB",
        label(text, DetailText::RamPhysical),
        f.total_kb / 1024,
        available
    );
    if f.source == MemorySource::Installed {
        line.push_str("\n\t\tSource: installed memory");
    }
    vec![line]
}

fn disk_lines(f: &DiskFacts, text: &dyn Localizer) -> Vec<String> {
    let size = |mb: Option<u64>| mb.map_or_else(|| "-".to_string(), |mb| mb.to_string());
    f.volumes
        .iter()
        .enumerate()
        .map(|(idx, volume)| {
            format!(
                "{}: {}\n\t\tPath: {}\n\t\tDevice Name: {}\n\t\tVolume Name: {}\n\t\tFile System: {}\n\t\tPartition: {}\n\t\tFree space: {} MB\n\t\tTotal space: {} MB",
                label(text, DetailText::Disk),
                idx + 1,
                volume.path,
                volume.device_name,
                volume.volume_name,
                volume.file_system,
                volume.partition.name(),
                size(volume.free_mb()),
                size(volume.total_mb())
            )
        })
        .collect()
}

fn display_lines(f: &DisplayFacts, text: &dyn Localizer) -> Vec<String> {
    let mut lines = Vec::new();

    for (idx, device) in f.devices.iter().enumerate() {
        let inches = eligibility::diagonal_inches(
            f64::from(device.width_cm),
            f64::from(device.height_cm),
        );
        lines.push(format!(
            "{}: {}\n\t\tRegistry path: {}\n\t\tManufacturer: {}\n\t\tDisplay size: {:.2} inches",
            label(text, DetailText::DisplayDevice),
            idx + 1,
            device.registry_path,
            device.manufacturer.as_deref().unwrap_or("-"),
            inches
        ));
    }

    for (idx, adapter) in f.adapters.iter().enumerate() {
        lines.push(format!(
            "{}:\n\t\tDevice index: {}\n\t\tDescription: {}\n\t\tModel: {}",
            label(text, DetailText::DisplayAdapter),
            idx + 1,
            adapter.description,
            adapter.driver_model
        ));
    }

    lines.push(format!(
        "{}:\n\t\t{}: {}.{}",
        label(text, DetailText::DirectX),
        common(text, CommonText::Version),
        f.directx.major,
        f.directx.minor
    ));

    lines.extend(f.monitor_log.iter().cloned());
    lines
}

fn internet_lines(f: &InternetFacts, text: &dyn Localizer) -> Vec<String> {
    vec![format!(
        "{}: {}\n\t{}: {}",
        label(text, DetailText::NetworkState),
        f.connected,
        label(text, DetailText::InternetState),
        u8::from(f.can_connect)
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AdapterFacts, DirectXVersion, DisplayDeviceFacts, FirmwareType, MonitorFacts,
        PartitionStyle, VolumeFacts,
    };
    use crate::i18n::Catalog;

    fn english() -> Catalog {
        Catalog::english()
    }

    #[test]
    fn test_title_layout_keeps_icon_prefix() {
        let record = render(&DomainFacts::Internet(InternetFacts::default()), &english());
        assert_eq!(record.title, "\u{f1eb}  Internet Details:");
        assert_eq!(record.title_without_icon(), "Internet Details:");
    }

    #[test]
    fn test_os_reports_effective_major_version() {
        let facts = OsFacts {
            major: 10,
            minor: 0,
            build: 22631,
            platform_id: 2,
            product_type: 0x30,
            ..Default::default()
        };
        let record = render(&DomainFacts::Os(facts), &english());
        assert_eq!(record.details.len(), 5);
        assert_eq!(record.details[0], "OS version: 11.0");
        assert_eq!(record.details[2], "Build number: 22631");
        assert_eq!(record.details[4], "Product type: 48");
    }

    #[test]
    fn test_boot_lines() {
        let facts = BootFacts {
            firmware: FirmwareType::Uefi,
            boot_flags: 3,
            secure_boot_capable: true,
            secure_boot_enabled: false,
            tpm_present: true,
            tpm_version: 2,
        };
        let record = render(&DomainFacts::Boot(facts), &english());
        assert_eq!(
            record.details[0],
            "Boot environment:\n\t\tFirmware: UEFI\n\t\tFlags: 3"
        );
        assert_eq!(
            record.details[1],
            "Secure boot:\n\t\tCapable: true\n\t\tEnabled: false"
        );
        assert_eq!(record.details[2], "TPM:\n\t\tStatus: Enabled\n\t\tVersion: 2");
    }

    #[test]
    fn test_cpu_lines_include_vendor_note() {
        let facts = CpuFacts {
            name: "Intel(R) Core(TM) i5".into(),
            vendor: "GenuineIntel".into(),
            vendor_supported: false,
            vendor_note: Some("Unsupported Intel CPU detected!".into()),
            ..Default::default()
        };
        let record = render(&DomainFacts::Cpu(facts), &english());
        assert_eq!(record.details.len(), 8);
        assert_eq!(record.details[0], "Processor name:\n\t\tIntel(R) Core(TM) i5");
        assert_eq!(
            record.details[7],
            "Supported processor: false (Unsupported Intel CPU detected!)"
        );
    }

    #[test]
    fn test_ram_marks_fallback_source() {
        let facts = RamFacts {
            total_kb: 8 * 1024 * 1024,
            available_kb: None,
            source: MemorySource::Installed,
        };
        let record = render(&DomainFacts::Ram(facts), &english());
        assert_eq!(
            record.details[0],
            "Physical memory:\n\t\tTotal: 8192 MB\n\t\tAvailable: - MB\n\t\tSource: installed memory"
        );
    }

    #[test]
    fn test_disk_one_line_per_volume() {
        let volume = VolumeFacts {
            path: "C:\\".into(),
            device_name: "\\Device\\HarddiskVolume3".into(),
            volume_name: "\\\\?\\Volume{1234}".into(),
            file_system: "NTFS".into(),
            partition: PartitionStyle::Gpt,
            free_bytes: Some(70_000 * 1024 * 1024),
            total_bytes: Some(250_000 * 1024 * 1024),
        };
        let facts = DiskFacts {
            volumes: vec![volume.clone(), volume],
        };
        let record = render(&DomainFacts::Disk(facts), &english());
        assert_eq!(record.details.len(), 2);
        assert!(record.details[1].starts_with("Disk: 2\n\t\tPath: C:\\"));
        assert!(record.details[0].contains("Partition: GPT"));
        assert!(record.details[0].contains("Free space: 70000 MB"));
        assert!(record.details[0].contains("Total space: 250000 MB"));
    }

    #[test]
    fn test_display_folds_monitor_log_last() {
        let monitor = MonitorFacts {
            index: 1,
            primary: true,
            color_depth: 32,
            right: 1920,
            bottom: 1080,
            ..Default::default()
        };
        let facts = DisplayFacts {
            monitor_log: vec![monitor.log_line()],
            monitors: vec![monitor],
            devices: vec![DisplayDeviceFacts {
                registry_path: "DISPLAY\\DEL40B5".into(),
                manufacturer: Some("DEL40B5".into()),
                width_cm: 30,
                height_cm: 40,
            }],
            adapters: vec![AdapterFacts {
                description: "GPU".into(),
                driver_model: "WDDM 3.1".into(),
            }],
            directx: DirectXVersion { major: 12, minor: 0 },
        };
        let record = render(&DomainFacts::Display(facts), &english());
        assert_eq!(record.details.len(), 4);
        assert!(record.details[0].ends_with("Display size: 19.69 inches"));
        assert!(record.details[1].contains("Model: WDDM 3.1"));
        assert_eq!(record.details[2], "DirectX:\n\t\tVersion: 12.0");
        assert!(record.details[3].starts_with("Monitor: 1"));
    }

    #[test]
    fn test_internet_line() {
        let facts = InternetFacts {
            connected: true,
            connection_flags: 0x12,
            can_connect: false,
        };
        let record = render(&DomainFacts::Internet(facts), &english());
        assert_eq!(record.details, vec!["Network state: true\n\tInternet state: 0"]);
    }
}
