//! Eligibility engine for the upcheck upgrade checker.
//!
//! Probes gather typed facts about the host through the
//! [`HostPlatform`](ports::HostPlatform) port, decide a per-domain verdict and
//! publish both into the shared [`EligibilityStore`]. The [`Collector`] runs
//! them on a background worker; the [`ResultExporter`] writes the JSON report.
#![deny(unused_crate_dependencies)]

pub mod collector;
pub mod domain;
pub mod edid;
pub mod eligibility;
pub mod error;
pub mod export;
pub mod i18n;
pub mod ports;
pub mod probes;
pub mod render;
pub mod settings;
pub mod store;

// Re-export commonly used types for convenience
pub use collector::{CollectionState, Collector, WORKER_THREAD_NAME};
pub use domain::{
    AdapterFacts, BootFacts, CpuFacts, DirectXVersion, DiskFacts, DisplayDeviceFacts,
    DisplayFacts, Domain, DomainFacts, FactRecord, FirmwareType, InternetFacts, MemorySource,
    MonitorFacts, OsFacts, PartitionStyle, RamFacts, STATUS_SLOTS, Status, VolumeFacts,
};
pub use error::{
    CollectionError, ExportError, FatalCollectionError, ProbeError, ProbeResult,
};
pub use export::{ResultExporter, report_file_name};
pub use i18n::{Catalog, CatalogError, CommonText, DetailText, Localizer, TextId};
pub use ports::{
    BootEnvironment, CpuTopology, EdidBlob, HostPlatform, InternetState, MemoryStatus, OsVersion,
    ProcessorRegistry, SecureBootState, TpmInfo,
};
pub use probes::{FactProbe, ProbeContext, ProbeOutcome};
pub use settings::{
    DEFAULT_EXPORT_DIR, DEFAULT_LOCALE_DIR, DEFAULT_LOG_FILE, Settings, SettingsError,
    SettingsUpdate, validate_settings,
};
pub use store::{DomainSnapshot, EligibilityStore};
