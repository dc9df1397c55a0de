//! Core domain types for the eligibility checklist.
//!
//! These are pure data types with no OS dependencies. Probes fill them,
//! the [`EligibilityStore`](crate::store::EligibilityStore) owns them and
//! presentation/export read copies.

mod facts;
mod record;

pub use facts::{
    AdapterFacts, BootFacts, CpuFacts, DirectXVersion, DiskFacts, DisplayDeviceFacts,
    DisplayFacts, DomainFacts, FirmwareType, InternetFacts, MemorySource, MonitorFacts, OsFacts,
    PartitionStyle, RamFacts, VolumeFacts,
};
pub use record::FactRecord;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of status slots tracked by the store's accounting.
///
/// One sentinel slot, the Summary pseudo-domain and the seven probed domains.
pub const STATUS_SLOTS: usize = 9;

/// A checklist category.
///
/// Ordering is fixed and matches the display and export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Presentation-only pseudo-domain, never probed.
    Summary,
    Os,
    Boot,
    Cpu,
    Ram,
    Disk,
    Display,
    Internet,
}

impl Domain {
    /// Every domain including the Summary pseudo-domain, in slot order.
    pub const ALL: [Self; 8] = [
        Self::Summary,
        Self::Os,
        Self::Boot,
        Self::Cpu,
        Self::Ram,
        Self::Disk,
        Self::Display,
        Self::Internet,
    ];

    /// Domains that have a probe, in collection order.
    pub const PROBED: [Self; 7] = [
        Self::Os,
        Self::Boot,
        Self::Cpu,
        Self::Ram,
        Self::Disk,
        Self::Display,
        Self::Internet,
    ];

    /// Stable slot index; slot 0 is the unused sentinel.
    ///
    /// Also the key of the domain name in the localization catalog.
    pub const fn slot(self) -> u8 {
        match self {
            Self::Summary => 1,
            Self::Os => 2,
            Self::Boot => 3,
            Self::Cpu => 4,
            Self::Ram => 5,
            Self::Disk => 6,
            Self::Display => 7,
            Self::Internet => 8,
        }
    }

    /// Icon glyph (Font Awesome private-use codepoint) shown before the title.
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Summary => "\u{f328}",
            Self::Os => "\u{f17a}",
            Self::Boot => "\u{f252}",
            Self::Cpu => "\u{f2db}",
            Self::Ram => "\u{f538}",
            Self::Disk => "\u{f0a0}",
            Self::Display => "\u{f108}",
            Self::Internet => "\u{f1eb}",
        }
    }

    /// Whether a probe exists for this domain.
    pub const fn is_probed(self) -> bool {
        !matches!(self, Self::Summary)
    }

    /// Short english identifier used in log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Os => "os",
            Self::Boot => "boot",
            Self::Cpu => "cpu",
            Self::Ram => "ram",
            Self::Disk => "disk",
            Self::Display => "display",
            Self::Internet => "internet",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a domain within one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Unknown,
    Initializing,
    Ok,
    Fail,
}

impl Status {
    /// `Ok` or `Fail`.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ok | Self::Fail)
    }

    /// Verdict to terminal status.
    pub const fn from_verdict(eligible: bool) -> Self {
        if eligible { Self::Ok } else { Self::Fail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_unique_and_within_accounting() {
        let mut slots: Vec<u8> = Domain::ALL.iter().map(|d| d.slot()).collect();
        slots.dedup();
        assert_eq!(slots.len(), Domain::ALL.len());
        assert!(slots.iter().all(|s| (*s as usize) < STATUS_SLOTS && *s != 0));
    }

    #[test]
    fn test_probed_excludes_summary() {
        assert!(!Domain::PROBED.contains(&Domain::Summary));
        assert!(Domain::PROBED.iter().all(|d| d.is_probed()));
        assert!(!Domain::Summary.is_probed());
    }

    #[test]
    fn test_icon_prefix_is_three_bytes() {
        for domain in Domain::ALL {
            assert_eq!(domain.icon().len(), 3, "{domain}");
        }
    }

    #[test]
    fn test_status_from_verdict() {
        assert_eq!(Status::from_verdict(true), Status::Ok);
        assert_eq!(Status::from_verdict(false), Status::Fail);
        assert!(Status::Ok.is_terminal());
        assert!(!Status::Initializing.is_terminal());
        assert_eq!(Status::default(), Status::Unknown);
    }
}
