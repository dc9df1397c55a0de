//! Localization catalog.
//!
//! Catalog files are JSON objects keyed by phase, then by index:
//!
//! ```json
//! { "1": { "6": "Details" }, "2": { "4": "CPU" }, "3": { "9": "Processor name" } }
//! ```
//!
//! Phase 1 holds common texts, phase 2 domain names (keyed by
//! [`Domain::slot`]) and phase 3 detail-line labels.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::Domain;

/// English catalog compiled into the binary, used when no file is found.
const EMBEDDED_EN_US: &str = include_str!("../../../i18n/en_us.json");

/// Locale file stem used when the system locale has no catalog.
pub const DEFAULT_LOCALE: &str = "en_us";

/// Common texts (phase 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommonText {
    Unknown = 1,
    Initializing = 2,
    CompatibleOk = 3,
    CompatibleFail = 4,
    Status = 5,
    Details = 6,
    SaveResult = 7,
    Capable = 9,
    Enabled = 10,
    Disabled = 11,
    Version = 12,
    Result = 14,
    CanUpgrade = 15,
    CannotUpgrade = 16,
    ExportSuccess = 17,
    ExportFail = 18,
}

/// Detail-line labels (phase 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailText {
    OsVersion = 1,
    OsServicePack = 2,
    OsBuild = 3,
    OsPlatformId = 4,
    OsProductType = 5,
    BootEnvironment = 6,
    BootSecureBoot = 7,
    BootTpm = 8,
    CpuName = 9,
    CpuDetails = 10,
    CpuArchitecture = 11,
    CpuActiveProcessors = 12,
    CpuProcessors = 13,
    RamPhysical = 14,
    CpuVendor = 15,
    CpuCoresAtSpeed = 16,
    CpuSupported = 17,
    Disk = 18,
    DisplayDevice = 19,
    DisplayAdapter = 20,
    DirectX = 21,
    NetworkState = 22,
    InternetState = 23,
}

/// Identifier of a localizable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextId {
    Common(CommonText),
    Domain(Domain),
    Detail(DetailText),
}

impl TextId {
    /// `(phase, index)` key in the catalog file.
    pub const fn key(self) -> (u8, u32) {
        match self {
            Self::Common(id) => (1, id as u32),
            Self::Domain(domain) => (2, domain.slot() as u32),
            Self::Detail(id) => (3, id as u32),
        }
    }
}

impl From<CommonText> for TextId {
    fn from(id: CommonText) -> Self {
        Self::Common(id)
    }
}

impl From<Domain> for TextId {
    fn from(domain: Domain) -> Self {
        Self::Domain(domain)
    }
}

impl From<DetailText> for TextId {
    fn from(id: DetailText) -> Self {
        Self::Detail(id)
    }
}

/// Source of display strings.
pub trait Localizer: Send + Sync {
    fn text(&self, id: TextId) -> String;
}

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read locale file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Language file could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Language file base is not an object")]
    NotAnObject,

    #[error("Language phase {phase} is invalid: {reason}")]
    InvalidPhase { phase: String, reason: String },

    #[error("Language entry {phase}/{key} is invalid: {reason}")]
    InvalidEntry {
        phase: String,
        key: String,
        reason: String,
    },

    #[error("Pre-defined locale file {0} does not exist")]
    LocaleNotFound(PathBuf),
}

/// Parsed catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<(u8, u32), String>,
}

impl Catalog {
    /// Parse a catalog from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(text)?;
        let Value::Object(phases) = document else {
            return Err(CatalogError::NotAnObject);
        };

        let mut entries = HashMap::new();
        for (phase_key, node) in phases {
            let phase: u8 = phase_key.parse().map_err(|_| CatalogError::InvalidPhase {
                phase: phase_key.clone(),
                reason: "key is not a number".to_string(),
            })?;
            let Value::Object(texts) = node else {
                return Err(CatalogError::InvalidPhase {
                    phase: phase_key,
                    reason: "value is not an object".to_string(),
                });
            };

            for (key, value) in texts {
                let index: u32 = key.parse().map_err(|_| CatalogError::InvalidEntry {
                    phase: phase_key.clone(),
                    key: key.clone(),
                    reason: "key is not a number".to_string(),
                })?;
                let Value::String(text) = value else {
                    return Err(CatalogError::InvalidEntry {
                        phase: phase_key.clone(),
                        key,
                        reason: "value is not a string".to_string(),
                    });
                };
                entries.insert((phase, index), text);
            }
        }

        debug!(entries = entries.len(), "Catalog parsed");
        Ok(Self { entries })
    }

    /// Read and parse a catalog file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        // The embedded file is covered by tests; an empty catalog still renders.
        Self::from_json_str(EMBEDDED_EN_US).unwrap_or_default()
    }

    /// Resolve and load the catalog for this run.
    ///
    /// A configured locale must exist. Otherwise the system locale is tried,
    /// then [`DEFAULT_LOCALE`], then the embedded English catalog.
    pub fn load(
        dir: &Path,
        configured: Option<&str>,
        system_locale: Option<&str>,
    ) -> Result<Self, CatalogError> {
        if let Some(locale) = configured {
            let path = locale_path(dir, locale);
            if !path.exists() {
                return Err(CatalogError::LocaleNotFound(path));
            }
            info!(path = %path.display(), "Target locale file");
            return Self::from_file(&path);
        }

        let candidates = system_locale
            .into_iter()
            .map(|l| l.to_lowercase())
            .chain(std::iter::once(DEFAULT_LOCALE.to_string()));
        for locale in candidates {
            let path = locale_path(dir, &locale);
            if path.exists() {
                info!(path = %path.display(), "Target locale file");
                return Self::from_file(&path);
            }
            warn!(path = %path.display(), "Locale file does not exist");
        }

        warn!("No locale file found, using built-in English texts");
        Ok(Self::english())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for Catalog {
    fn text(&self, id: TextId) -> String {
        let key = id.key();
        self.entries
            .get(&key)
            .cloned()
            .unwrap_or_else(|| format!("<undefined> {}", key.1))
    }
}

/// `<dir>/<locale>.json`
pub fn locale_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{locale}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_embedded_catalog_covers_every_domain() {
        let catalog = Catalog::english();
        assert!(!catalog.is_empty());
        for domain in Domain::ALL {
            assert!(!catalog.text(domain.into()).starts_with("<undefined>"));
        }
        assert_eq!(catalog.text(CommonText::Details.into()), "Details");
        assert_eq!(catalog.text(Domain::Cpu.into()), "CPU");
    }

    #[test]
    fn test_missing_entry_renders_undefined() {
        let catalog = Catalog::from_json_str(r#"{"1": {}}"#).unwrap();
        assert_eq!(catalog.text(DetailText::Disk.into()), "<undefined> 18");
    }

    #[test]
    fn test_rejects_non_numeric_keys() {
        assert!(matches!(
            Catalog::from_json_str(r#"{"common": {}}"#),
            Err(CatalogError::InvalidPhase { .. })
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"1": {"details": "x"}}"#),
            Err(CatalogError::InvalidEntry { .. })
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"1": {"6": 3}}"#),
            Err(CatalogError::InvalidEntry { .. })
        ));
        assert!(matches!(
            Catalog::from_json_str("[]"),
            Err(CatalogError::NotAnObject)
        ));
    }

    #[test]
    fn test_load_prefers_system_locale_then_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("en_us.json"), r#"{"2": {"4": "Processor"}}"#).unwrap();
        fs::write(dir.path().join("de_de.json"), r#"{"2": {"4": "Prozessor"}}"#).unwrap();

        let catalog = Catalog::load(dir.path(), None, Some("de_DE")).unwrap();
        assert_eq!(catalog.text(Domain::Cpu.into()), "Prozessor");

        let catalog = Catalog::load(dir.path(), None, Some("fr_FR")).unwrap();
        assert_eq!(catalog.text(Domain::Cpu.into()), "Processor");
    }

    #[test]
    fn test_load_falls_back_to_embedded() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::load(dir.path(), None, None).unwrap();
        assert_eq!(catalog.text(Domain::Ram.into()), "RAM");
    }

    #[test]
    fn test_configured_locale_must_exist() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Catalog::load(dir.path(), Some("xx_yy"), None),
            Err(CatalogError::LocaleNotFound(_))
        ));
    }
}
