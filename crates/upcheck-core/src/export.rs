//! JSON report of the published fact records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::ExportError;
use crate::i18n::Localizer;
use crate::store::EligibilityStore;

/// `result_<epoch>.json`
pub fn report_file_name(epoch_secs: i64) -> String {
    format!("result_{epoch_secs}.json")
}

/// Build the report document.
///
/// One key per domain with a record (localized domain name), holding an
/// object that maps the icon-stripped title to the detail lines.
pub fn build_report(store: &EligibilityStore, localizer: &dyn Localizer) -> Value {
    let mut document = Map::new();
    for (domain, record) in store.records() {
        let details: Vec<Value> = record.details.iter().cloned().map(Value::String).collect();
        let mut section = Map::new();
        section.insert(
            record.title_without_icon().to_string(),
            Value::Array(details),
        );
        document.insert(localizer.text(domain.into()), Value::Object(section));
    }
    Value::Object(document)
}

/// Writes reports into a directory.
#[derive(Debug, Clone)]
pub struct ResultExporter {
    dir: PathBuf,
}

impl ResultExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Export with the current wall-clock time in the file name.
    pub fn export(
        &self,
        store: &EligibilityStore,
        localizer: &dyn Localizer,
    ) -> Result<PathBuf, ExportError> {
        self.export_at(store, localizer, Utc::now().timestamp())
    }

    /// Export using the given epoch seconds in the file name.
    ///
    /// An existing file with the same name is replaced.
    pub fn export_at(
        &self,
        store: &EligibilityStore,
        localizer: &dyn Localizer,
        epoch_secs: i64,
    ) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(report_file_name(epoch_secs));
        let report = build_report(store, localizer);

        if path.exists() {
            debug!(path = %path.display(), "Removing previous report");
            fs::remove_file(&path).map_err(|source| ExportError::Create {
                path: path.clone(),
                source,
            })?;
        }

        let file = File::create(&path).map_err(|source| ExportError::Create {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        report.serialize(&mut serializer)?;
        writer.flush().map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Result exported");
        Ok(path)
    }
}

impl Default for ResultExporter {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Domain, DomainFacts, FactRecord, InternetFacts, Status};
    use crate::i18n::Catalog;
    use tempfile::tempdir;

    fn store_with_records() -> EligibilityStore {
        let store = EligibilityStore::new();
        let mut cpu = FactRecord::new("\u{f2db}  CPU Details:");
        cpu.push("Processor name:\n\t\tTest CPU");
        cpu.push("Vendor: GenuineIntel");
        store.publish(
            Domain::Cpu,
            cpu,
            DomainFacts::Internet(InternetFacts::default()),
            Status::Ok,
        );

        let mut net = FactRecord::new("\u{f1eb}  Internet Details:");
        net.push("Network state: true\n\tInternet state: 1");
        store.publish(
            Domain::Internet,
            net,
            DomainFacts::Internet(InternetFacts::default()),
            Status::Ok,
        );
        store
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name(1_700_000_000), "result_1700000000.json");
    }

    #[test]
    fn test_report_has_one_section_per_record() {
        let store = store_with_records();
        let report = build_report(&store, &Catalog::english());
        let object = report.as_object().unwrap();
        assert_eq!(object.len(), 2);

        let cpu = &object["CPU"]["CPU Details:"];
        assert_eq!(cpu.as_array().unwrap().len(), 2);
        let internet = &object["Internet"]["Internet Details:"];
        assert_eq!(internet.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_report_keeps_domain_order() {
        let store = store_with_records();
        let report = build_report(&store, &Catalog::english());
        let keys: Vec<&String> = report.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["CPU", "Internet"]);
    }

    #[test]
    fn test_export_writes_indented_json() {
        let dir = tempdir().unwrap();
        let exporter = ResultExporter::new(dir.path());
        let store = store_with_records();

        let path = exporter
            .export_at(&store, &Catalog::english(), 1_700_000_000)
            .unwrap();
        assert_eq!(path.file_name().unwrap(), "result_1700000000.json");

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"CPU\""));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, build_report(&store, &Catalog::english()));
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join(report_file_name(42));
        fs::write(&existing, "stale").unwrap();

        let exporter = ResultExporter::new(dir.path());
        exporter
            .export_at(&store_with_records(), &Catalog::english(), 42)
            .unwrap();
        let text = fs::read_to_string(&existing).unwrap();
        assert!(text.contains("Internet Details:"));
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let exporter = ResultExporter::new(dir.path().join("missing"));
        let err = exporter
            .export_at(&EligibilityStore::new(), &Catalog::english(), 1)
            .unwrap_err();
        assert!(matches!(err, ExportError::Create { .. }));
    }
}
