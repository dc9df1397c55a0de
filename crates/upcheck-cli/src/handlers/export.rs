//! Report export.

use std::path::{Path, PathBuf};

use tracing::warn;
use upcheck_core::{CommonText, EligibilityStore, Localizer, ResultExporter};

/// Write the report into `dir` and print the outcome.
///
/// A failed export is reported but does not end the run.
pub fn execute(store: &EligibilityStore, text: &dyn Localizer, dir: &Path) -> Option<PathBuf> {
    match ResultExporter::new(dir).export(store, text) {
        Ok(path) => {
            let name = path.file_name().unwrap_or(path.as_os_str());
            println!(
                "{}: {}",
                text.text(CommonText::ExportSuccess.into()),
                name.to_string_lossy()
            );
            Some(path)
        }
        Err(e) => {
            warn!(error = %e, "Result export failed");
            println!("{}", text.text(CommonText::ExportFail.into()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use upcheck_core::{Catalog, Domain, DomainFacts, FactRecord, InternetFacts, Status};

    fn populated_store() -> EligibilityStore {
        let store = EligibilityStore::new();
        let mut record = FactRecord::new("\u{f1eb}  Internet Details:");
        record.push("Network state: 1");
        store.publish(
            Domain::Internet,
            record,
            DomainFacts::Internet(InternetFacts {
                connected: true,
                connection_flags: 1,
                can_connect: true,
            }),
            Status::Ok,
        );
        store
    }

    #[test]
    fn test_export_writes_report() {
        let dir = tempdir().unwrap();
        let store = populated_store();

        let path = execute(&store, &Catalog::english(), dir.path()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let report: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            report["Internet"]["Internet Details:"][0],
            "Network state: 1"
        );
    }

    #[test]
    fn test_export_failure_is_not_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        assert!(execute(&populated_store(), &Catalog::english(), &missing).is_none());
    }
}
