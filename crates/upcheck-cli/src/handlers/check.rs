//! Run the checklist and print the outcome.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use upcheck_core::{Collector, EligibilityStore, HostPlatform, Localizer};

use crate::error::CliError;
use crate::handlers::export;
use crate::presentation::{render_details, render_result, render_summary, wait_for_worker};

/// Options for one checklist run.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Coloured status labels.
    pub color: bool,
    /// Write a report into this directory once collection completes.
    pub export_dir: Option<PathBuf>,
}

/// Collect every domain on the worker thread while the spinner runs, then
/// print the summary, the overall result and the details.
///
/// Returns whether the system is upgradable. A fatal probe failure is
/// returned as [`CliError::Collection`] after the summary is printed.
pub fn execute(
    host: Arc<dyn HostPlatform>,
    text: Arc<dyn Localizer>,
    options: &CheckOptions,
) -> Result<bool, CliError> {
    let store = Arc::new(EligibilityStore::new());
    let collector = Arc::new(Collector::new(Arc::clone(&store), host, Arc::clone(&text)));

    let worker = Arc::clone(&collector).spawn()?;
    let outcome = wait_for_worker(worker, &store, text.as_ref())
        .map_err(|_| CliError::Collection("probe worker panicked".to_string()))?;

    println!("{}", render_summary(&store, text.as_ref(), options.color));
    outcome?;

    let upgradable = store.is_system_upgradable();
    info!(upgradable, ok = store.ok_count(), "Checklist finished");
    println!("{}\n", render_result(upgradable, text.as_ref(), options.color));
    print!("{}", render_details(&store));

    if let Some(dir) = &options.export_dir {
        export::execute(&store, text.as_ref(), dir);
    }
    Ok(upgradable)
}
