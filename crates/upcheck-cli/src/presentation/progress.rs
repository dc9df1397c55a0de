//! Spinner shown while the probe worker runs.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use upcheck_core::{CommonText, Domain, EligibilityStore, Localizer, Status};

/// How often the store is polled for the domain in progress.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// First domain currently `Initializing`, if any.
pub fn current_domain(store: &EligibilityStore) -> Option<Domain> {
    Domain::PROBED
        .into_iter()
        .find(|domain| store.status(*domain) == Status::Initializing)
}

/// Spinner message for the domain in progress.
fn progress_message(domain: Domain, text: &dyn Localizer) -> String {
    format!(
        "{} {}",
        text.text(domain.into()),
        text.text(CommonText::Initializing.into())
    )
}

/// Poll `store` until `worker` finishes, then join it.
///
/// `Err` carries the worker's panic payload.
pub fn wait_for_worker<T>(
    worker: JoinHandle<T>,
    store: &EligibilityStore,
    text: &dyn Localizer,
) -> thread::Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(POLL_INTERVAL);

    let mut shown = None;
    while !worker.is_finished() {
        let domain = current_domain(store);
        if domain != shown {
            if let Some(domain) = domain {
                spinner.set_message(progress_message(domain, text));
            }
            shown = domain;
        }
        thread::sleep(POLL_INTERVAL);
    }

    spinner.finish_and_clear();
    worker.join()
}
