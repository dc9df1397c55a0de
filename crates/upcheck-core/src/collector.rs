//! Collection orchestrator.
//!
//! Runs every probe in a fixed order on one background worker and publishes
//! the results into the [`EligibilityStore`]. A collector runs once: the
//! state only moves `NotStarted -> Running -> Completed | FatallyFailed`.
//! A probe that cannot reach its OS interface stops the run with a
//! [`FatalCollectionError`]; the caller is expected to terminate the process.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::{error, info, warn};

use crate::domain::Status;
use crate::error::{CollectionError, FatalCollectionError};
use crate::i18n::Localizer;
use crate::ports::HostPlatform;
use crate::probes::{self, FactProbe, ProbeContext};
use crate::render;
use crate::store::EligibilityStore;

/// Name of the collection worker thread.
pub const WORKER_THREAD_NAME: &str = "upcheck-probe";

/// Lifecycle of one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CollectionState {
    NotStarted = 0,
    Running = 1,
    Completed = 2,
    FatallyFailed = 3,
}

impl CollectionState {
    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::FatallyFailed,
            _ => Self::NotStarted,
        }
    }

    /// `Completed` or `FatallyFailed`.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::FatallyFailed)
    }
}

/// Drives the probes and owns the run state.
pub struct Collector {
    store: Arc<EligibilityStore>,
    host: Arc<dyn HostPlatform>,
    localizer: Arc<dyn Localizer>,
    probes: Vec<Box<dyn FactProbe>>,
    state: AtomicU8,
}

impl Collector {
    /// Collector with the seven standard probes.
    pub fn new(
        store: Arc<EligibilityStore>,
        host: Arc<dyn HostPlatform>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self::with_probes(store, host, localizer, probes::default_probes())
    }

    /// Collector running the given probes in order.
    pub fn with_probes(
        store: Arc<EligibilityStore>,
        host: Arc<dyn HostPlatform>,
        localizer: Arc<dyn Localizer>,
        probes: Vec<Box<dyn FactProbe>>,
    ) -> Self {
        Self {
            store,
            host,
            localizer,
            probes,
            state: AtomicU8::new(CollectionState::NotStarted as u8),
        }
    }

    pub fn store(&self) -> &Arc<EligibilityStore> {
        &self.store
    }

    pub fn state(&self) -> CollectionState {
        CollectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move `NotStarted -> Running`, failing if another run got there first.
    fn claim(&self) -> Result<(), CollectionError> {
        self.state
            .compare_exchange(
                CollectionState::NotStarted as u8,
                CollectionState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|current| {
                let current = CollectionState::from_u8(current);
                warn!(state = ?current, "Collection already started");
                CollectionError::AlreadyStarted(current)
            })
    }

    fn set_state(&self, state: CollectionState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Run every probe on the calling thread.
    ///
    /// Only the first call runs; later calls return
    /// [`CollectionError::AlreadyStarted`] and leave the store untouched.
    pub fn run(&self) -> Result<(), CollectionError> {
        self.claim()?;
        let started = Instant::now();

        for probe in &self.probes {
            if let Err(e) = self.run_probe(probe.as_ref()) {
                error!(
                    domain = %e.domain,
                    operation = e.source.operation(),
                    error = %e.source,
                    "System information processing failed"
                );
                self.set_state(CollectionState::FatallyFailed);
                return Err(e.into());
            }
        }

        info!(
            elapsed_ms = started.elapsed().as_millis(),
            ok = self.store.ok_count(),
            upgradable = self.store.is_system_upgradable(),
            "System information collected"
        );
        self.set_state(CollectionState::Completed);
        Ok(())
    }

    fn run_probe(&self, probe: &dyn FactProbe) -> Result<(), FatalCollectionError> {
        let domain = probe.domain();
        let started = Instant::now();
        info!(%domain, "Informations loading...");
        self.store.set_status(domain, Status::Initializing);

        let ctx = ProbeContext {
            host: self.host.as_ref(),
            store: &self.store,
        };
        let outcome = probe
            .collect(&ctx)
            .map_err(|source| FatalCollectionError { domain, source })?;

        let record = render::render(&outcome.facts, self.localizer.as_ref());
        let status = Status::from_verdict(outcome.eligible);
        self.store.publish(domain, record, outcome.facts, status);

        info!(
            %domain,
            ?status,
            elapsed_ms = started.elapsed().as_millis(),
            "Informations loaded"
        );
        Ok(())
    }

    /// Start the run on the dedicated worker thread.
    pub fn spawn(
        self: Arc<Self>,
    ) -> io::Result<JoinHandle<Result<(), CollectionError>>> {
        thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || self.run())
    }
}

impl std::fmt::Debug for Collector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collector")
            .field("probes", &self.probes.len())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
