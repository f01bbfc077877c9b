//! Refresh-cycle orchestration: fetch → diff → group → plan.
//!
//! The engine performs no I/O itself; snapshots and settings arrive
//! through the source traits, awaited before any pure transform runs.
//! Cycles are serialized through the detector mutex, and a cycle that
//! was superseded mid-fetch discards its result instead of merging a
//! stale snapshot into detector state.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use partsdash_core::Snapshot;

use crate::diff::{ChangeDetector, TransitionEvent};
use crate::group::group;
use crate::layout::{plan, RenderPlan};
use crate::notify::{dispatch_alerts, AlertSink};
use crate::settings::DisplaySettings;

/// Default polling cadence; a configurable constant, not a protocol
/// requirement.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Why a refresh cycle produced no outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RefreshError {
    /// Fetch/network failure; the held snapshot stays untouched.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Payload was not a valid record sequence; treated like transport
    /// failure so a corrupt grouping is never partially applied.
    #[error("malformed payload: {0}")]
    Payload(String),

    /// A newer cycle was dispatched while this one was in flight.
    #[error("cycle superseded by a newer refresh")]
    Superseded,
}

/// Provider of inventory snapshots (HTTP client in production,
/// scripted fakes in tests).
pub trait SnapshotSource {
    fn fetch_snapshot(&self) -> impl Future<Output = Result<Snapshot, RefreshError>> + Send;
}

/// Provider of display settings, captured once per cycle.
pub trait SettingsSource {
    fn fetch_settings(&self) -> impl Future<Output = Result<DisplaySettings, RefreshError>> + Send;
}

/// Result of one successful refresh cycle.
#[derive(Debug, Clone)]
pub struct CycleOutcome {
    pub plan: RenderPlan,
    pub events: Vec<TransitionEvent>,
    pub record_count: usize,
}

/// Drives repeated fetch-diff-group-plan cycles over a snapshot source.
pub struct RefreshEngine<S> {
    source: S,
    detector: Mutex<ChangeDetector>,
    generation: AtomicU64,
}

impl<S: SnapshotSource> RefreshEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            detector: Mutex::new(ChangeDetector::new()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Drop change-detection history; the next cycle emits no events.
    pub async fn reset(&self) {
        self.detector.lock().await.reset();
    }

    /// Run one refresh cycle with settings captured by the caller.
    ///
    /// On any error the held previous snapshot is left unchanged, so
    /// the next successful cycle still diffs against the last
    /// known-good state.
    pub async fn run_cycle(
        &self,
        settings: &DisplaySettings,
    ) -> Result<CycleOutcome, RefreshError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = self.source.fetch_snapshot().await?;

        // The mutex covers the whole read-compare-replace region; the
        // ticket check under it discards cycles that lost the race to a
        // newer dispatch.
        let mut detector = self.detector.lock().await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return Err(RefreshError::Superseded);
        }

        let grouped = group(&snapshot);
        let render_plan = plan(&grouped, settings);
        let record_count = snapshot.len();
        let events = detector.diff(snapshot);

        Ok(CycleOutcome {
            plan: render_plan,
            events,
            record_count,
        })
    }

    /// Poll forever: capture settings, run a cycle, surface alerts.
    ///
    /// One failed cycle never prevents the next scheduled one; failures
    /// are logged and the loop continues. Settings fetch failures fall
    /// back to defaults for that cycle only.
    pub async fn run_forever(
        &self,
        settings: &impl SettingsSource,
        sink: &dyn AlertSink,
        interval: Duration,
    ) -> ! {
        loop {
            let captured = match settings.fetch_settings().await {
                Ok(s) => s,
                Err(err) => {
                    tracing::warn!(%err, "settings fetch failed; using defaults for this cycle");
                    DisplaySettings::default()
                }
            };

            match self.run_cycle(&captured).await {
                Ok(outcome) => {
                    tracing::debug!(
                        records = outcome.record_count,
                        sections = outcome.plan.sections.len(),
                        transitions = outcome.events.len(),
                        "refresh cycle complete"
                    );
                    dispatch_alerts(sink, &outcome.events);
                }
                Err(RefreshError::Superseded) => {}
                Err(err) => {
                    tracing::warn!(%err, "refresh cycle failed; previous snapshot retained");
                }
            }

            tokio::time::sleep(interval).await;
        }
    }
}
