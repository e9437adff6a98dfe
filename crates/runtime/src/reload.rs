//! World reload barrier.
//!
//! A map change must not tear characters down while deferred callbacks that
//! reference them are still armed. [`WorldReloader`] runs the sequence:
//!
//! 1. raise the world's suspend flag so intents stop arming new timers
//! 2. poll the pending gauge until it drains, bounded by a timeout
//! 3. ask the simulation worker to tear the map population down, going back
//!    to step 2 if a tick armed new callbacks in between
//! 4. run the caller's loader
//! 5. clear the suspend flag
//!
//! The flag is cleared on every exit path, including timeouts and loader
//! failures. The simulation keeps ticking throughout; only the host's tick
//! loop drains the gauge.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use arpg_core::{GameError, TeardownError, TeardownReport};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, LifecycleEvent};

#[derive(Clone, Copy, Debug)]
pub(crate) struct ReloadSettings {
    pub poll: Duration,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReloadReport<T> {
    pub teardown: TeardownReport,
    /// Time spent waiting for deferred callbacks to drain.
    pub waited: Duration,
    pub loaded: T,
}

/// Coordinates one reload at a time against a running simulation.
pub struct WorldReloader {
    handle: RuntimeHandle,
    settings: ReloadSettings,
}

impl WorldReloader {
    pub(crate) fn new(handle: RuntimeHandle, settings: ReloadSettings) -> Self {
        Self { handle, settings }
    }

    /// Suspends the world, waits for callbacks to drain, tears the map
    /// population down, then runs `loader` with a handle to the runtime.
    pub async fn reload<F, Fut, T>(&self, loader: F) -> Result<ReloadReport<T>>
    where
        F: FnOnce(RuntimeHandle) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let suspend = self.handle.suspend_flag().clone();
        suspend.raise();
        self.publish(LifecycleEvent::Suspended);
        info!("world suspended for reload");

        let outcome = self.drain_and_load(loader).await;

        suspend.clear();
        self.publish(LifecycleEvent::Resumed);
        match &outcome {
            Ok(report) => info!(
                removed = report.teardown.removed.len(),
                waited_ms = report.waited.as_millis() as u64,
                "reload finished"
            ),
            Err(error) => warn!(%error, "reload aborted"),
        }
        outcome
    }

    async fn drain_and_load<F, Fut, T>(&self, loader: F) -> Result<ReloadReport<T>>
    where
        F: FnOnce(RuntimeHandle) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let deadline = started + self.settings.timeout;

        // Ticks keep running between the drain and the teardown command and
        // may arm fresh callbacks; a refused teardown goes back to draining.
        let teardown = loop {
            self.wait_for_drain(started, deadline).await?;
            match self.handle.teardown().await {
                Err(RuntimeError::Rejected { code, .. }) if is_pending_callbacks(code) => {
                    debug!("callbacks armed after drain, waiting again");
                }
                outcome => break outcome?,
            }
        };
        let waited = started.elapsed();
        let loaded = loader(self.handle.clone()).await?;

        Ok(ReloadReport {
            teardown,
            waited,
            loaded,
        })
    }

    async fn wait_for_drain(&self, started: Instant, deadline: Instant) -> Result<()> {
        let gauge = self.handle.pending_gauge().clone();
        let poll = self.settings.poll;

        let drained = tokio::time::timeout_at(deadline, async {
            while !gauge.is_drained() {
                tokio::time::sleep(poll).await;
            }
        })
        .await;

        drained.map_err(|_| RuntimeError::ReloadTimeout {
            pending: gauge.get(),
            waited: started.elapsed(),
        })
    }

    fn publish(&self, event: LifecycleEvent) {
        self.handle.event_bus().publish(Event::Lifecycle(event));
    }
}

fn is_pending_callbacks(code: &str) -> bool {
    code == TeardownError::PendingCallbacks { pending: 0 }.error_code()
}
