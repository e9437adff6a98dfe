//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the simulation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::info;

use arpg_content::{ContentFactory, ContentLibrary};
use arpg_core::{PcgRng, SimConfig, World};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::reload::ReloadSettings;
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub sim_config: SimConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// How often a reload re-checks the pending callback gauge.
    pub reload_poll_interval: Duration,
    /// Upper bound on waiting for deferred callbacks to drain.
    pub reload_timeout: Duration,
    /// Seed for damage jitter rolls.
    pub rng_seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sim_config: SimConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            reload_poll_interval: Duration::from_millis(10),
            reload_timeout: Duration::from_secs(5),
            rng_seed: 0,
        }
    }
}

/// Main runtime that orchestrates the character simulation
///
/// Design: Runtime owns the worker task.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker exits once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: Option<RuntimeConfig>,
    content: Option<ContentLibrary>,
    data_dir: Option<PathBuf>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: None,
            content: None,
            data_dir: None,
        }
    }

    /// Override runtime configuration
    ///
    /// Takes precedence over a `config.toml` found in [`Self::data_dir`].
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Provide an already loaded content library
    pub fn content(mut self, content: ContentLibrary) -> Self {
        self.content = Some(content);
        self
    }

    /// Load content (and the simulation config) from a data directory
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Build and start the runtime
    pub async fn build(self) -> Result<Runtime> {
        let (content, config) = self.resolve()?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(config.command_buffer_size);
        let event_bus = EventBus::with_capacity(config.event_buffer_size);

        let world = World::with_rng(config.sim_config.clone(), Box::new(PcgRng), config.rng_seed);
        let handle = RuntimeHandle::new(
            command_tx,
            event_bus.clone(),
            world.suspend_flag(),
            world.pending_gauge(),
            ReloadSettings {
                poll: config.reload_poll_interval,
                timeout: config.reload_timeout,
            },
        );

        let sim_worker = SimulationWorker::new(world, Arc::new(content), command_rx, event_bus);
        let sim_worker_handle = tokio::spawn(sim_worker.run());
        info!("runtime started");

        Ok(Runtime {
            handle,
            sim_worker_handle,
        })
    }

    fn resolve(self) -> Result<(ContentLibrary, RuntimeConfig)> {
        let Some(data_dir) = self.data_dir else {
            let content = self.content.ok_or(RuntimeError::MissingContent)?;
            return Ok((content, self.config.unwrap_or_default()));
        };

        let factory = ContentFactory::new(data_dir);
        let content = match self.content {
            Some(content) => content,
            None => factory
                .load_library()
                .map_err(|error| RuntimeError::Content(format!("{error:#}")))?,
        };
        let config = match self.config {
            Some(config) => config,
            None => RuntimeConfig {
                sim_config: factory
                    .load_config()
                    .map_err(|error| RuntimeError::Content(format!("{error:#}")))?,
                ..RuntimeConfig::default()
            },
        };
        Ok((content, config))
    }
}
