//! Runtime orchestration for the character simulation.
//!
//! This crate wraps an [`arpg_core::World`] in a background worker task and
//! exposes it through a cloneable [`RuntimeHandle`]. Side effects the core
//! emits through its collaborator traits are republished on a topic-based
//! [`EventBus`] so hosts can render, play audio, or log without touching the
//! simulation thread.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`adapters`] implements the core collaborator traits on top of the bus
//! - [`reload`] runs the suspend, drain, teardown and load sequence
//! - [`workers`] keeps background tasks internal to the crate
pub mod adapters;
pub mod api;
pub mod events;
pub mod reload;
pub mod runtime;

mod workers;

pub use adapters::{EventAudio, EventPresentation, KinematicBodies, KinematicBody};
pub use api::{CharacterSnapshot, Intent, Result, RuntimeError, RuntimeHandle};
pub use events::{AudioEvent, Event, EventBus, LifecycleEvent, PresentationEvent, Topic};
pub use reload::{ReloadReport, WorldReloader};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
