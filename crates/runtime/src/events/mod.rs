//! Topic-based event system for the runtime.
//!
//! Consumers subscribe to the topics they care about instead of filtering a
//! single firehose:
//! - [`Topic::Presentation`] for animations, hit effects and HUD refreshes
//! - [`Topic::Audio`] for sound effects
//! - [`Topic::Lifecycle`] for spawns, ticks, suspension and teardown
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AudioEvent, LifecycleEvent, PresentationEvent};
