//! Runtime implementations of the core collaborator traits.
//!
//! Presentation and audio calls are turned into bus events. Physics is backed
//! by [`KinematicBodies`], a velocity-only body store that hosts without a
//! physics engine can drive directly.
mod audio;
mod bodies;
mod presentation;

pub use audio::EventAudio;
pub use bodies::{KinematicBodies, KinematicBody};
pub use presentation::EventPresentation;
