//! Collaborator boundaries.
//!
//! The simulation core performs no rendering, physics integration, audio or
//! file access. Everything it needs from the outside world is expressed as a
//! trait here. Mutable collaborators are bundled into [`SimEnv`] and handed to
//! every operation that produces side effects; read-only oracles
//! ([`RngOracle`], [`ContentOracle`]) are owned or borrowed separately.
mod audio;
mod content;
mod physics;
mod presentation;
mod rng;

#[cfg(test)]
pub(crate) mod recording;

pub use audio::Audio;
pub use content::ContentOracle;
pub use physics::{BodyCategory, BodyHandle, FixtureKind, FixtureShape, Physics, Vec2};
pub use presentation::{AnimationRequest, Clip, Playback, Presentation};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Mutable collaborators used while applying simulation side effects.
pub struct SimEnv<'a> {
    pub physics: &'a mut dyn Physics,
    pub presentation: &'a mut dyn Presentation,
    pub audio: &'a mut dyn Audio,
}

impl<'a> SimEnv<'a> {
    pub fn new(
        physics: &'a mut dyn Physics,
        presentation: &'a mut dyn Presentation,
        audio: &'a mut dyn Audio,
    ) -> Self {
        Self {
            physics,
            presentation,
            audio,
        }
    }

    /// Reborrows the bundle for a nested call.
    pub fn reborrow(&mut self) -> SimEnv<'_> {
        SimEnv {
            physics: &mut *self.physics,
            presentation: &mut *self.presentation,
            audio: &mut *self.audio,
        }
    }
}
