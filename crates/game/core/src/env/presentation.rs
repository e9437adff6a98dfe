use crate::fsm::State;
use crate::state::CharacterId;

/// How an animation clip is played back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Playback {
    Loop,
    Once,
}

/// Clip to play on a character's body sprite.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Clip {
    /// The clip bound to a state. `variant` selects among the rotating attack
    /// animations and is 0 for every other state.
    State { state: State, variant: u32 },
    /// A clip addressed by name, used by skills that animate the caster.
    Named { name: String, frame_interval: f32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationRequest {
    pub clip: Clip,
    pub playback: Playback,
}

impl AnimationRequest {
    pub fn state(state: State, variant: u32) -> Self {
        Self {
            clip: Clip::State { state, variant },
            playback: state.playback(),
        }
    }

    pub fn named(name: impl Into<String>, frame_interval: f32) -> Self {
        Self {
            clip: Clip::Named {
                name: name.into(),
                frame_interval,
            },
            playback: Playback::Once,
        }
    }
}

/// Rendering and HUD collaborator.
pub trait Presentation {
    fn play_animation(&mut self, character: CharacterId, request: AnimationRequest);

    fn show_floating_damage(&mut self, character: CharacterId, amount: u32);

    fn show_hit_effect(&mut self, character: CharacterId);

    fn refresh_status_bars(&mut self);

    fn register_after_image(&mut self, character: CharacterId);

    fn unregister_after_image(&mut self, character: CharacterId);
}
