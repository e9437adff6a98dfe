//! State derivation and transition side effects.
//!
//! [`determine_state`] walks [`PRIORITY`] in order and returns the state of the
//! first guard that matches. It is pure: the same [`StateInputs`] and config
//! always produce the same state.

use tracing::trace;

use crate::config::SimConfig;
use crate::env::{AnimationRequest, Presentation, Vec2};
use crate::state::{ActionFlags, Character};
use crate::world::Deferred;

use super::State;

/// Everything state derivation reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StateInputs {
    pub flags: ActionFlags,
    pub velocity: Vec2,
    pub attack_override: Option<State>,
    pub has_weapon: bool,
}

impl StateInputs {
    pub fn new(flags: ActionFlags, velocity: Vec2) -> Self {
        Self {
            flags,
            velocity,
            attack_override: None,
            has_weapon: false,
        }
    }

    pub fn with_override(mut self, state: State) -> Self {
        self.attack_override = Some(state);
        self
    }

    pub fn with_weapon(mut self) -> Self {
        self.has_weapon = true;
        self
    }
}

/// A guard yields a state when its condition holds.
pub type Guard = fn(&StateInputs, &SimConfig) -> Option<State>;

/// Derivation guards, highest priority first.
pub const PRIORITY: [(&str, Guard); 12] = [
    ("set_to_kill", set_to_kill),
    ("getting_up", getting_up),
    ("attacking", attacking),
    ("dodging_backward", dodging_backward),
    ("dodging_forward", dodging_forward),
    ("falling", falling),
    ("jumping", jumping),
    ("crouching", crouching),
    ("start_running", start_running),
    ("stop_running", stop_running),
    ("running", running),
    ("idle", idle),
];

fn flag(inputs: &StateInputs, flag: ActionFlags, state: State) -> Option<State> {
    inputs.flags.contains(flag).then_some(state)
}

fn set_to_kill(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::SET_TO_KILL, State::Killed)
}

fn getting_up(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::GETTING_UP, State::FallingGetup)
}

fn attacking(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    inputs
        .flags
        .contains(ActionFlags::ATTACKING)
        .then(|| resolve_attack_state(inputs))
}

fn dodging_backward(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::DODGING_BACKWARD, State::DodgingBackward)
}

fn dodging_forward(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::DODGING_FORWARD, State::DodgingForward)
}

fn falling(inputs: &StateInputs, config: &SimConfig) -> Option<State> {
    (inputs.velocity.y < config.falling_velocity).then_some(State::Falling)
}

fn jumping(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::JUMPING, State::Jumping)
}

fn crouching(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::CROUCHING, State::Crouching)
}

fn start_running(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::START_RUNNING, State::RunningStart)
}

fn stop_running(inputs: &StateInputs, _: &SimConfig) -> Option<State> {
    flag(inputs, ActionFlags::STOP_RUNNING, State::RunningStop)
}

fn running(inputs: &StateInputs, config: &SimConfig) -> Option<State> {
    (inputs.velocity.x.abs() > config.running_epsilon).then_some(State::Running)
}

fn idle(_: &StateInputs, _: &SimConfig) -> Option<State> {
    Some(State::Idle)
}

pub fn determine_state(inputs: &StateInputs, config: &SimConfig) -> State {
    PRIORITY
        .iter()
        .find_map(|(_, guard)| guard(inputs, config))
        .unwrap_or(State::Idle)
}

/// Picks the attack variant while the attacking flag is set.
pub fn resolve_attack_state(inputs: &StateInputs) -> State {
    if let Some(state) = inputs.attack_override {
        return state;
    }
    if !inputs.has_weapon {
        State::AttackingUnarmed
    } else if inputs.flags.contains(ActionFlags::CROUCHING) {
        State::AttackingCrouch
    } else if inputs.flags.contains(ActionFlags::JUMPING) {
        State::AttackingMidair
    } else {
        State::Attacking
    }
}

/// True when horizontal speed just dropped below the stop threshold while the
/// character was still moving the way it faces.
pub fn should_force_stop_running(
    previous: Vec2,
    current: Vec2,
    facing_right: bool,
    config: &SimConfig,
) -> bool {
    let threshold = config.stop_running_threshold;
    let moving_forward = (facing_right && current.x > 0.0) || (!facing_right && current.x < 0.0);
    previous.x.abs() >= threshold && current.x.abs() < threshold && moving_forward
}

impl Character {
    /// Re-derives this character's state from `velocity` and applies the
    /// transition side effects.
    ///
    /// Returns the deferred actions the caller must arm.
    pub(crate) fn advance_state(
        &mut self,
        velocity: Vec2,
        config: &SimConfig,
        presentation: &mut dyn Presentation,
    ) -> Vec<(Deferred, f32)> {
        let mut deferred = Vec::new();

        self.previous_state = self.current_state;
        let mut derived = determine_state(&self.state_inputs(velocity), config);

        if should_force_stop_running(
            self.previous_velocity,
            velocity,
            self.flags.facing_right(),
            config,
        ) {
            self.flags.insert(ActionFlags::STOP_RUNNING);
            deferred.push((Deferred::ClearStopRunning, self.duration(State::RunningStop)));
            if derived.is_locomotion() {
                derived = State::RunningStop;
            }
        }

        self.current_state = derived;
        self.previous_velocity = velocity;

        if self.previous_state != self.current_state {
            deferred.extend(self.enter_state(presentation));
        }
        deferred
    }

    /// Plays the current state's animation.
    ///
    /// Attack states rotate through the available attack clips. Entering
    /// `Killed` returns the kill finalization to arm once the animation ends.
    pub(crate) fn enter_state(
        &mut self,
        presentation: &mut dyn Presentation,
    ) -> Option<(Deferred, f32)> {
        let state = self.current_state;
        trace!(character = %self.id, from = %self.previous_state, to = %state, "state transition");

        let variant = if state.is_attack() {
            let variant = self.attack_rotation;
            self.attack_rotation = (self.attack_rotation + 1) % self.profile.attack_animation_count();
            variant
        } else {
            0
        };
        presentation.play_animation(self.id, AnimationRequest::state(state, variant));

        (state == State::Killed).then(|| (Deferred::FinalizeKill, self.duration(State::Killed)))
    }
}
