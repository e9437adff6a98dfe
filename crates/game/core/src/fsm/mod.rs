//! Character state machine.
//!
//! `state` defines the closed set of behavior labels, `transition` derives the
//! label for a tick and applies its side effects, and `movement` holds the
//! movement intents that set the flags derivation reads.
mod movement;
mod state;
mod transition;

pub use movement::MovementError;
pub use state::State;
pub use transition::{
    Guard, PRIORITY, StateInputs, determine_state, resolve_attack_state, should_force_stop_running,
};
