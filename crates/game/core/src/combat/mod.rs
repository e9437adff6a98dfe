//! Combat resolution.
//!
//! Attacks, dodges, damage and aggro are `World` operations because every one
//! of them touches more than one character. Deferred hits and dodge recovery
//! resolve their character by id when they fire.
//!
//! - `attack`: starts an attack and arms its hits
//! - `inflict_damage` / `receive_damage`: hit resolution and aggro spread
//! - `damage_output`: base + weapon + jitter
//! - `dodge`: invincibility frames with a physics rush

mod attack;
mod combo;
mod damage;
mod dodge;
mod error;
mod resolve;

pub use combo::ComboTracker;
pub use damage::{DamageOutcome, IgnoreReason, apply_damage, melee_damage};
pub use dodge::DodgeDirection;
pub use error::CombatError;
