//! Deferred character actions.
//!
//! Callbacks never capture a character. They carry the target's id and are
//! resolved against the registry when they fire; if the character has been
//! removed in the meantime the callback does nothing.

use tracing::{debug, trace};

use crate::combat::DodgeDirection;
use crate::env::SimEnv;
use crate::fsm::State;
use crate::scheduler::TimerId;
use crate::state::{ActionFlags, ActiveSkillId, CharacterId};

use super::World;

/// What a deferred callback does when it fires.
#[derive(Clone, Debug, PartialEq)]
pub enum Deferred {
    ClearStartRunning,
    ClearStopRunning,
    UnlockJump,
    /// Second half of a double jump.
    Jump,
    /// Makes the feet fixture solid again after dropping through a platform.
    RestoreFeet,
    FinishGetUp,
    FinishDodge {
        direction: DodgeDirection,
        damping: f32,
    },
    FinishAttack,
    /// One damage and knockback application against the locked-on target.
    AttackHit,
    /// Returns the animation channel to state derivation.
    FinishSkill,
    ExpireSkill(ActiveSkillId),
    ClearTakingDamage,
    /// Marks the character killed, destroys its body and plays the killed sfx.
    FinalizeKill,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CharacterTimer {
    pub target: CharacterId,
    pub action: Deferred,
}

impl World {
    pub(crate) fn arm(&mut self, target: CharacterId, action: Deferred, delay: f32) -> TimerId {
        trace!(character = %target, ?action, delay, "arming callback");
        self.scheduler
            .run_after(CharacterTimer { target, action }, delay)
    }

    /// Pending callbacks addressed to `target`.
    pub fn pending_for(&self, target: CharacterId) -> impl Iterator<Item = &Deferred> {
        self.scheduler
            .pending()
            .filter(move |timer| timer.target == target)
            .map(|timer| &timer.action)
    }

    pub(crate) fn dispatch(&mut self, timer: CharacterTimer, env: &mut SimEnv<'_>) {
        let CharacterTimer { target, action } = timer;
        let Some(character) = self.characters.get_mut(&target) else {
            trace!(character = %target, ?action, "callback target gone");
            return;
        };

        match action {
            Deferred::ClearStartRunning => character.flags.remove(ActionFlags::START_RUNNING),
            Deferred::ClearStopRunning => character.flags.remove(ActionFlags::STOP_RUNNING),
            Deferred::UnlockJump => character.flags.remove(ActionFlags::JUMP_LOCKED),
            Deferred::FinishGetUp => character.flags.remove(ActionFlags::GETTING_UP),
            Deferred::ClearTakingDamage => character.flags.remove(ActionFlags::TAKING_DAMAGE),
            Deferred::RestoreFeet => {
                if let Some(body) = character.body {
                    env.physics.set_feet_sensor(body, false);
                }
            }
            Deferred::FinishDodge { direction, damping } => {
                env.presentation.unregister_after_image(target);
                if let Some(body) = character.body {
                    env.physics.set_damping(body, damping);
                }
                character.flags.remove(ActionFlags::INVINCIBLE | direction.flag());
            }
            Deferred::FinishAttack => {
                character.flags.remove(ActionFlags::ATTACKING);
                character.attack_override = None;
            }
            Deferred::FinishSkill => {
                character.flags.remove(ActionFlags::USING_SKILL);
                character.current_state = State::ForceUpdate;
                character.current_skill = None;
            }
            Deferred::ExpireSkill(skill) => {
                character.active_skills.remove(&skill);
            }
            Deferred::Jump => {
                if let Err(error) = self.jump(target, env) {
                    debug!(character = %target, %error, "second jump rejected");
                }
            }
            Deferred::AttackHit => self.land_hit(target, env),
            Deferred::FinalizeKill => self.finalize_kill(target, env),
        }
    }
}
