//! Hit resolution, aggro propagation and death.

use tracing::{debug, info};

use crate::env::{BodyCategory, SimEnv, Vec2};
use crate::state::{ActionFlags, CharacterId};
use crate::world::{Deferred, World};

use super::damage::apply_damage;
use super::{CombatError, DamageOutcome, IgnoreReason};

impl World {
    /// Delivers `amount` from `attacker` to `target` and spreads aggro.
    ///
    /// The target locks onto the attacker. Every live ally of the attacker
    /// locks onto the target unless the target is dying, and every live ally
    /// of the target locks onto the attacker.
    pub fn inflict_damage(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
        amount: u32,
        env: &mut SimEnv<'_>,
    ) -> Result<DamageOutcome, CombatError> {
        if !self.contains(target) {
            return Err(CombatError::MissingTarget(target));
        }
        if !self.contains(attacker) {
            return Err(CombatError::UnknownCharacter(attacker));
        }

        let outcome = self.receive_damage(target, attacker, amount, env)?;

        if let Some(character) = self.characters.get_mut(&target) {
            character.lock_on(attacker);
        }
        let target_dying = self
            .characters
            .get(&target)
            .is_some_and(|c| c.is_dying());
        if !target_dying {
            for ally in self.allies(attacker) {
                if let Some(character) = self.characters.get_mut(&ally) {
                    character.lock_on(target);
                }
            }
        }
        for ally in self.allies(target) {
            if let Some(character) = self.characters.get_mut(&ally) {
                character.lock_on(attacker);
            }
        }

        Ok(outcome)
    }

    /// Applies `amount` of damage from `source` to `receiver`.
    ///
    /// Returns `Ignored` without touching anything if either side is dying or
    /// the receiver is invincible. Lethal damage sets the receiver to kill,
    /// makes its body non-collidable and removes it from the source side's
    /// in-range sets and lock-ons.
    pub fn receive_damage(
        &mut self,
        receiver: CharacterId,
        source: CharacterId,
        amount: u32,
        env: &mut SimEnv<'_>,
    ) -> Result<DamageOutcome, CombatError> {
        let source_dying = self
            .characters
            .get(&source)
            .ok_or(CombatError::MissingSource(source))?
            .is_dying();
        let character = self
            .characters
            .get_mut(&receiver)
            .ok_or(CombatError::UnknownCharacter(receiver))?;

        if source_dying {
            return Ok(DamageOutcome::Ignored(IgnoreReason::SourceDying));
        }
        if character.is_dying() {
            return Ok(DamageOutcome::Ignored(IgnoreReason::ReceiverDying));
        }
        if character.is_invincible() {
            return Ok(DamageOutcome::Ignored(IgnoreReason::Invincible));
        }

        character.profile.health = apply_damage(character.profile.health, amount);
        character.flags.insert(ActionFlags::TAKING_DAMAGE);
        let remaining = character.profile.health;
        let lethal = remaining == 0;
        if lethal {
            character.flags.insert(ActionFlags::SET_TO_KILL);
            if let Some(body) = character.body {
                env.physics.set_body_category(body, BodyCategory::Destroyed);
            }
        }

        env.presentation.show_hit_effect(receiver);
        env.presentation.show_floating_damage(receiver, amount);
        if let Some(sfx) = &character.profile.sfx.hurt {
            env.audio.play_sfx(sfx);
        }

        let duration = self.config.taking_damage_duration;
        self.arm(receiver, Deferred::ClearTakingDamage, duration);

        if !lethal {
            return Ok(DamageOutcome::Damaged { remaining });
        }

        let mut trackers = self.allies(source);
        trackers.push(source);
        for tracker in trackers {
            if let Some(character) = self.characters.get_mut(&tracker) {
                character.forget_target(receiver);
            }
        }
        info!(character = %receiver, killer = %source, "set to kill");
        Ok(DamageOutcome::Killed)
    }

    /// Requests an impulse on `target`'s body.
    pub fn knock_back(
        &mut self,
        target: CharacterId,
        force_x: f32,
        force_y: f32,
        env: &mut SimEnv<'_>,
    ) -> Result<(), CombatError> {
        let character = self
            .characters
            .get(&target)
            .ok_or(CombatError::MissingTarget(target))?;
        if let Some(body) = character.body {
            env.physics.apply_impulse(body, Vec2::new(force_x, force_y));
        }
        Ok(())
    }

    /// Makes `id` alerted and focused on `target`.
    pub fn lock_on(&mut self, id: CharacterId, target: CharacterId) -> Result<(), CombatError> {
        if !self.contains(target) {
            return Err(CombatError::MissingTarget(target));
        }
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(CombatError::UnknownCharacter(id))?;
        character.lock_on(target);
        Ok(())
    }

    /// Runs once the killed animation has played.
    pub(crate) fn finalize_kill(&mut self, id: CharacterId, env: &mut SimEnv<'_>) {
        let Some(character) = self.characters.get_mut(&id) else {
            return;
        };
        if character.is_killed() {
            debug!(character = %id, "already finalized");
            return;
        }

        character.flags.insert(ActionFlags::KILLED);
        if let Some(body) = character.body {
            env.physics.destroy_body(body);
        }
        if let Some(sfx) = &character.profile.sfx.killed {
            env.audio.play_sfx(sfx);
        }
        self.forget_everywhere(id);
        info!(character = %id, "killed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::tests::{arena, fighter};
    use crate::env::recording::{PresentationCue, TestEnv};
    use crate::fsm::State;
    use crate::state::Role;

    #[test]
    fn lethal_damage_clamps_and_sets_kill_once() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.character_mut(t).unwrap().profile_mut().health = 10;
        world.enter_range(a, t).unwrap();

        let outcome = world.receive_damage(t, a, 15, &mut fakes.env()).unwrap();

        assert_eq!(outcome, DamageOutcome::Killed);
        let target = world.character(t).unwrap();
        assert_eq!(target.profile().health, 0);
        assert!(target.flags().contains(ActionFlags::SET_TO_KILL));
        assert!(!world.character(a).unwrap().in_range_targets().contains(&t));
        assert_eq!(
            fakes.physics.categories,
            vec![(target.body().unwrap(), BodyCategory::Destroyed)]
        );

        let again = world.receive_damage(t, a, 15, &mut fakes.env()).unwrap();
        assert_eq!(again, DamageOutcome::Ignored(IgnoreReason::ReceiverDying));
        assert_eq!(fakes.physics.categories.len(), 1);
    }

    #[test]
    fn invincible_receiver_reports_success_without_damage() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.set_flag(t, ActionFlags::INVINCIBLE, true);

        let outcome = world.receive_damage(t, a, 40, &mut fakes.env()).unwrap();

        assert_eq!(outcome, DamageOutcome::Ignored(IgnoreReason::Invincible));
        assert_eq!(world.character(t).unwrap().profile().health, 100);
        assert!(fakes.presentation.cues.is_empty());
    }

    #[test]
    fn dying_source_deals_no_damage() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.set_flag(a, ActionFlags::SET_TO_KILL, true);

        let outcome = world.receive_damage(t, a, 40, &mut fakes.env()).unwrap();
        assert_eq!(outcome, DamageOutcome::Ignored(IgnoreReason::SourceDying));
        assert_eq!(world.character(t).unwrap().profile().health, 100);
    }

    #[test]
    fn unknown_source_or_target_is_rejected() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let ghost = CharacterId(99);

        assert_eq!(
            world.receive_damage(a, ghost, 1, &mut fakes.env()),
            Err(CombatError::MissingSource(ghost))
        );
        assert_eq!(
            world.inflict_damage(a, ghost, 1, &mut fakes.env()),
            Err(CombatError::MissingTarget(ghost))
        );
        assert_eq!(
            world.knock_back(ghost, 1.0, 1.0, &mut fakes.env()),
            Err(CombatError::MissingTarget(ghost))
        );
    }

    #[test]
    fn feedback_cues_fire_on_every_hit() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.character_mut(t).unwrap().profile_mut().sfx.hurt = Some("sfx/hurt.wav".into());

        world.receive_damage(t, a, 5, &mut fakes.env()).unwrap();
        world.receive_damage(t, a, 500, &mut fakes.env()).unwrap();

        assert_eq!(
            fakes.presentation.cues,
            vec![
                PresentationCue::HitEffect(t),
                PresentationCue::FloatingDamage(t, 5),
                PresentationCue::HitEffect(t),
                PresentationCue::FloatingDamage(t, 500),
            ]
        );
        assert_eq!(fakes.audio.played.len(), 2);
    }

    #[test]
    fn taking_damage_clears_after_duration() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();

        world.receive_damage(t, a, 5, &mut fakes.env()).unwrap();
        assert!(world.character(t).unwrap().flags().contains(ActionFlags::TAKING_DAMAGE));

        world.tick(0.25, &mut fakes.env());
        assert!(!world.character(t).unwrap().flags().contains(ActionFlags::TAKING_DAMAGE));
    }

    #[test]
    fn aggro_spreads_across_both_parties() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        let a1 = fighter(&mut world, Role::Npc, 100);
        let t1 = fighter(&mut world, Role::Npc, 100);
        let attackers = world.create_party(a).unwrap();
        world.join_party(attackers, a1).unwrap();
        let defenders = world.create_party(t).unwrap();
        world.join_party(defenders, t1).unwrap();

        world.inflict_damage(a, t, 5, &mut fakes.env()).unwrap();

        assert_eq!(world.character(t).unwrap().locked_on(), Some(a));
        assert_eq!(world.character(t1).unwrap().locked_on(), Some(a));
        assert_eq!(world.character(a1).unwrap().locked_on(), Some(t));
        assert!(world.character(t1).unwrap().flags().contains(ActionFlags::ALERTED));
    }

    #[test]
    fn attacker_allies_skip_dying_target() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        let a1 = fighter(&mut world, Role::Npc, 100);
        let party = world.create_party(a).unwrap();
        world.join_party(party, a1).unwrap();
        world.enter_range(a1, t).unwrap();
        world.lock_on(a1, t).unwrap();

        world.inflict_damage(a, t, 1000, &mut fakes.env()).unwrap();

        let ally = world.character(a1).unwrap();
        assert_eq!(ally.locked_on(), None);
        assert!(ally.in_range_targets().is_empty());
    }

    #[test]
    fn killed_state_finalizes_after_animation() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.character_mut(t).unwrap().profile_mut().sfx.killed = Some("sfx/death.wav".into());
        world.receive_damage(t, a, 1000, &mut fakes.env()).unwrap();

        world.tick(0.0, &mut fakes.env());
        assert_eq!(world.character(t).unwrap().current_state(), State::Killed);
        assert!(!world.character(t).unwrap().is_killed());

        world.tick(0.25, &mut fakes.env());
        let target = world.character(t).unwrap();
        assert!(target.is_killed());
        assert_eq!(fakes.physics.destroyed, vec![target.body().unwrap()]);
        assert_eq!(fakes.audio.played, vec!["sfx/death.wav".to_owned()]);
    }
}
