use tracing::{debug, error};

use crate::env::SimEnv;
use crate::fsm::State;
use crate::state::{ActionFlags, CharacterId, Role};
use crate::world::{Deferred, World};

use super::CombatError;

impl World {
    /// Starts an attack of the given variant.
    ///
    /// Locks onto the first live in-range target and arms `hit_count` hits
    /// spaced `hit_interval` apart. NPC hits land after an extra wind-up.
    /// Nothing is armed against an invincible target.
    pub fn attack(
        &mut self,
        id: CharacterId,
        kind: State,
        hit_count: u32,
        hit_interval: f32,
    ) -> Result<(), CombatError> {
        if !kind.is_attack() {
            error!(character = %id, %kind, "attack requested with a non-attack state");
            return Err(CombatError::NotAnAttack(kind));
        }

        let character = self
            .characters
            .get(&id)
            .ok_or(CombatError::UnknownCharacter(id))?;
        if self.suspend.is_raised() {
            return Err(CombatError::Suspended);
        }
        if character.flags.contains(ActionFlags::ATTACKING) || character.current_state.is_attack()
        {
            return Err(CombatError::AlreadyAttacking);
        }
        if character.flags.contains(ActionFlags::GETTING_UP) {
            return Err(CombatError::GettingUp);
        }

        let target = character
            .in_range
            .iter()
            .copied()
            .find(|&target| self.is_live(target));
        let target_invincible = target
            .and_then(|target| self.characters.get(&target))
            .is_some_and(|target| target.is_invincible());
        let duration = character.duration(kind);
        let wind_up = match character.role {
            Role::Player => 0.0,
            Role::Npc => self.config.npc_hit_delay,
        };

        if let Some(character) = self.characters.get_mut(&id) {
            character.flags.insert(ActionFlags::ATTACKING);
            if kind != State::Attacking {
                character.attack_override = Some(kind);
            }
            character.combo.register(kind);
            if let Some(target) = target {
                character.locked_on = Some(target);
            }
        }
        self.arm(id, Deferred::FinishAttack, duration);

        if let Some(target) = target
            && !target_invincible
        {
            for hit in 1..=hit_count {
                self.arm(id, Deferred::AttackHit, wind_up + hit_interval * hit as f32);
            }
            debug!(character = %id, %target, hits = hit_count, "attack armed");
        }
        Ok(())
    }

    /// One armed hit: damage and knockback against the current lock-on.
    pub(crate) fn land_hit(&mut self, id: CharacterId, env: &mut SimEnv<'_>) {
        let Some(target) = self.resolve_lock_on(id) else {
            debug!(character = %id, "hit has no live target");
            return;
        };
        let Ok(amount) = self.damage_output(id) else {
            return;
        };
        if let Err(error) = self.inflict_damage(id, target, amount, env) {
            debug!(character = %id, %target, %error, "hit rejected");
            return;
        }

        let facing_right = self
            .characters
            .get(&id)
            .is_some_and(|c| c.flags.facing_right());
        let force = self.config.knockback;
        let force_x = if facing_right { force.x } else { -force.x };
        if let Err(error) = self.knock_back(target, force_x, force.y, env) {
            debug!(character = %id, %target, %error, "knockback rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::tests::{arena, fighter};
    use crate::env::recording::TestEnv;

    #[test]
    fn invalid_kind_leaves_flags_unchanged() {
        let (mut world, a, _) = arena();
        let before = world.character(a).unwrap().flags();

        for kind in [State::Idle, State::Killed, State::Spellcast, State::ForceUpdate] {
            assert_eq!(world.attack(a, kind, 1, 0.1), Err(CombatError::NotAnAttack(kind)));
        }

        assert_eq!(world.character(a).unwrap().flags(), before);
        assert_eq!(world.pending_callbacks(), 0);
    }

    #[test]
    fn attack_pins_override_and_arms_hits() {
        let (mut world, a, t) = arena();
        world.enter_range(a, t).unwrap();

        world.attack(a, State::AttackingForward, 2, 0.1).unwrap();

        let attacker = world.character(a).unwrap();
        assert!(attacker.flags().contains(ActionFlags::ATTACKING));
        assert_eq!(attacker.attack_override(), Some(State::AttackingForward));
        assert_eq!(attacker.locked_on(), Some(t));
        assert_eq!(attacker.combo().len(), 1);

        let hits = world
            .pending_for(a)
            .filter(|action| **action == Deferred::AttackHit)
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn plain_attack_does_not_pin_override() {
        let (mut world, a, _) = arena();
        world.attack(a, State::Attacking, 1, 0.1).unwrap();
        assert_eq!(world.character(a).unwrap().attack_override(), None);
    }

    #[test]
    fn second_attack_is_rejected_while_attacking() {
        let (mut world, a, _) = arena();
        world.attack(a, State::Attacking, 1, 0.1).unwrap();
        let pending = world.pending_callbacks();

        assert_eq!(
            world.attack(a, State::AttackingUpward, 1, 0.1),
            Err(CombatError::AlreadyAttacking)
        );
        assert_eq!(world.pending_callbacks(), pending);
    }

    #[test]
    fn attack_rejected_while_getting_up() {
        let (mut world, a, _) = arena();
        world.set_flag(a, ActionFlags::GETTING_UP, true);
        assert_eq!(world.attack(a, State::Attacking, 1, 0.1), Err(CombatError::GettingUp));
    }

    #[test]
    fn invincible_target_arms_no_hits() {
        let (mut world, a, t) = arena();
        world.enter_range(a, t).unwrap();
        world.set_flag(t, ActionFlags::INVINCIBLE, true);

        world.attack(a, State::Attacking, 3, 0.1).unwrap();

        assert_eq!(world.pending_for(a).count(), 1);
        assert_eq!(world.character(a).unwrap().locked_on(), Some(t));
    }

    #[test]
    fn hits_land_damage_and_knockback() {
        let (mut world, a, t) = arena();
        let mut fakes = TestEnv::default();
        world.enter_range(a, t).unwrap();

        world.attack(a, State::Attacking, 1, 0.1).unwrap();
        world.tick(0.1, &mut fakes.env());

        let target = world.character(t).unwrap();
        assert_eq!(target.profile().health, 90);
        assert_eq!(target.locked_on(), Some(a));
        assert_eq!(fakes.physics.impulses.len(), 1);
        let (_, impulse) = fakes.physics.impulses[0];
        assert_eq!((impulse.x, impulse.y), (0.5, 1.0));
    }

    #[test]
    fn npc_hits_wait_for_wind_up() {
        let mut world = World::new(crate::config::SimConfig::default().without_jitter());
        let mut fakes = TestEnv::default();
        let npc = fighter(&mut world, Role::Npc, 100);
        let player = fighter(&mut world, Role::Player, 100);
        world.enter_range(npc, player).unwrap();

        world.attack(npc, State::Attacking, 1, 0.1).unwrap();
        world.tick(0.25, &mut fakes.env());
        assert_eq!(world.character(player).unwrap().profile().health, 100);

        world.tick(0.3, &mut fakes.env());
        assert_eq!(world.character(player).unwrap().profile().health, 90);
    }
}
