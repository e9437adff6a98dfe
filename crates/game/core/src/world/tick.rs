use crate::env::{FixtureKind, SimEnv, Vec2};
use crate::state::{ActionFlags, CharacterId};

use super::World;

/// What one call to [`World::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Deferred callbacks that fired, including ones whose target was gone.
    pub fired: usize,
    /// Characters whose state changed this tick.
    pub transitions: usize,
}

impl World {
    /// Advances the simulation by `delta` seconds.
    ///
    /// Due callbacks fire first, in the order they were armed. Then every
    /// character is updated in id order.
    pub fn tick(&mut self, delta: f32, env: &mut SimEnv<'_>) -> TickReport {
        let due = self.scheduler.advance(delta);
        let fired = due.len();
        for timer in due {
            self.dispatch(timer, env);
        }
        self.scheduler.settle();

        let ids: Vec<CharacterId> = self.characters.keys().copied().collect();
        let transitions = ids
            .into_iter()
            .filter(|&id| self.update_character(id, delta, env))
            .count();

        TickReport { fired, transitions }
    }

    /// Returns whether the character's state changed.
    fn update_character(&mut self, id: CharacterId, delta: f32, env: &mut SimEnv<'_>) -> bool {
        let config = &self.config;
        let Some(character) = self.characters.get_mut(&id) else {
            return false;
        };
        if character.is_killed() {
            return false;
        }
        let body = character.body;

        if character.flags.facing_right() != character.fixture_facing_right {
            character.fixture_facing_right = character.flags.facing_right();
            if let Some(body) = body {
                env.physics
                    .redefine_fixture(body, FixtureKind::Weapon, character.fixture_shape());
            }
        }

        if !character.is_dying() {
            character.regen_timer += delta;
            if character.regen_timer >= config.regen_interval {
                character.regen_timer = 0.0;
                character.profile.regenerate();
                env.presentation.refresh_status_bars();
            }
        }

        character.combo.update(delta);
        character.skills.tick_cooldowns(delta);

        // Skills own the animation channel until FinishSkill fires.
        if character.flags.contains(ActionFlags::USING_SKILL) {
            return false;
        }

        let velocity = body.map_or(Vec2::ZERO, |body| env.physics.linear_velocity(body));
        let deferred = character.advance_state(velocity, config, &mut *env.presentation);
        let changed = character.previous_state != character.current_state;

        for (action, delay) in deferred {
            self.arm(id, action, delay);
        }
        changed
    }
}
