use tracing::debug;

use crate::env::{SimEnv, Vec2};
use crate::fsm::State;
use crate::state::{ActionFlags, CharacterId};
use crate::world::{Deferred, World};

use super::CombatError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DodgeDirection {
    Forward,
    Backward,
}

impl DodgeDirection {
    pub const fn flag(self) -> ActionFlags {
        match self {
            Self::Forward => ActionFlags::DODGING_FORWARD,
            Self::Backward => ActionFlags::DODGING_BACKWARD,
        }
    }

    pub const fn state(self) -> State {
        match self {
            Self::Forward => State::DodgingForward,
            Self::Backward => State::DodgingBackward,
        }
    }
}

impl World {
    pub fn dodge_forward(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), CombatError> {
        self.dodge(id, DodgeDirection::Forward, env)
    }

    pub fn dodge_backward(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), CombatError> {
        self.dodge(id, DodgeDirection::Backward, env)
    }

    /// Rushes the character with invincibility frames until the dodge
    /// animation ends.
    pub fn dodge(
        &mut self,
        id: CharacterId,
        direction: DodgeDirection,
        env: &mut SimEnv<'_>,
    ) -> Result<(), CombatError> {
        let suspended = self.suspend.is_raised();
        let config = &self.config;
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(CombatError::UnknownCharacter(id))?;
        if suspended {
            return Err(CombatError::Suspended);
        }
        if character.flags.is_dodging() {
            return Err(CombatError::AlreadyDodging);
        }
        if character.flags.contains(ActionFlags::DOUBLE_JUMPING) {
            return Err(CombatError::DoubleJumping);
        }

        character
            .flags
            .insert(direction.flag() | ActionFlags::INVINCIBLE);
        character.combo.reset();

        let mut original_damping = 0.0;
        if let Some(body) = character.body {
            original_damping = env.physics.linear_damping(body);
            env.physics.set_damping(body, config.dodge_damping);

            let rush = match direction {
                DodgeDirection::Forward => config.dodge_rush_forward,
                DodgeDirection::Backward => config.dodge_rush_backward,
            };
            let rush_x = if character.flags.facing_right() { rush } else { -rush };
            env.physics
                .set_linear_velocity(body, Vec2::new(rush_x, config.dodge_lift));
        }
        env.presentation.register_after_image(id);

        let duration = character.duration(direction.state());
        self.arm(
            id,
            Deferred::FinishDodge {
                direction,
                damping: original_damping,
            },
            duration,
        );
        debug!(character = %id, %direction, "dodging");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::tests::arena;
    use crate::env::recording::{PresentationCue, TestEnv};

    #[test]
    fn dodge_rushes_with_invincibility() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        fakes.physics.damping.insert(body, 0.5);

        world.dodge_backward(a, &mut fakes.env()).unwrap();

        let flags = world.character(a).unwrap().flags();
        assert!(flags.contains(ActionFlags::DODGING_BACKWARD | ActionFlags::INVINCIBLE));
        assert_eq!(fakes.physics.damping[&body], 4.0);
        assert_eq!(fakes.physics.velocity(body), Vec2::new(-5.0, 0.6));
        assert_eq!(fakes.presentation.cues, vec![PresentationCue::AfterImage(a, true)]);
    }

    #[test]
    fn rush_direction_follows_facing() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        world.set_flag(a, ActionFlags::FACING_RIGHT, false);

        world.dodge_forward(a, &mut fakes.env()).unwrap();

        assert_eq!(fakes.physics.velocity(body), Vec2::new(-7.0, 0.6));
    }

    #[test]
    fn dodge_while_dodging_does_not_rearm() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.dodge_forward(a, &mut fakes.env()).unwrap();
        let pending = world.pending_callbacks();

        assert_eq!(
            world.dodge_backward(a, &mut fakes.env()),
            Err(CombatError::AlreadyDodging)
        );
        assert_eq!(world.pending_callbacks(), pending);
        assert!(!world.character(a).unwrap().flags().contains(ActionFlags::DODGING_BACKWARD));
    }

    #[test]
    fn dodge_rejected_mid_double_jump() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.set_flag(a, ActionFlags::DOUBLE_JUMPING, true);

        assert_eq!(
            world.dodge_forward(a, &mut fakes.env()),
            Err(CombatError::DoubleJumping)
        );
    }

    #[test]
    fn dodge_ends_after_animation() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        fakes.physics.damping.insert(body, 0.5);

        world.dodge_forward(a, &mut fakes.env()).unwrap();
        world.tick(0.1, &mut fakes.env());

        let flags = world.character(a).unwrap().flags();
        assert!(!flags.is_dodging());
        assert!(!flags.contains(ActionFlags::INVINCIBLE));
        assert_eq!(fakes.physics.damping[&body], 0.5);
        assert_eq!(
            fakes.presentation.cues,
            vec![
                PresentationCue::AfterImage(a, true),
                PresentationCue::AfterImage(a, false)
            ]
        );
    }
}
