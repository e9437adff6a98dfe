use tracing::{debug, trace};

use crate::env::{AnimationRequest, BodyHandle, FixtureKind, SimEnv, Vec2};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActionFlags, Character, CharacterId};
use crate::world::{Deferred, World};

use super::State;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MovementError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("world is suspended")]
    Suspended,

    #[error("character {0} has no body")]
    NoBody(CharacterId),

    #[error("current posture does not allow this move")]
    Posture,

    #[error("jump is locked or already used")]
    JumpUnavailable,

    #[error("character is not standing on a platform")]
    NotOnPlatform,
}

impl GameError for MovementError {
    fn severity(&self) -> ErrorSeverity {
        use MovementError::*;
        match self {
            Suspended | Posture | JumpUnavailable | NotOnPlatform => ErrorSeverity::Recoverable,
            UnknownCharacter(_) | NoBody(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use MovementError::*;
        match self {
            UnknownCharacter(_) => "MOVEMENT_UNKNOWN_CHARACTER",
            Suspended => "MOVEMENT_SUSPENDED",
            NoBody(_) => "MOVEMENT_NO_BODY",
            Posture => "MOVEMENT_POSTURE",
            JumpUnavailable => "MOVEMENT_JUMP_UNAVAILABLE",
            NotOnPlatform => "MOVEMENT_NOT_ON_PLATFORM",
        }
    }
}

impl World {
    fn mover(&mut self, id: CharacterId) -> Result<(&mut Character, BodyHandle), MovementError> {
        if self.suspend.is_raised() {
            return Err(MovementError::Suspended);
        }
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(MovementError::UnknownCharacter(id))?;
        let body = character.body.ok_or(MovementError::NoBody(id))?;
        Ok((character, body))
    }

    pub fn move_left(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        self.walk(id, false, env)
    }

    pub fn move_right(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        self.walk(id, true, env)
    }

    /// Turns the character and pushes it along, up to twice its move speed.
    ///
    /// Crouching or getting up only turns it around.
    fn walk(&mut self, id: CharacterId, right: bool, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        let (character, body) = self.mover(id)?;
        character.flags.set(ActionFlags::FACING_RIGHT, right);
        if character
            .flags
            .intersects(ActionFlags::CROUCHING | ActionFlags::GETTING_UP)
        {
            return Ok(());
        }

        let speed = character.profile.move_speed;
        let velocity = env.physics.linear_velocity(body);
        let start = velocity.x == 0.0;
        let under_cap = if right {
            velocity.x <= speed * 2.0
        } else {
            velocity.x >= -speed * 2.0
        };
        if under_cap {
            let push = if right { speed } else { -speed };
            env.physics.apply_impulse(body, Vec2::new(push, 0.0));
        }

        if start {
            self.start_running(id)?;
        }
        Ok(())
    }

    /// Jumps, or double jumps when already airborne and the profile allows it.
    pub fn jump(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        let lock = self.config.jump_lock;
        let (character, body) = self.mover(id)?;
        let flags = character.flags;
        let can_double = character.profile.can_double_jump;
        if flags.contains(ActionFlags::JUMP_LOCKED)
            || (!can_double && flags.contains(ActionFlags::JUMPING))
            || (can_double && flags.contains(ActionFlags::DOUBLE_JUMPING))
        {
            return Err(MovementError::JumpUnavailable);
        }

        if flags.contains(ActionFlags::JUMPING) {
            character.flags.insert(ActionFlags::DOUBLE_JUMPING);
            env.presentation
                .play_animation(id, AnimationRequest::state(State::Jumping, 0));
            let velocity = env.physics.linear_velocity(body);
            env.physics
                .set_linear_velocity(body, Vec2::new(velocity.x, 0.0));
        }

        character
            .flags
            .insert(ActionFlags::JUMPING | ActionFlags::JUMP_LOCKED);
        let height = character.profile.jump_height;
        env.physics.apply_impulse(body, Vec2::new(0.0, height));

        self.arm(id, Deferred::UnlockJump, lock);
        trace!(character = %id, "jump");
        Ok(())
    }

    /// Jumps now and again once the double-jump delay has passed.
    pub fn double_jump(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        self.jump(id, env)?;
        let delay = self.config.double_jump_delay;
        self.arm(id, Deferred::Jump, delay);
        Ok(())
    }

    /// Drops through the one-way platform the character stands on.
    pub fn jump_down(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        let window = self.config.jump_down_window;
        let (character, body) = self.mover(id)?;
        if !character.flags.contains(ActionFlags::ON_PLATFORM) {
            return Err(MovementError::NotOnPlatform);
        }
        env.physics.set_feet_sensor(body, true);
        self.arm(id, Deferred::RestoreFeet, window);
        Ok(())
    }

    pub fn crouch(&mut self, id: CharacterId, env: &mut SimEnv<'_>) -> Result<(), MovementError> {
        let (character, body) = self.mover(id)?;
        if character.flags.contains(ActionFlags::CROUCHING) {
            return Ok(());
        }
        if character.flags.contains(ActionFlags::JUMPING) {
            return Err(MovementError::Posture);
        }
        character.flags.insert(ActionFlags::CROUCHING);
        reshape(character, body, env);
        Ok(())
    }

    pub fn get_up_from_crouching(
        &mut self,
        id: CharacterId,
        env: &mut SimEnv<'_>,
    ) -> Result<(), MovementError> {
        let (character, body) = self.mover(id)?;
        if !character.flags.contains(ActionFlags::CROUCHING) {
            return Ok(());
        }
        character.flags.remove(ActionFlags::CROUCHING);
        reshape(character, body, env);
        Ok(())
    }

    /// Plays the get-up recovery; attacks and walking are blocked meanwhile.
    pub fn get_up_from_falling(&mut self, id: CharacterId) -> Result<(), MovementError> {
        if self.suspend.is_raised() {
            return Err(MovementError::Suspended);
        }
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(MovementError::UnknownCharacter(id))?;
        character.flags.insert(ActionFlags::GETTING_UP);
        let duration = character.duration(State::FallingGetup);
        self.arm(id, Deferred::FinishGetUp, duration);
        Ok(())
    }

    /// Contact with the ground or a platform.
    ///
    /// The landing itself always applies. While the world is suspended a hard
    /// landing skips the get-up recovery instead of arming its timer.
    pub fn land(
        &mut self,
        id: CharacterId,
        on_platform: bool,
        env: &mut SimEnv<'_>,
    ) -> Result<(), MovementError> {
        let hard_landing = self.config.hard_landing_velocity;
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(MovementError::UnknownCharacter(id))?;
        let impact = character
            .body
            .map_or(Vec2::ZERO, |body| env.physics.linear_velocity(body));

        character
            .flags
            .remove(ActionFlags::JUMPING | ActionFlags::DOUBLE_JUMPING);
        character.flags.set(ActionFlags::ON_PLATFORM, on_platform);
        if let Some(sfx) = &character.profile.sfx.jump {
            env.audio.play_sfx(sfx);
        }

        if impact.y < hard_landing {
            if self.suspend.is_raised() {
                debug!(character = %id, velocity = impact.y, "hard landing while suspended, no get-up");
            } else {
                debug!(character = %id, velocity = impact.y, "hard landing");
                self.get_up_from_falling(id)?;
            }
        }
        Ok(())
    }

    pub fn start_running(&mut self, id: CharacterId) -> Result<(), MovementError> {
        self.pulse(id, ActionFlags::START_RUNNING, State::RunningStart, Deferred::ClearStartRunning)
    }

    pub fn stop_running(&mut self, id: CharacterId) -> Result<(), MovementError> {
        self.pulse(id, ActionFlags::STOP_RUNNING, State::RunningStop, Deferred::ClearStopRunning)
    }

    /// Raises `flag` for the duration of `state`'s animation.
    fn pulse(
        &mut self,
        id: CharacterId,
        flag: ActionFlags,
        state: State,
        clear: Deferred,
    ) -> Result<(), MovementError> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(MovementError::UnknownCharacter(id))?;
        character.flags.insert(flag);
        let duration = character.duration(state);
        self.arm(id, clear, duration);
        Ok(())
    }
}

fn reshape(character: &Character, body: BodyHandle, env: &mut SimEnv<'_>) {
    let shape = character.fixture_shape();
    env.physics.redefine_fixture(body, FixtureKind::Body, shape);
    env.physics.redefine_fixture(body, FixtureKind::Weapon, shape);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::tests::arena;
    use crate::env::Clip;
    use crate::env::recording::TestEnv;

    #[test]
    fn walking_turns_and_starts_running_from_rest() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();

        world.move_left(a, &mut fakes.env()).unwrap();

        let character = world.character(a).unwrap();
        assert!(!character.flags().facing_right());
        assert!(character.flags().contains(ActionFlags::START_RUNNING));
        assert_eq!(fakes.physics.impulses, vec![(character.body().unwrap(), Vec2::new(-0.25, 0.0))]);
    }

    #[test]
    fn walking_is_capped_at_twice_move_speed() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        fakes.physics.velocities.insert(body, Vec2::new(0.6, 0.0));

        world.move_right(a, &mut fakes.env()).unwrap();

        assert!(fakes.physics.impulses.is_empty());
        assert!(!world.character(a).unwrap().flags().contains(ActionFlags::START_RUNNING));
    }

    #[test]
    fn crouching_only_turns() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.crouch(a, &mut fakes.env()).unwrap();

        world.move_left(a, &mut fakes.env()).unwrap();

        assert!(!world.character(a).unwrap().flags().facing_right());
        assert!(fakes.physics.impulses.is_empty());
    }

    #[test]
    fn jump_locks_until_timer_fires() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();

        world.jump(a, &mut fakes.env()).unwrap();
        assert!(world.character(a).unwrap().flags().contains(ActionFlags::JUMPING));
        assert_eq!(world.jump(a, &mut fakes.env()), Err(MovementError::JumpUnavailable));

        world.tick(0.2, &mut fakes.env());
        assert!(!world.character(a).unwrap().flags().contains(ActionFlags::JUMP_LOCKED));
        // the default profile cannot double jump
        assert_eq!(world.jump(a, &mut fakes.env()), Err(MovementError::JumpUnavailable));
    }

    #[test]
    fn double_jump_resets_vertical_velocity() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.character_mut(a).unwrap().profile_mut().can_double_jump = true;
        let body = world.character(a).unwrap().body().unwrap();

        world.double_jump(a, &mut fakes.env()).unwrap();
        fakes.physics.velocities.insert(body, Vec2::new(0.3, 1.5));
        world.tick(0.25, &mut fakes.env());

        let flags = world.character(a).unwrap().flags();
        assert!(flags.contains(ActionFlags::DOUBLE_JUMPING));
        assert_eq!(fakes.physics.velocity(body), Vec2::new(0.3, 0.0));
        assert_eq!(fakes.physics.impulses.len(), 2);
        assert!(fakes.presentation.animations.iter().any(|(_, request)| matches!(
            request.clip,
            Clip::State { state: State::Jumping, .. }
        )));
    }

    #[test]
    fn jump_down_requires_platform() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        assert_eq!(world.jump_down(a, &mut fakes.env()), Err(MovementError::NotOnPlatform));

        world.land(a, true, &mut fakes.env()).unwrap();
        world.jump_down(a, &mut fakes.env()).unwrap();
        world.tick(0.25, &mut fakes.env());

        let body = world.character(a).unwrap().body().unwrap();
        assert_eq!(fakes.physics.feet_sensor, vec![(body, true), (body, false)]);
    }

    #[test]
    fn crouch_reshapes_body_and_weapon() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();

        world.crouch(a, &mut fakes.env()).unwrap();
        world.crouch(a, &mut fakes.env()).unwrap();
        world.get_up_from_crouching(a, &mut fakes.env()).unwrap();

        let kinds: Vec<FixtureKind> = fakes.physics.fixtures.iter().map(|(_, kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![FixtureKind::Body, FixtureKind::Weapon, FixtureKind::Body, FixtureKind::Weapon]
        );
        assert!(fakes.physics.fixtures[0].2.crouching);
        assert!(!fakes.physics.fixtures[2].2.crouching);
    }

    #[test]
    fn crouch_rejected_midair() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.jump(a, &mut fakes.env()).unwrap();
        assert_eq!(world.crouch(a, &mut fakes.env()), Err(MovementError::Posture));
    }

    #[test]
    fn hard_landing_triggers_get_up() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        world.character_mut(a).unwrap().profile_mut().sfx.jump = Some("sfx/jump.wav".into());
        world.jump(a, &mut fakes.env()).unwrap();
        fakes.physics.velocities.insert(body, Vec2::new(0.0, -5.0));

        world.land(a, false, &mut fakes.env()).unwrap();

        let flags = world.character(a).unwrap().flags();
        assert!(flags.contains(ActionFlags::GETTING_UP));
        assert!(!flags.contains(ActionFlags::JUMPING));
        assert_eq!(fakes.audio.played, vec!["sfx/jump.wav".to_owned()]);
    }

    #[test]
    fn soft_landing_keeps_character_standing() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        fakes.physics.velocities.insert(body, Vec2::new(0.0, -4.0));

        world.land(a, false, &mut fakes.env()).unwrap();

        assert!(!world.character(a).unwrap().flags().contains(ActionFlags::GETTING_UP));
    }

    #[test]
    fn intents_rejected_while_suspended() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        world.suspend_flag().raise();

        assert_eq!(world.move_right(a, &mut fakes.env()), Err(MovementError::Suspended));
        assert_eq!(world.jump(a, &mut fakes.env()), Err(MovementError::Suspended));
        assert_eq!(world.get_up_from_falling(a), Err(MovementError::Suspended));
        assert_eq!(world.pending_gauge().get(), 0);
    }

    #[test]
    fn hard_landing_while_suspended_arms_nothing() {
        let (mut world, a, _) = arena();
        let mut fakes = TestEnv::default();
        let body = world.character(a).unwrap().body().unwrap();
        world.set_flag(a, ActionFlags::JUMPING, true);
        world.suspend_flag().raise();
        fakes.physics.velocities.insert(body, Vec2::new(0.0, -6.0));

        world.land(a, false, &mut fakes.env()).unwrap();

        let flags = world.character(a).unwrap().flags();
        assert!(!flags.contains(ActionFlags::JUMPING));
        assert!(!flags.contains(ActionFlags::GETTING_UP));
        assert_eq!(world.pending_gauge().get(), 0);
    }
}
