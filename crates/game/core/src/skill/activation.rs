use tracing::debug;

use crate::env::{AnimationRequest, SimEnv};
use crate::state::{ActionFlags, ActiveSkillId, CharacterId};
use crate::world::{Deferred, World};

use super::{ActiveSkill, SkillError, SkillProfile};

impl World {
    /// Activates a learned skill.
    ///
    /// The caster's animation channel belongs to the skill for its frames
    /// duration; state derivation resumes with a forced transition afterwards.
    /// The executing copy pays the costs, starts the cooldown and expires
    /// after its lifetime.
    pub fn activate_skill(
        &mut self,
        id: CharacterId,
        name: &str,
        env: &mut SimEnv<'_>,
    ) -> Result<ActiveSkillId, SkillError> {
        if self.suspend.is_raised() {
            return Err(SkillError::Suspended);
        }
        let character = self
            .characters
            .get(&id)
            .ok_or(SkillError::UnknownCharacter(id))?;
        if character.flags.contains(ActionFlags::USING_SKILL) {
            return Err(SkillError::AlreadyUsingSkill);
        }
        let skill = character
            .skills
            .get(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_owned()))?;
        skill.can_activate(&character.profile)?;
        let profile = skill.profile().clone();

        let target = profile.strike.and_then(|_| {
            character
                .in_range
                .iter()
                .copied()
                .find(|&target| self.is_live(target))
        });

        let active = ActiveSkillId(self.next_active_skill);
        self.next_active_skill += 1;

        let Some(character) = self.characters.get_mut(&id) else {
            return Err(SkillError::UnknownCharacter(id));
        };
        character.flags.insert(ActionFlags::USING_SKILL);
        character.current_skill = Some(profile.name.clone());
        character.profile.magicka -= profile.magicka_cost;
        character.profile.stamina -= profile.stamina_cost;
        if let Some(skill) = character.skills.get_mut(name) {
            skill.start_cooldown();
        }
        if let Some(target) = target {
            character.locked_on = Some(target);
        }
        character.active_skills.insert(
            active,
            ActiveSkill {
                id: active,
                profile: profile.clone(),
            },
        );

        if let Some(clip) = &profile.character_clip {
            env.presentation
                .play_animation(id, AnimationRequest::named(clip.clone(), profile.frame_interval));
        }
        env.presentation.refresh_status_bars();

        self.arm(id, Deferred::FinishSkill, profile.frames_duration);
        self.arm(id, Deferred::ExpireSkill(active), profile.lifetime);
        if let (Some(strike), Some(_)) = (profile.strike, target) {
            for hit in 1..=strike.hits {
                self.arm(id, Deferred::AttackHit, strike.interval * hit as f32);
            }
        }

        debug!(character = %id, skill = %profile.name, active = active.0, "skill activated");
        Ok(active)
    }

    pub fn learn_skill(&mut self, id: CharacterId, profile: SkillProfile) -> Result<(), SkillError> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SkillError::UnknownCharacter(id))?;
        character.skills.learn(profile)
    }

    pub fn forget_skill(&mut self, id: CharacterId, name: &str) -> Result<SkillProfile, SkillError> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(SkillError::UnknownCharacter(id))?;
        character.skills.forget(name)
    }
}
