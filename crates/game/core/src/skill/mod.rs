//! Learned skills and their executing copies.
//!
//! Learning stores one [`Skill`] per name, indexed by kind. Activation never
//! runs the learned skill itself: it creates an [`ActiveSkill`] copy with its
//! own id and lifetime, so the same skill can have several copies in flight.
mod activation;

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ErrorSeverity, GameError};
use crate::state::{ActiveSkillId, CharacterId, CharacterProfile};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SkillKind {
    Physical,
    Magic,
    Buff,
}

/// Hits a skill lands on the caster's first live in-range target.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStrike {
    pub hits: u32,
    pub interval: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillProfile {
    pub name: String,
    pub kind: SkillKind,
    /// Seconds the caster's animation channel is owned by the skill.
    pub frames_duration: f32,
    /// Caster clip to play, if the skill animates the character.
    pub character_clip: Option<String>,
    pub frame_interval: f32,
    pub magicka_cost: u32,
    pub stamina_cost: u32,
    pub cooldown: f32,
    /// Seconds an active copy lives before it is discarded.
    pub lifetime: f32,
    pub strike: Option<SkillStrike>,
}

impl SkillProfile {
    pub fn new(name: impl Into<String>, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }
}

impl Default for SkillProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: SkillKind::Physical,
            frames_duration: 0.5,
            character_clip: None,
            frame_interval: 0.1,
            magicka_cost: 0,
            stamina_cost: 0,
            cooldown: 0.0,
            lifetime: 0.5,
            strike: None,
        }
    }
}

/// A learned skill.
#[derive(Clone, Debug, PartialEq)]
pub struct Skill {
    profile: SkillProfile,
    cooldown_remaining: f32,
}

impl Skill {
    pub fn new(profile: SkillProfile) -> Self {
        Self {
            profile,
            cooldown_remaining: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn profile(&self) -> &SkillProfile {
        &self.profile
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Checks costs and cooldown against the caster.
    pub fn can_activate(&self, caster: &CharacterProfile) -> Result<(), SkillError> {
        if self.cooldown_remaining > 0.0 {
            return Err(SkillError::CoolingDown {
                remaining: self.cooldown_remaining,
            });
        }
        if caster.magicka < self.profile.magicka_cost {
            return Err(SkillError::InsufficientMagicka {
                required: self.profile.magicka_cost,
                available: caster.magicka,
            });
        }
        if caster.stamina < self.profile.stamina_cost {
            return Err(SkillError::InsufficientStamina {
                required: self.profile.stamina_cost,
                available: caster.stamina,
            });
        }
        Ok(())
    }

    fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.profile.cooldown;
    }
}

/// One executing copy of a learned skill.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveSkill {
    pub id: ActiveSkillId,
    pub profile: SkillProfile,
}

#[derive(Clone, Debug, Default)]
pub struct SkillBook {
    learned: BTreeMap<String, Skill>,
    by_kind: BTreeMap<SkillKind, BTreeSet<String>>,
}

impl SkillBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn learn(&mut self, profile: SkillProfile) -> Result<(), SkillError> {
        if self.learned.contains_key(&profile.name) {
            return Err(SkillError::AlreadyLearned(profile.name));
        }
        self.by_kind
            .entry(profile.kind)
            .or_default()
            .insert(profile.name.clone());
        self.learned.insert(profile.name.clone(), Skill::new(profile));
        Ok(())
    }

    pub fn forget(&mut self, name: &str) -> Result<SkillProfile, SkillError> {
        let skill = self
            .learned
            .remove(name)
            .ok_or_else(|| SkillError::UnknownSkill(name.to_owned()))?;
        if let Some(names) = self.by_kind.get_mut(&skill.profile.kind) {
            names.remove(name);
        }
        Ok(skill.profile)
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.learned.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Skill> {
        self.learned.get_mut(name)
    }

    pub fn by_kind(&self, kind: SkillKind) -> impl Iterator<Item = &Skill> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|name| self.learned.get(name))
    }

    pub fn len(&self) -> usize {
        self.learned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.learned.is_empty()
    }

    pub fn tick_cooldowns(&mut self, delta: f32) {
        for skill in self.learned.values_mut() {
            skill.cooldown_remaining = (skill.cooldown_remaining - delta).max(0.0);
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SkillError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("skill {0:?} is not learned")]
    UnknownSkill(String),

    #[error("skill {0:?} is already learned")]
    AlreadyLearned(String),

    #[error("world is suspended")]
    Suspended,

    #[error("character is already using a skill")]
    AlreadyUsingSkill,

    #[error("skill is cooling down ({remaining:.2}s left)")]
    CoolingDown { remaining: f32 },

    #[error("not enough magicka ({available}/{required})")]
    InsufficientMagicka { required: u32, available: u32 },

    #[error("not enough stamina ({available}/{required})")]
    InsufficientStamina { required: u32, available: u32 },
}

impl GameError for SkillError {
    fn severity(&self) -> ErrorSeverity {
        use SkillError::*;
        match self {
            Suspended | AlreadyUsingSkill | CoolingDown { .. } => ErrorSeverity::Recoverable,
            InsufficientMagicka { .. } | InsufficientStamina { .. } => ErrorSeverity::Recoverable,
            UnknownCharacter(_) | UnknownSkill(_) | AlreadyLearned(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use SkillError::*;
        match self {
            UnknownCharacter(_) => "SKILL_UNKNOWN_CHARACTER",
            UnknownSkill(_) => "SKILL_UNKNOWN_SKILL",
            AlreadyLearned(_) => "SKILL_ALREADY_LEARNED",
            Suspended => "SKILL_SUSPENDED",
            AlreadyUsingSkill => "SKILL_ALREADY_USING",
            CoolingDown { .. } => "SKILL_COOLING_DOWN",
            InsufficientMagicka { .. } => "SKILL_INSUFFICIENT_MAGICKA",
            InsufficientStamina { .. } => "SKILL_INSUFFICIENT_STAMINA",
        }
    }
}
