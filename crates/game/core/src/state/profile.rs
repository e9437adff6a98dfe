//! Character definition data.
//!
//! A [`CharacterProfile`] is loaded once from definition data when a character
//! is spawned and is owned by that character afterwards. Consumables, regen
//! and leveling mutate it in place.
use std::collections::BTreeMap;

use crate::config::SimConfig;
use crate::fsm::State;
use crate::inventory::ItemKey;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: u32,
    pub dexterity: u32,
    pub intelligence: u32,
    pub luck: u32,
}

/// Amounts restored on every regeneration pulse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Regen {
    pub health: u32,
    pub magicka: u32,
    pub stamina: u32,
}

/// Per-event sound effects. Empty events are silent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterSfx {
    pub jump: Option<String>,
    pub hurt: Option<String>,
    pub killed: Option<String>,
}

/// Animation duration per state, in seconds.
///
/// States without an entry fall back to
/// [`SimConfig::DEFAULT_ANIMATION_DURATION`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StateTimings(BTreeMap<State, f32>);

impl StateTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, state: State, seconds: f32) -> Self {
        self.set(state, seconds);
        self
    }

    pub fn set(&mut self, state: State, seconds: f32) {
        self.0.insert(state, seconds);
    }

    pub fn duration(&self, state: State) -> f32 {
        self.0
            .get(&state)
            .copied()
            .unwrap_or(SimConfig::DEFAULT_ANIMATION_DURATION)
    }
}

/// Item granted to a character when it is spawned.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemStack {
    pub key: ItemKey,
    pub amount: u32,
}

impl ItemStack {
    pub fn new(key: impl Into<ItemKey>, amount: u32) -> Self {
        Self {
            key: key.into(),
            amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CharacterProfile {
    pub name: String,
    pub level: u32,
    pub exp: u32,

    pub full_health: u32,
    pub health: u32,
    pub full_magicka: u32,
    pub magicka: u32,
    pub full_stamina: u32,
    pub stamina: u32,

    pub attributes: Attributes,

    pub move_speed: f32,
    pub jump_height: f32,
    pub can_double_jump: bool,

    pub attack_range: f32,
    pub attack_force: f32,
    pub attack_time: f32,
    pub base_melee_damage: u32,

    pub timings: StateTimings,
    /// Attack animations beyond the primary one; attacks rotate through
    /// `1 + extra_attack_animations` clips.
    pub extra_attack_animations: u32,

    pub sfx: CharacterSfx,
    pub regen: Regen,

    pub default_skills: Vec<String>,
    pub default_inventory: Vec<ItemStack>,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Number of distinct attack animations to rotate through.
    pub fn attack_animation_count(&self) -> u32 {
        self.extra_attack_animations.saturating_add(1)
    }

    /// Adds one regeneration pulse, clamped to the full values.
    pub fn regenerate(&mut self) {
        self.health = self
            .health
            .saturating_add(self.regen.health)
            .min(self.full_health);
        self.magicka = self
            .magicka
            .saturating_add(self.regen.magicka)
            .min(self.full_magicka);
        self.stamina = self
            .stamina
            .saturating_add(self.regen.stamina)
            .min(self.full_stamina);
    }
}

impl Default for CharacterProfile {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: 1,
            exp: 0,
            full_health: 100,
            health: 100,
            full_magicka: 100,
            magicka: 100,
            full_stamina: 100,
            stamina: 100,
            attributes: Attributes::default(),
            move_speed: 0.25,
            jump_height: 3.0,
            can_double_jump: false,
            attack_range: 0.1,
            attack_force: 0.5,
            attack_time: 0.2,
            base_melee_damage: 10,
            timings: StateTimings::default(),
            extra_attack_animations: 0,
            sfx: CharacterSfx::default(),
            regen: Regen::default(),
            default_skills: Vec::new(),
            default_inventory: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regenerate_clamps_to_full() {
        let mut profile = CharacterProfile::new("guard");
        profile.health = 95;
        profile.magicka = 10;
        profile.regen = Regen {
            health: 10,
            magicka: 5,
            stamina: 1,
        };

        profile.regenerate();

        assert_eq!(profile.health, 100);
        assert_eq!(profile.magicka, 15);
        assert_eq!(profile.stamina, 100);
    }

    #[test]
    fn attack_animation_count_saturates() {
        let mut profile = CharacterProfile::new("guard");
        assert_eq!(profile.attack_animation_count(), 1);

        profile.extra_attack_animations = u32::MAX;
        assert_eq!(profile.attack_animation_count(), u32::MAX);
    }

    #[test]
    fn missing_timing_uses_default_duration() {
        let timings = StateTimings::new().with(State::Attacking, 0.6);

        assert_eq!(timings.duration(State::Attacking), 0.6);
        assert_eq!(
            timings.duration(State::Killed),
            SimConfig::DEFAULT_ANIMATION_DURATION
        );
    }
}
