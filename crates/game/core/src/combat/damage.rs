//! Damage output and application.

use crate::inventory::EquipmentSlot;
use crate::state::CharacterId;
use crate::world::World;

use super::CombatError;

// ============================================================================
// Outcomes
// ============================================================================

/// Why a damage application changed nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IgnoreReason {
    SourceDying,
    ReceiverDying,
    Invincible,
}

/// Result of a successful `receive_damage`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DamageOutcome {
    /// Health dropped and the receiver survived.
    Damaged { remaining: u32 },
    /// Health reached zero; the receiver is set to kill.
    Killed,
    /// Defensive no-op.
    Ignored(IgnoreReason),
}

impl DamageOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Melee damage before it reaches the receiver.
///
/// ```text
/// output = max(base + weapon_bonus + jitter, 0)
/// ```
pub fn melee_damage(base: u32, weapon_bonus: u32, jitter: i64) -> u32 {
    let raw = i64::from(base) + i64::from(weapon_bonus) + jitter;
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

/// Health after taking `amount`, floored at zero.
pub fn apply_damage(health: u32, amount: u32) -> u32 {
    health.saturating_sub(amount)
}

impl World {
    /// Damage one melee hit from `id` deals: base melee damage plus the
    /// equipped weapon's bonus plus jitter drawn from the world RNG.
    pub fn damage_output(&mut self, id: CharacterId) -> Result<u32, CombatError> {
        let character = self
            .characters
            .get(&id)
            .ok_or(CombatError::UnknownCharacter(id))?;

        let base = character.profile.base_melee_damage;
        let weapon_bonus = character
            .inventory
            .equipped(EquipmentSlot::Weapon)
            .and_then(|weapon| weapon.definition.equipment())
            .map_or(0, |data| data.bonus_physical_damage);

        let jitter = self.roll_jitter(id);
        Ok(melee_damage(base, weapon_bonus, jitter))
    }
}
