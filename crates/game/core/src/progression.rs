//! Experience and level-ups.

use tracing::info;

use crate::config::SimConfig;
use crate::state::{CharacterId, CharacterProfile};
use crate::world::{World, WorldError};

const LEVELS: usize = SimConfig::MAX_LEVEL as usize;

/// Experience needed to advance from level `n` (1-based index `n - 1`).
const EXP_TABLE: [u32; LEVELS] = build_exp_table();

const fn build_exp_table() -> [u32; LEVELS] {
    let mut table = [0; LEVELS];
    let mut i = 0;
    while i < LEVELS {
        let level = i as u32 + 1;
        table[i] = 100 * level + 25 * level * (level - 1);
        i += 1;
    }
    table
}

/// Experience needed to go from `level` to `level + 1`.
///
/// Returns `None` at the level cap.
pub fn next_level_exp(level: u32) -> Option<u32> {
    if level == 0 || level >= SimConfig::MAX_LEVEL {
        return None;
    }
    EXP_TABLE.get(level as usize - 1).copied()
}

impl CharacterProfile {
    /// Adds experience and applies every level-up it pays for, carrying the
    /// remainder. Returns the number of levels gained.
    ///
    /// Experience keeps accumulating at the level cap.
    pub fn add_exp(&mut self, amount: u32) -> u32 {
        self.exp = self.exp.saturating_add(amount);
        let mut gained = 0;
        while let Some(needed) = next_level_exp(self.level)
            && self.exp >= needed
        {
            self.exp -= needed;
            self.level += 1;
            gained += 1;
        }
        gained
    }
}

impl World {
    pub fn add_exp(&mut self, id: CharacterId, amount: u32) -> Result<u32, WorldError> {
        let character = self.require_mut(id)?;
        let gained = character.profile.add_exp(amount);
        if gained > 0 {
            info!(character = %id, level = character.profile.level, gained, "level up");
        }
        Ok(gained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing() {
        assert!(EXP_TABLE.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(next_level_exp(1), Some(100));
        assert_eq!(next_level_exp(2), Some(250));
    }

    #[test]
    fn cap_has_no_next_level() {
        assert_eq!(next_level_exp(SimConfig::MAX_LEVEL), None);
        assert_eq!(next_level_exp(0), None);
        assert!(next_level_exp(SimConfig::MAX_LEVEL - 1).is_some());
    }

    #[test]
    fn add_exp_carries_remainder_across_levels() {
        let mut profile = CharacterProfile::new("hero");

        assert_eq!(profile.add_exp(99), 0);
        assert_eq!(profile.add_exp(1 + 250 + 30), 2);

        assert_eq!(profile.level, 3);
        assert_eq!(profile.exp, 30);
    }

    #[test]
    fn add_exp_stops_at_cap() {
        let mut profile = CharacterProfile::new("hero");
        profile.level = SimConfig::MAX_LEVEL - 1;

        let gained = profile.add_exp(u32::MAX);

        assert_eq!(gained, 1);
        assert_eq!(profile.level, SimConfig::MAX_LEVEL);
    }

    #[test]
    fn world_add_exp_rejects_unknown_character() {
        let mut world = World::default();
        assert_eq!(
            world.add_exp(CharacterId(7), 10),
            Err(WorldError::UnknownCharacter(CharacterId(7)))
        );
    }
}
