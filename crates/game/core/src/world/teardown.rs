use std::collections::BTreeSet;

use tracing::info;

use crate::env::SimEnv;
use crate::state::{CharacterId, PartyId};

use super::{TeardownError, World};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub removed: Vec<CharacterId>,
    pub dismissed: Vec<PartyId>,
}

impl World {
    /// Clears the map-local population before a map change.
    ///
    /// Players and their live allies survive; every other character is
    /// removed and parties are pruned of removed members. Refuses to run while
    /// any deferred callback is pending.
    pub fn teardown(&mut self, env: &mut SimEnv<'_>) -> Result<TeardownReport, TeardownError> {
        let pending = self.scheduler.pending_count();
        if pending > 0 {
            return Err(TeardownError::PendingCallbacks { pending });
        }

        let mut keep = BTreeSet::new();
        for player in self.characters.values().filter(|c| c.role.is_player()) {
            keep.insert(player.id);
            keep.extend(self.allies(player.id));
        }

        let removed: Vec<CharacterId> = self
            .characters
            .keys()
            .copied()
            .filter(|id| !keep.contains(id))
            .collect();

        for id in &removed {
            if let Some(character) = self.characters.remove(id)
                && let Some(body) = character.body
                && !character.is_killed()
            {
                env.physics.destroy_body(body);
            }
            self.forget_everywhere(*id);
        }

        let characters = &mut self.characters;
        let dismissed = self.parties.prune(|id| characters.contains_key(&id));
        for party in &dismissed {
            for character in characters.values_mut() {
                if character.party == Some(*party) {
                    character.party = None;
                }
            }
        }

        info!(
            removed = removed.len(),
            dismissed = dismissed.len(),
            survivors = self.characters.len(),
            "world torn down"
        );
        Ok(TeardownReport { removed, dismissed })
    }
}
