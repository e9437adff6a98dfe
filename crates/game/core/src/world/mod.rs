//! Live character registry and tick driver.
//!
//! [`World`] owns every character, the party roster and the deferred callback
//! scheduler. All simulation entry points are methods on it (intents, combat,
//! inventory, parties) so that cross-character effects can resolve ids
//! against the registry in one place. A character that is no longer in the
//! registry simply does not exist: lock-ons and pending callbacks that name it
//! degrade to no-ops.
mod error;
mod suspend;
mod teardown;
mod tick;
mod timers;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::combat::ComboTracker;
use crate::config::SimConfig;
use crate::env::{BodyHandle, ContentOracle, PcgRng, RngOracle, SimEnv, compute_seed};
use crate::party::PartyRoster;
use crate::scheduler::{PendingGauge, Scheduler};
use crate::state::{ActionFlags, Character, CharacterId, CharacterProfile, Role};

pub use error::{SpawnError, TeardownError, WorldError};
pub use suspend::SuspendFlag;
pub use teardown::TeardownReport;
pub use tick::TickReport;
pub use timers::{CharacterTimer, Deferred};

pub struct World {
    pub(crate) config: SimConfig,
    pub(crate) characters: BTreeMap<CharacterId, Character>,
    pub(crate) parties: PartyRoster,
    pub(crate) scheduler: Scheduler<CharacterTimer>,
    pub(crate) suspend: SuspendFlag,
    rng: Box<dyn RngOracle>,
    seed: u64,
    roll_nonce: u64,
    next_character: u32,
    pub(crate) next_active_skill: u64,
}

impl World {
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, Box::new(PcgRng), 0)
    }

    pub fn with_rng(config: SimConfig, rng: Box<dyn RngOracle>, seed: u64) -> Self {
        Self {
            config,
            characters: BTreeMap::new(),
            parties: PartyRoster::default(),
            scheduler: Scheduler::new(),
            suspend: SuspendFlag::default(),
            rng,
            seed,
            roll_nonce: 0,
            next_character: 1,
            next_active_skill: 1,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains_key(&id)
    }

    /// Live means present and not dying.
    pub fn is_live(&self, id: CharacterId) -> bool {
        self.characters.get(&id).is_some_and(|c| !c.is_dying())
    }

    pub fn parties(&self) -> &PartyRoster {
        &self.parties
    }

    pub fn suspend_flag(&self) -> SuspendFlag {
        self.suspend.clone()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend.is_raised()
    }

    pub fn pending_callbacks(&self) -> usize {
        self.scheduler.pending_count()
    }

    pub fn pending_gauge(&self) -> PendingGauge {
        self.scheduler.gauge()
    }

    /// Registers a character built from `profile`, granting its default skills
    /// and inventory.
    ///
    /// Fails without registering anything if a default skill or item is not
    /// known to `content`.
    pub fn spawn(
        &mut self,
        profile: CharacterProfile,
        role: Role,
        body: Option<BodyHandle>,
        content: &dyn ContentOracle,
    ) -> Result<CharacterId, SpawnError> {
        let id = CharacterId(self.next_character);
        let mut character = Character::new(id, role, profile, body);
        character.combo = ComboTracker::with_window(self.config.combo_window);

        let skills = character.profile.default_skills.clone();
        for name in skills {
            let profile = content
                .skill(&name)
                .ok_or_else(|| SpawnError::UnknownSkill(name.clone()))?;
            if let Err(error) = character.skills.learn(profile) {
                warn!(character = %id, %error, "duplicate default skill");
            }
        }

        let items = character.profile.default_inventory.clone();
        for stack in items {
            let definition = content
                .item(&stack.key)
                .ok_or_else(|| SpawnError::UnknownItem(stack.key.clone()))?;
            if let Err(error) = character.inventory.add(definition, stack.amount) {
                warn!(character = %id, %error, "skipping default item");
            }
        }

        self.next_character += 1;
        debug!(character = %id, name = %character.name(), %role, "spawned");
        self.characters.insert(id, character);
        Ok(id)
    }

    /// Removes a character immediately, destroying its body unless the kill
    /// finalization already did.
    pub fn despawn(
        &mut self,
        id: CharacterId,
        env: &mut SimEnv<'_>,
    ) -> Result<Character, WorldError> {
        let character = self
            .characters
            .remove(&id)
            .ok_or(WorldError::UnknownCharacter(id))?;

        if let Some(body) = character.body
            && !character.is_killed()
        {
            env.physics.destroy_body(body);
        }
        self.forget_everywhere(id);
        self.parties.remove_member(id);
        debug!(character = %id, "despawned");
        Ok(character)
    }

    /// Records that `target` entered `id`'s weapon range.
    pub fn enter_range(&mut self, id: CharacterId, target: CharacterId) -> Result<(), WorldError> {
        if !self.contains(target) {
            return Err(WorldError::UnknownCharacter(target));
        }
        let character = self.require_mut(id)?;
        character.in_range.insert(target);
        Ok(())
    }

    pub fn leave_range(&mut self, id: CharacterId, target: CharacterId) -> Result<(), WorldError> {
        let character = self.require_mut(id)?;
        character.in_range.remove(&target);
        Ok(())
    }

    /// Returns `id`'s lock-on target if it is still live, clearing it otherwise.
    pub fn resolve_lock_on(&mut self, id: CharacterId) -> Option<CharacterId> {
        let target = self.characters.get(&id)?.locked_on?;
        if self.is_live(target) {
            return Some(target);
        }
        if let Some(character) = self.characters.get_mut(&id) {
            character.locked_on = None;
        }
        None
    }

    /// Draws a damage jitter offset for `character`.
    pub(crate) fn roll_jitter(&mut self, character: CharacterId) -> i64 {
        let magnitude = self.config.damage_jitter;
        if magnitude == 0 {
            return 0;
        }
        let seed = compute_seed(self.seed, self.roll_nonce, character.0, 0);
        self.roll_nonce += 1;
        self.rng.jitter(seed, magnitude)
    }

    pub(crate) fn require(&self, id: CharacterId) -> Result<&Character, WorldError> {
        self.characters
            .get(&id)
            .ok_or(WorldError::UnknownCharacter(id))
    }

    pub(crate) fn require_mut(&mut self, id: CharacterId) -> Result<&mut Character, WorldError> {
        self.characters
            .get_mut(&id)
            .ok_or(WorldError::UnknownCharacter(id))
    }

    /// Removes every in-range and lock-on reference to `target`.
    pub(crate) fn forget_everywhere(&mut self, target: CharacterId) {
        for character in self.characters.values_mut() {
            character.forget_target(target);
        }
    }

    pub(crate) fn set_flag(&mut self, id: CharacterId, flag: ActionFlags, value: bool) {
        if let Some(character) = self.characters.get_mut(&id) {
            character.flags.set(flag, value);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
