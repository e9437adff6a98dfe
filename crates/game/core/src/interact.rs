//! Interaction between a character and world objects.

use tracing::{debug, warn};

use crate::env::SimEnv;
use crate::inventory::ItemDefinition;
use crate::state::{Character, CharacterId};
use crate::world::{World, WorldError};

/// Something a character can interact with: a dropped item, a chest, a portal,
/// an NPC to talk to.
pub trait Interactable {
    fn on_interact(&mut self, user: &mut Character, env: &mut SimEnv<'_>);

    /// Whether touching the object interacts with it, without an explicit
    /// interact input.
    fn will_interact_on_contact(&self) -> bool;
}

/// An item stack lying in the world, picked up on contact.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppedItem {
    definition: ItemDefinition,
    amount: u32,
}

impl DroppedItem {
    pub fn new(definition: ItemDefinition, amount: u32) -> Self {
        Self { definition, amount }
    }

    pub fn definition(&self) -> &ItemDefinition {
        &self.definition
    }

    /// Units still lying on the ground.
    pub fn amount(&self) -> u32 {
        self.amount
    }
}

impl Interactable for DroppedItem {
    fn on_interact(&mut self, user: &mut Character, _env: &mut SimEnv<'_>) {
        if self.amount == 0 {
            return;
        }
        match user.inventory.add(self.definition.clone(), self.amount) {
            Ok(_) => {
                debug!(character = %user.id, item = %self.definition.key, amount = self.amount, "picked up");
                self.amount = 0;
            }
            Err(error) => warn!(character = %user.id, %error, "pickup failed"),
        }
    }

    fn will_interact_on_contact(&self) -> bool {
        true
    }
}

impl World {
    /// Lets `user` interact with `target`. Dying characters cannot interact.
    pub fn interact(
        &mut self,
        user: CharacterId,
        target: &mut dyn Interactable,
        env: &mut SimEnv<'_>,
    ) -> Result<(), WorldError> {
        let character = self.require_mut(user)?;
        if character.is_dying() {
            return Err(WorldError::Dying(user));
        }
        target.on_interact(character, env);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::recording::{StaticContent, TestEnv};
    use crate::inventory::{ItemKey, ItemKind};
    use crate::state::{ActionFlags, CharacterProfile, Role};

    fn potion() -> ItemDefinition {
        ItemDefinition::new("red_potion", "Red Potion", ItemKind::Misc)
    }

    #[test]
    fn dropped_item_moves_into_inventory_once() {
        let mut world = World::default();
        let mut fakes = TestEnv::default();
        let id = world
            .spawn(CharacterProfile::new("hero"), Role::Player, None, &StaticContent::default())
            .unwrap();
        let mut drop = DroppedItem::new(potion(), 3);
        assert!(drop.will_interact_on_contact());

        world.interact(id, &mut drop, &mut fakes.env()).unwrap();
        world.interact(id, &mut drop, &mut fakes.env()).unwrap();

        assert_eq!(drop.amount(), 0);
        assert_eq!(world.item_amount(id, &ItemKey::from("red_potion")), 3);
    }

    #[test]
    fn dying_character_cannot_interact() {
        let mut world = World::default();
        let mut fakes = TestEnv::default();
        let id = world
            .spawn(CharacterProfile::new("hero"), Role::Player, None, &StaticContent::default())
            .unwrap();
        world.set_flag(id, ActionFlags::SET_TO_KILL, true);
        let mut drop = DroppedItem::new(potion(), 1);

        assert_eq!(
            world.interact(id, &mut drop, &mut fakes.env()),
            Err(WorldError::Dying(id))
        );
        assert_eq!(drop.amount(), 1);
    }
}
