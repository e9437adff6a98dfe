//! Inventory operations on live characters.

use tracing::debug;

use crate::env::{ContentOracle, SimEnv};
use crate::state::{Character, CharacterId, CharacterProfile, ItemStack};
use crate::world::World;

use super::{ConsumableData, EquipmentSlot, InventoryError, ItemDefinition, ItemKey};

impl CharacterProfile {
    pub fn apply_consumable(&mut self, effect: &ConsumableData) {
        self.health = self
            .health
            .saturating_add(effect.restore_health)
            .min(self.full_health);
        self.magicka = self
            .magicka
            .saturating_add(effect.restore_magicka)
            .min(self.full_magicka);
        self.stamina = self
            .stamina
            .saturating_add(effect.restore_stamina)
            .min(self.full_stamina);

        self.base_melee_damage += effect.bonus_physical_damage;
        self.attributes.strength += effect.bonus_strength;
        self.attributes.dexterity += effect.bonus_dexterity;
        self.attributes.intelligence += effect.bonus_intelligence;
        self.attributes.luck += effect.bonus_luck;
        self.move_speed += effect.bonus_move_speed;
        self.jump_height += effect.bonus_jump_height;
    }
}

impl World {
    fn inventory_owner(
        &mut self,
        id: CharacterId,
    ) -> Result<&mut Character, InventoryError> {
        self.characters
            .get_mut(&id)
            .ok_or(InventoryError::UnknownCharacter(id))
    }

    pub fn add_item(
        &mut self,
        id: CharacterId,
        definition: ItemDefinition,
        amount: u32,
    ) -> Result<u32, InventoryError> {
        self.inventory_owner(id)?.inventory.add(definition, amount)
    }

    /// # Panics
    ///
    /// Panics if more units are removed than the character holds.
    pub fn remove_item(
        &mut self,
        id: CharacterId,
        key: &ItemKey,
        amount: u32,
    ) -> Result<u32, InventoryError> {
        self.inventory_owner(id)?.inventory.remove(key, amount)
    }

    pub fn item_amount(&self, id: CharacterId, key: &ItemKey) -> u32 {
        self.characters
            .get(&id)
            .map_or(0, |character| character.inventory.amount(key))
    }

    pub fn equip(
        &mut self,
        id: CharacterId,
        key: &ItemKey,
        env: &mut SimEnv<'_>,
    ) -> Result<Option<ItemKey>, InventoryError> {
        let previous = self.inventory_owner(id)?.inventory.equip(key)?;
        env.audio.play_sfx(&self.config.equip_sfx);
        debug!(character = %id, item = %key, "equipped");
        Ok(previous)
    }

    pub fn unequip(
        &mut self,
        id: CharacterId,
        slot: EquipmentSlot,
        env: &mut SimEnv<'_>,
    ) -> Result<Option<ItemKey>, InventoryError> {
        let removed = self.inventory_owner(id)?.inventory.unequip(slot);
        if removed.is_some() {
            env.audio.play_sfx(&self.config.equip_sfx);
        }
        Ok(removed)
    }

    /// Consumes one unit of a consumable and applies its effects.
    pub fn use_item(
        &mut self,
        id: CharacterId,
        key: &ItemKey,
        env: &mut SimEnv<'_>,
    ) -> Result<(), InventoryError> {
        let character = self.inventory_owner(id)?;
        let effect = character
            .inventory
            .get(key)
            .ok_or_else(|| InventoryError::UnknownItem(key.clone()))?
            .definition
            .consumable()
            .cloned()
            .ok_or_else(|| InventoryError::NotConsumable(key.clone()))?;

        character.profile.apply_consumable(&effect);
        character.inventory.remove(key, 1)?;
        env.presentation.refresh_status_bars();
        Ok(())
    }

    /// Removes `amount` units and returns them so the map can place them as
    /// a pickup at the character's position.
    pub fn discard_item(
        &mut self,
        id: CharacterId,
        key: &ItemKey,
        amount: u32,
    ) -> Result<ItemStack, InventoryError> {
        let character = self.inventory_owner(id)?;
        let held = character.inventory.amount(key);
        if character.inventory.get(key).is_none() {
            return Err(InventoryError::UnknownItem(key.clone()));
        }
        if amount > held {
            return Err(InventoryError::InsufficientAmount {
                key: key.clone(),
                held,
                requested: amount,
            });
        }

        character.inventory.remove(key, amount)?;
        Ok(ItemStack::new(key.clone(), amount))
    }

    pub fn pickup_item(
        &mut self,
        id: CharacterId,
        definition: ItemDefinition,
        amount: u32,
    ) -> Result<u32, InventoryError> {
        debug!(character = %id, item = %definition.key, amount, "picked up");
        self.add_item(id, definition, amount)
    }

    pub fn gold_balance(&self, id: CharacterId) -> u32 {
        self.item_amount(id, &self.config.gold_coin)
    }

    pub fn add_gold(
        &mut self,
        id: CharacterId,
        amount: u32,
        content: &dyn ContentOracle,
    ) -> Result<u32, InventoryError> {
        let coin = self.config.gold_coin.clone();
        let definition = content
            .item(&coin)
            .ok_or(InventoryError::UnknownItem(coin))?;
        self.add_item(id, definition, amount)
    }

    pub fn remove_gold(&mut self, id: CharacterId, amount: u32) -> Result<u32, InventoryError> {
        let coin = self.config.gold_coin.clone();
        let held = self.item_amount(id, &coin);
        if amount > held {
            return Err(InventoryError::InsufficientAmount {
                key: coin,
                held,
                requested: amount,
            });
        }
        self.remove_item(id, &coin, amount)
    }
}
