//! Canonical-instance item storage.
//!
//! The cache holds exactly one [`ItemInstance`] per key. Category buckets and
//! equipment slots hold keys into the cache, never their own copies.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{error, warn};

use super::{EquipmentSlot, InventoryError, ItemCategory, ItemDefinition, ItemInstance, ItemKey};

#[derive(Clone, Debug, Default)]
pub struct Inventory {
    cache: BTreeMap<ItemKey, ItemInstance>,
    buckets: BTreeMap<ItemCategory, BTreeSet<ItemKey>>,
    slots: BTreeMap<EquipmentSlot, ItemKey>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` loose units, reusing the canonical instance if one
    /// exists. Returns the new loose amount.
    pub fn add(&mut self, definition: ItemDefinition, amount: u32) -> Result<u32, InventoryError> {
        if amount == 0 {
            warn!(item = %definition.key, "refusing to add zero items");
            return Err(InventoryError::ZeroAmount);
        }

        let key = definition.key.clone();
        let category = definition.category();
        let instance = self
            .cache
            .entry(key.clone())
            .or_insert(ItemInstance {
                definition,
                amount: 0,
            });
        instance.amount += amount;
        let total = instance.amount;

        self.buckets.entry(category).or_default().insert(key);
        Ok(total)
    }

    /// Removes `amount` loose units. Returns the remaining loose amount.
    ///
    /// At zero the key leaves its bucket, and the canonical instance is
    /// released unless it is equipped.
    ///
    /// # Panics
    ///
    /// Panics if more units are removed than are held.
    pub fn remove(&mut self, key: &ItemKey, amount: u32) -> Result<u32, InventoryError> {
        if amount == 0 {
            warn!(item = %key, "refusing to remove zero items");
            return Err(InventoryError::ZeroAmount);
        }
        let Some(instance) = self.cache.get_mut(key) else {
            warn!(item = %key, "unable to remove unknown item");
            return Err(InventoryError::UnknownItem(key.clone()));
        };

        assert!(
            amount <= instance.amount,
            "item {key} amount would become negative ({} - {amount})",
            instance.amount
        );
        instance.amount -= amount;
        let remaining = instance.amount;

        if remaining == 0 {
            let category = instance.definition.category();
            if let Some(bucket) = self.buckets.get_mut(&category) {
                bucket.remove(key);
            }
            if !self.is_equipped(key) {
                self.cache.remove(key);
            }
        }
        Ok(remaining)
    }

    /// Moves one unit of `key` into its slot, returning whatever occupied the
    /// slot before to the loose inventory.
    pub fn equip(&mut self, key: &ItemKey) -> Result<Option<ItemKey>, InventoryError> {
        let instance = self
            .cache
            .get(key)
            .ok_or_else(|| InventoryError::UnknownItem(key.clone()))?;
        let slot = instance
            .definition
            .equipment()
            .map(|data| data.slot)
            .ok_or_else(|| InventoryError::NotEquipment(key.clone()))?;

        let previous = self.unequip(slot);
        self.slots.insert(slot, key.clone());
        self.remove(key, 1)?;
        Ok(previous)
    }

    /// Returns the occupant of `slot` to the loose inventory as one unit.
    /// Does nothing if the slot is empty.
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<ItemKey> {
        let key = self.slots.remove(&slot)?;
        let Some(instance) = self.cache.get_mut(&key) else {
            error!(item = %key, %slot, "equipped item missing from cache");
            return None;
        };

        instance.amount += 1;
        let category = instance.definition.category();
        self.buckets
            .entry(category)
            .or_default()
            .insert(key.clone());
        Some(key)
    }

    pub fn get(&self, key: &ItemKey) -> Option<&ItemInstance> {
        self.cache.get(key)
    }

    /// Loose units held.
    pub fn amount(&self, key: &ItemKey) -> u32 {
        self.cache.get(key).map_or(0, |instance| instance.amount)
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&ItemInstance> {
        self.slots.get(&slot).and_then(|key| self.cache.get(key))
    }

    pub fn is_equipped(&self, key: &ItemKey) -> bool {
        self.slots.values().any(|equipped| equipped == key)
    }

    /// Loose items of one category.
    pub fn listing(&self, category: ItemCategory) -> impl Iterator<Item = &ItemInstance> {
        self.buckets
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(|key| self.cache.get(key))
    }

    /// Number of canonical instances, loose or equipped.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
