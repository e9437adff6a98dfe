//! Items, canonical-instance storage and equipment slots.
mod error;
mod item;
mod store;
mod usage;

pub use error::InventoryError;
pub use item::{
    ConsumableData, EquipmentData, EquipmentSlot, ItemCategory, ItemDefinition, ItemInstance,
    ItemKey, ItemKind,
};
pub use store::Inventory;
