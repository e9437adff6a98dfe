use crate::error::{ErrorSeverity, GameError};
use crate::state::CharacterId;

use super::ItemKey;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("item {0} is not in the inventory")]
    UnknownItem(ItemKey),

    #[error("item amount must be non-zero")]
    ZeroAmount,

    #[error("item {0} cannot be equipped")]
    NotEquipment(ItemKey),

    #[error("item {0} cannot be used")]
    NotConsumable(ItemKey),

    #[error("requested {requested} of item {key} but only {held} held")]
    InsufficientAmount {
        key: ItemKey,
        held: u32,
        requested: u32,
    },
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "INVENTORY_UNKNOWN_CHARACTER",
            Self::UnknownItem(_) => "INVENTORY_UNKNOWN_ITEM",
            Self::ZeroAmount => "INVENTORY_ZERO_AMOUNT",
            Self::NotEquipment(_) => "INVENTORY_NOT_EQUIPMENT",
            Self::NotConsumable(_) => "INVENTORY_NOT_CONSUMABLE",
            Self::InsufficientAmount { .. } => "INVENTORY_INSUFFICIENT_AMOUNT",
        }
    }
}
