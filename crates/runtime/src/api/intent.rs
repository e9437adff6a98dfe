use serde::{Deserialize, Serialize};

use arpg_core::{CharacterId, EquipmentSlot, ItemKey, State};

/// A request from a controller (input device or AI) for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    DoubleJump,
    JumpDown,
    Crouch,
    GetUp,
    /// Reported by the host when the feet sensor touches ground.
    Land {
        on_platform: bool,
    },
    Attack {
        kind: State,
        hits: u32,
        interval: f32,
    },
    DodgeForward,
    DodgeBackward,
    ActivateSkill {
        name: String,
    },
    UseItem {
        item: ItemKey,
    },
    Equip {
        item: ItemKey,
    },
    Unequip {
        slot: EquipmentSlot,
    },
    /// Picks up `amount` units of a catalog item.
    PickUp {
        item: ItemKey,
        amount: u32,
    },
    /// Reported by the host when another character enters weapon range.
    EnterRange {
        target: CharacterId,
    },
    LeaveRange {
        target: CharacterId,
    },
}

impl Intent {
    /// A single-hit basic attack.
    pub fn basic_attack() -> Self {
        Self::Attack {
            kind: State::Attacking,
            hits: 1,
            interval: 0.0,
        }
    }
}
