use std::fmt;

/// Stable identifier of an item definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemKey(String);

impl ItemKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for ItemKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ItemCategory {
    Equipment,
    Consumable,
    Misc,
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumCount,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EquipmentSlot {
    Weapon,
    Headgear,
    Armor,
    Gauntlets,
    Boots,
    Cape,
    Rings,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentData {
    pub slot: EquipmentSlot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_physical_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_magical_damage: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_strength: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_dexterity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_intelligence: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_luck: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_move_speed: f32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_jump_height: f32,
}

impl EquipmentData {
    pub fn new(slot: EquipmentSlot) -> Self {
        Self {
            slot,
            bonus_physical_damage: 0,
            bonus_magical_damage: 0,
            bonus_strength: 0,
            bonus_dexterity: 0,
            bonus_intelligence: 0,
            bonus_luck: 0,
            bonus_move_speed: 0.0,
            bonus_jump_height: 0.0,
        }
    }
}

/// Effects applied when a consumable is used. Restores are clamped to the
/// character's full values; bonuses are permanent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConsumableData {
    pub restore_health: u32,
    pub restore_magicka: u32,
    pub restore_stamina: u32,
    pub bonus_physical_damage: u32,
    pub bonus_strength: u32,
    pub bonus_dexterity: u32,
    pub bonus_intelligence: u32,
    pub bonus_luck: u32,
    pub bonus_move_speed: f32,
    pub bonus_jump_height: f32,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Equipment(EquipmentData),
    Consumable(ConsumableData),
    Misc,
}

/// Immutable item definition. Per-character state lives in [`ItemInstance`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub key: ItemKey,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub kind: ItemKind,
}

impl ItemDefinition {
    pub fn new(key: impl Into<ItemKey>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: String::new(),
            kind,
        }
    }

    pub fn category(&self) -> ItemCategory {
        match self.kind {
            ItemKind::Equipment(_) => ItemCategory::Equipment,
            ItemKind::Consumable(_) => ItemCategory::Consumable,
            ItemKind::Misc => ItemCategory::Misc,
        }
    }

    pub fn equipment(&self) -> Option<&EquipmentData> {
        match &self.kind {
            ItemKind::Equipment(data) => Some(data),
            _ => None,
        }
    }

    pub fn consumable(&self) -> Option<&ConsumableData> {
        match &self.kind {
            ItemKind::Consumable(data) => Some(data),
            _ => None,
        }
    }
}

/// The single canonical copy of an item a character owns.
///
/// `amount` counts loose units only; an equipped unit is not included.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemInstance {
    pub definition: ItemDefinition,
    pub amount: u32,
}

impl ItemInstance {
    pub fn key(&self) -> &ItemKey {
        &self.definition.key
    }
}
