//! Item catalog loader.

use std::path::Path;

use arpg_core::ItemDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub items: Vec<ItemDefinition>,
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDefinition>> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arpg_core::{EquipmentSlot, ItemCategory};

    #[test]
    fn parses_each_item_kind() {
        let items = ItemLoader::parse(
            r#"(
                items: [
                    (key: "short_sword", name: "Short Sword",
                     kind: equipment((slot: weapon, bonus_physical_damage: 5))),
                    (key: "red_potion", name: "Red Potion",
                     kind: consumable((restore_health: 50))),
                    (key: "gold_coin", name: "Gold Coin", kind: misc),
                ],
            )"#,
        )
        .unwrap();

        let categories: Vec<_> = items.iter().map(|item| item.category()).collect();
        assert_eq!(
            categories,
            vec![ItemCategory::Equipment, ItemCategory::Consumable, ItemCategory::Misc]
        );
        let sword = items[0].equipment().unwrap();
        assert_eq!(sword.slot, EquipmentSlot::Weapon);
        assert_eq!(sword.bonus_physical_damage, 5);
        assert_eq!(items[1].consumable().unwrap().restore_health, 50);
    }

    #[test]
    fn rejects_malformed_catalog() {
        let error = ItemLoader::parse("(items: [(key: 3)])").unwrap_err();
        assert!(error.to_string().contains("item catalog"));
    }
}
