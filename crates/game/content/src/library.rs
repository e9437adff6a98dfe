//! In-memory content catalog served to the simulation core.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use arpg_core::{CharacterProfile, ContentOracle, ItemDefinition, ItemKey, SkillProfile};
use tracing::debug;

/// Every character, item and skill definition known to the game.
///
/// Construction validates the catalog: keys are unique and every default
/// skill or item a character references exists.
#[derive(Clone, Debug, Default)]
pub struct ContentLibrary {
    characters: BTreeMap<String, CharacterProfile>,
    items: BTreeMap<ItemKey, ItemDefinition>,
    skills: BTreeMap<String, SkillProfile>,
}

impl ContentLibrary {
    pub fn new(
        characters: Vec<CharacterProfile>,
        items: Vec<ItemDefinition>,
        skills: Vec<SkillProfile>,
    ) -> Result<Self> {
        let mut library = Self::default();

        for item in items {
            if library.items.contains_key(&item.key) {
                bail!("duplicate item definition {}", item.key);
            }
            library.items.insert(item.key.clone(), item);
        }
        for skill in skills {
            if library.skills.contains_key(&skill.name) {
                bail!("duplicate skill definition {:?}", skill.name);
            }
            library.skills.insert(skill.name.clone(), skill);
        }
        for character in characters {
            if library.characters.contains_key(&character.name) {
                bail!("duplicate character profile {:?}", character.name);
            }
            library.validate(&character)?;
            library.characters.insert(character.name.clone(), character);
        }

        debug!(
            characters = library.characters.len(),
            items = library.items.len(),
            skills = library.skills.len(),
            "content library built"
        );
        Ok(library)
    }

    fn validate(&self, character: &CharacterProfile) -> Result<()> {
        for skill in &character.default_skills {
            if !self.skills.contains_key(skill) {
                bail!("character {:?} references unknown skill {:?}", character.name, skill);
            }
        }
        for stack in &character.default_inventory {
            if !self.items.contains_key(&stack.key) {
                bail!("character {:?} references unknown item {}", character.name, stack.key);
            }
        }
        Ok(())
    }

    /// A fresh copy of the named character's profile, ready to spawn.
    pub fn character(&self, name: &str) -> Option<CharacterProfile> {
        self.characters.get(name).cloned()
    }

    pub fn character_names(&self) -> impl Iterator<Item = &str> {
        self.characters.keys().map(String::as_str)
    }

    pub fn items(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.items.values()
    }

    pub fn skills(&self) -> impl Iterator<Item = &SkillProfile> {
        self.skills.values()
    }
}

impl ContentOracle for ContentLibrary {
    fn item(&self, key: &ItemKey) -> Option<ItemDefinition> {
        self.items.get(key).cloned()
    }

    fn skill(&self, name: &str) -> Option<SkillProfile> {
        self.skills.get(name).cloned()
    }
}
