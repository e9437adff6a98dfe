//! Content factory for building the content library from data files.

use std::path::{Path, PathBuf};

use arpg_core::{CharacterProfile, ItemDefinition, SimConfig, SkillProfile};

use crate::library::ContentLibrary;
use crate::loaders::{CharacterLoader, ConfigLoader, ItemLoader, LoadResult, SkillLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── characters.ron
/// ├── items.ron
/// └── skills.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load simulation configuration from `config.toml`, falling back to the
    /// defaults when the file does not exist.
    pub fn load_config(&self) -> LoadResult<SimConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(SimConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_characters(&self) -> LoadResult<Vec<CharacterProfile>> {
        CharacterLoader::load(&self.data_dir.join("characters.ron"))
    }

    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    pub fn load_skills(&self) -> LoadResult<Vec<SkillProfile>> {
        SkillLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Loads every catalog and cross-checks them.
    pub fn load_library(&self) -> LoadResult<ContentLibrary> {
        ContentLibrary::new(
            self.load_characters()?,
            self.load_items()?,
            self.load_skills()?,
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
