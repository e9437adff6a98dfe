//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, the simulation config is TOML.

pub mod character;
pub mod config;
pub mod factory;
pub mod item;
pub mod skill;

pub use character::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use skill::SkillLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a catalog file, naming the path on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
