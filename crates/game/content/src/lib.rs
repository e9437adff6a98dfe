//! Data-driven content definitions and loaders.
//!
//! This crate loads character, item and skill definitions from RON catalogs
//! and the simulation config from TOML, and serves them to the core through
//! [`ContentLibrary`], its `ContentOracle` implementation.
//!
//! Content is read once at startup. The core treats it as immutable input and
//! never writes it back.

pub mod library;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use library::ContentLibrary;

#[cfg(feature = "loaders")]
pub use loaders::{
    CharacterLoader, ConfigLoader, ContentFactory, ItemLoader, LoadResult, SkillLoader,
};
