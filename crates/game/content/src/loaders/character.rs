//! Character profile catalog loader.

use std::path::Path;

use arpg_core::CharacterProfile;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Character catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterCatalog {
    pub characters: Vec<CharacterProfile>,
}

/// Loader for character profiles from RON files.
///
/// Profiles are keyed by `name`; fields left out of a profile take the
/// [`CharacterProfile`] defaults.
pub struct CharacterLoader;

impl CharacterLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterProfile>> {
        let catalog: CharacterCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character catalog RON: {}", e))?;

        Ok(catalog.characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arpg_core::{ItemKey, State};

    #[test]
    fn parses_timings_and_defaults() {
        let characters = CharacterLoader::parse(
            r#"(
                characters: [
                    (
                        name: "vigilante",
                        can_double_jump: true,
                        timings: { attacking: 0.4, killed: 1.2 },
                        sfx: (jump: Some("sfx/jump.wav")),
                        default_skills: ["forward_slash"],
                        default_inventory: [(key: "red_potion", amount: 3)],
                    ),
                ],
            )"#,
        )
        .unwrap();

        let vigilante = &characters[0];
        assert!(vigilante.can_double_jump);
        assert_eq!(vigilante.timings.duration(State::Attacking), 0.4);
        assert_eq!(vigilante.timings.duration(State::Idle), 0.1);
        assert_eq!(vigilante.full_health, 100);
        assert_eq!(vigilante.default_inventory[0].key, ItemKey::from("red_potion"));
    }
}
