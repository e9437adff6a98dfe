//! Skill catalog loader.

use std::path::Path;

use arpg_core::SkillProfile;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillProfile>,
}

pub struct SkillLoader;

impl SkillLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<SkillProfile>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SkillProfile>> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        Ok(catalog.skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arpg_core::{SkillKind, SkillStrike};

    #[test]
    fn unspecified_fields_take_defaults() {
        let skills = SkillLoader::parse(
            r#"(
                skills: [
                    (name: "ice_spike", kind: magic, magicka_cost: 30, cooldown: 3.0,
                     character_clip: Some("cast")),
                    (name: "forward_slash", kind: physical,
                     strike: Some((hits: 2, interval: 0.1))),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(skills[0].kind, SkillKind::Magic);
        assert_eq!(skills[0].character_clip.as_deref(), Some("cast"));
        assert_eq!(skills[0].lifetime, SkillProfile::default().lifetime);
        assert_eq!(skills[1].strike, Some(SkillStrike { hits: 2, interval: 0.1 }));
    }
}
