use crate::inventory::{ItemDefinition, ItemKey};
use crate::skill::SkillProfile;

/// Read-only access to item and skill definitions.
///
/// Used when spawning a character to resolve its default inventory and skills,
/// and by the runtime to resolve pickups.
pub trait ContentOracle: Send + Sync {
    fn item(&self, key: &ItemKey) -> Option<ItemDefinition>;

    fn skill(&self, name: &str) -> Option<SkillProfile>;
}
