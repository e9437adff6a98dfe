//! Character identity and per-character simulation state.
mod character;
mod flags;
mod ids;
mod profile;

pub use character::Character;
pub use flags::ActionFlags;
pub use ids::{ActiveSkillId, CharacterId, PartyId, Role};
pub use profile::{Attributes, CharacterProfile, CharacterSfx, ItemStack, Regen, StateTimings};
