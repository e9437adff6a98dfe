use serde::{Deserialize, Serialize};

use arpg_core::{ActionFlags, BodyHandle, Character, CharacterId, PartyId, Role, State};

/// Read-only copy of a character's observable state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub id: CharacterId,
    pub name: String,
    pub role: Role,
    pub state: State,
    pub flags: ActionFlags,
    pub level: u32,
    pub exp: u32,
    pub health: u32,
    pub full_health: u32,
    pub magicka: u32,
    pub stamina: u32,
    pub body: Option<BodyHandle>,
    pub locked_on: Option<CharacterId>,
    pub party: Option<PartyId>,
    pub active_skills: usize,
}

impl From<&Character> for CharacterSnapshot {
    fn from(character: &Character) -> Self {
        let profile = character.profile();
        Self {
            id: character.id(),
            name: character.name().to_owned(),
            role: character.role(),
            state: character.current_state(),
            flags: character.flags(),
            level: profile.level,
            exp: profile.exp,
            health: profile.health,
            full_health: profile.full_health,
            magicka: profile.magicka,
            stamina: profile.stamina,
            body: character.body(),
            locked_on: character.locked_on(),
            party: character.party(),
            active_skills: character.active_skills().count(),
        }
    }
}
