//! Parties and ally resolution.
//!
//! A party is a leader plus members. Characters hold a weak back-reference
//! ([`PartyId`]); the roster is the owner. Allies are what aggro propagation
//! and teardown survival are computed from.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{CharacterId, PartyId};
use crate::world::World;

/// Where a member was asked to wait for its leader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaitLocation {
    pub map: String,
    pub x: f32,
    pub y: f32,
}

impl WaitLocation {
    pub fn new(map: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            map: map.into(),
            x,
            y,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Party {
    leader: CharacterId,
    members: BTreeSet<CharacterId>,
    waiting: BTreeMap<CharacterId, WaitLocation>,
}

impl Party {
    fn new(leader: CharacterId) -> Self {
        Self {
            leader,
            members: BTreeSet::new(),
            waiting: BTreeMap::new(),
        }
    }

    pub fn leader(&self) -> CharacterId {
        self.leader
    }

    pub fn members(&self) -> &BTreeSet<CharacterId> {
        &self.members
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.leader == id || self.members.contains(&id)
    }

    pub fn waiting_location(&self, member: CharacterId) -> Option<&WaitLocation> {
        self.waiting.get(&member)
    }

    /// Leader and members, excluding `id`.
    fn others(&self, id: CharacterId) -> impl Iterator<Item = CharacterId> + '_ {
        std::iter::once(self.leader)
            .chain(self.members.iter().copied())
            .filter(move |&other| other != id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PartyRoster {
    parties: BTreeMap<PartyId, Party>,
    next_id: u32,
}

impl PartyRoster {
    pub fn get(&self, id: PartyId) -> Option<&Party> {
        self.parties.get(&id)
    }

    pub fn len(&self) -> usize {
        self.parties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    fn insert(&mut self, party: Party) -> PartyId {
        let id = PartyId(self.next_id);
        self.next_id += 1;
        self.parties.insert(id, party);
        id
    }

    /// Drops `member` from whichever party lists it as a non-leader member.
    pub(crate) fn remove_member(&mut self, member: CharacterId) {
        for party in self.parties.values_mut() {
            party.members.remove(&member);
            party.waiting.remove(&member);
        }
    }

    /// Removes members for which `present` is false and dismisses parties
    /// whose leader is gone. Returns the dismissed parties.
    pub(crate) fn prune(&mut self, present: impl Fn(CharacterId) -> bool) -> Vec<PartyId> {
        let dismissed: Vec<PartyId> = self
            .parties
            .iter()
            .filter(|(_, party)| !present(party.leader))
            .map(|(&id, _)| id)
            .collect();
        for id in &dismissed {
            self.parties.remove(id);
        }

        for party in self.parties.values_mut() {
            party.members.retain(|&member| present(member));
            party.waiting.retain(|&member, _| present(member));
        }
        dismissed
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PartyError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("{0} does not exist")]
    UnknownParty(PartyId),

    #[error("character {character} already belongs to {party}")]
    AlreadyInParty {
        character: CharacterId,
        party: PartyId,
    },

    #[error("character {0} is not in a party")]
    NotInParty(CharacterId),

    #[error("character {0} leads its party and cannot leave it")]
    LeaderCannotLeave(CharacterId),
}

impl GameError for PartyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "PARTY_UNKNOWN_CHARACTER",
            Self::UnknownParty(_) => "PARTY_UNKNOWN_PARTY",
            Self::AlreadyInParty { .. } => "PARTY_ALREADY_IN_PARTY",
            Self::NotInParty(_) => "PARTY_NOT_IN_PARTY",
            Self::LeaderCannotLeave(_) => "PARTY_LEADER_CANNOT_LEAVE",
        }
    }
}

impl World {
    fn party_of(&self, id: CharacterId) -> Result<Option<PartyId>, PartyError> {
        self.characters
            .get(&id)
            .map(|character| character.party)
            .ok_or(PartyError::UnknownCharacter(id))
    }

    fn member_party(&self, member: CharacterId) -> Result<PartyId, PartyError> {
        let party = self
            .party_of(member)?
            .ok_or(PartyError::NotInParty(member))?;
        match self.parties.get(party) {
            Some(p) if p.leader == member => Err(PartyError::LeaderCannotLeave(member)),
            Some(_) => Ok(party),
            None => Err(PartyError::UnknownParty(party)),
        }
    }

    pub fn create_party(&mut self, leader: CharacterId) -> Result<PartyId, PartyError> {
        if let Some(party) = self.party_of(leader)? {
            return Err(PartyError::AlreadyInParty {
                character: leader,
                party,
            });
        }

        let id = self.parties.insert(Party::new(leader));
        if let Some(character) = self.characters.get_mut(&leader) {
            character.party = Some(id);
        }
        debug!(%leader, party = %id, "party created");
        Ok(id)
    }

    pub fn join_party(&mut self, party: PartyId, member: CharacterId) -> Result<(), PartyError> {
        if let Some(current) = self.party_of(member)? {
            return Err(PartyError::AlreadyInParty {
                character: member,
                party: current,
            });
        }
        let entry = self
            .parties
            .parties
            .get_mut(&party)
            .ok_or(PartyError::UnknownParty(party))?;
        entry.members.insert(member);

        if let Some(character) = self.characters.get_mut(&member) {
            character.party = Some(party);
        }
        Ok(())
    }

    pub fn leave_party(&mut self, member: CharacterId) -> Result<PartyId, PartyError> {
        let party = self.member_party(member)?;
        self.parties.remove_member(member);
        if let Some(character) = self.characters.get_mut(&member) {
            character.party = None;
        }
        Ok(party)
    }

    pub fn dismiss_party(&mut self, party: PartyId) -> Result<(), PartyError> {
        self.parties
            .parties
            .remove(&party)
            .ok_or(PartyError::UnknownParty(party))?;
        for character in self.characters.values_mut() {
            if character.party == Some(party) {
                character.party = None;
            }
        }
        debug!(party = %party, "party dismissed");
        Ok(())
    }

    /// Live party companions of `id`: leader and members, excluding `id`.
    pub fn allies(&self, id: CharacterId) -> Vec<CharacterId> {
        let Some(party) = self
            .characters
            .get(&id)
            .and_then(|c| c.party)
            .and_then(|party| self.parties.get(party))
        else {
            return Vec::new();
        };

        party.others(id).filter(|&ally| self.is_live(ally)).collect()
    }

    pub fn ask_to_wait(
        &mut self,
        member: CharacterId,
        location: WaitLocation,
    ) -> Result<(), PartyError> {
        let party = self.member_party(member)?;
        if let Some(entry) = self.parties.parties.get_mut(&party) {
            entry.waiting.insert(member, location);
        }
        Ok(())
    }

    pub fn ask_to_follow(&mut self, member: CharacterId) -> Result<(), PartyError> {
        let party = self.member_party(member)?;
        if let Some(entry) = self.parties.parties.get_mut(&party) {
            entry.waiting.remove(&member);
        }
        Ok(())
    }

    pub fn is_waiting_for_leader(&self, id: CharacterId) -> bool {
        self.characters
            .get(&id)
            .and_then(|c| c.party)
            .and_then(|party| self.parties.get(party))
            .is_some_and(|party| party.waiting.contains_key(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::recording::StaticContent;
    use crate::state::{ActionFlags, CharacterProfile, Role};

    fn world_with(count: usize) -> (World, Vec<CharacterId>) {
        let mut world = World::default();
        let content = StaticContent::default();
        let ids = (0..count)
            .map(|i| {
                world
                    .spawn(CharacterProfile::new(format!("c{i}")), Role::Npc, None, &content)
                    .unwrap()
            })
            .collect();
        (world, ids)
    }

    #[test]
    fn allies_include_leader_and_exclude_self() {
        let (mut world, ids) = world_with(3);
        let party = world.create_party(ids[0]).unwrap();
        world.join_party(party, ids[1]).unwrap();
        world.join_party(party, ids[2]).unwrap();

        assert_eq!(world.allies(ids[1]), vec![ids[0], ids[2]]);
        assert_eq!(world.allies(ids[0]), vec![ids[1], ids[2]]);
    }

    #[test]
    fn dying_allies_are_excluded() {
        let (mut world, ids) = world_with(2);
        let party = world.create_party(ids[0]).unwrap();
        world.join_party(party, ids[1]).unwrap();
        world.set_flag(ids[1], ActionFlags::SET_TO_KILL, true);

        assert!(world.allies(ids[0]).is_empty());
    }

    #[test]
    fn joining_twice_is_rejected() {
        let (mut world, ids) = world_with(2);
        let party = world.create_party(ids[0]).unwrap();
        world.join_party(party, ids[1]).unwrap();

        assert_eq!(
            world.join_party(party, ids[1]),
            Err(PartyError::AlreadyInParty {
                character: ids[1],
                party
            })
        );
    }

    #[test]
    fn leader_cannot_leave() {
        let (mut world, ids) = world_with(1);
        world.create_party(ids[0]).unwrap();

        assert_eq!(
            world.leave_party(ids[0]),
            Err(PartyError::LeaderCannotLeave(ids[0]))
        );
    }

    #[test]
    fn waiting_members_follow_again() {
        let (mut world, ids) = world_with(2);
        let party = world.create_party(ids[0]).unwrap();
        world.join_party(party, ids[1]).unwrap();

        world
            .ask_to_wait(ids[1], WaitLocation::new("maps/inn.tmx", 3.0, 4.0))
            .unwrap();
        assert!(world.is_waiting_for_leader(ids[1]));

        world.ask_to_follow(ids[1]).unwrap();
        assert!(!world.is_waiting_for_leader(ids[1]));
    }

    #[test]
    fn dismiss_clears_back_references() {
        let (mut world, ids) = world_with(2);
        let party = world.create_party(ids[0]).unwrap();
        world.join_party(party, ids[1]).unwrap();

        world.dismiss_party(party).unwrap();

        assert_eq!(world.character(ids[1]).unwrap().party(), None);
        assert!(world.allies(ids[0]).is_empty());
        assert!(world.parties().is_empty());
    }
}
