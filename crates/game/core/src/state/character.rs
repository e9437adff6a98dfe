use std::collections::{BTreeMap, BTreeSet};

use crate::combat::ComboTracker;
use crate::env::{BodyHandle, FixtureShape, Vec2};
use crate::fsm::{State, StateInputs};
use crate::inventory::{EquipmentSlot, Inventory};
use crate::skill::{ActiveSkill, SkillBook};

use super::{ActionFlags, ActiveSkillId, CharacterId, CharacterProfile, PartyId, Role};

/// A live character: identity plus all mutable simulation state.
///
/// Characters are owned by the `World` registry. Anything that refers to
/// another character (lock-on, in-range targets, party membership) stores a
/// [`CharacterId`] and resolves it through the registry when used.
#[derive(Clone, Debug)]
pub struct Character {
    pub(crate) id: CharacterId,
    pub(crate) role: Role,
    pub(crate) body: Option<BodyHandle>,
    pub(crate) profile: CharacterProfile,
    pub(crate) flags: ActionFlags,

    pub(crate) current_state: State,
    pub(crate) previous_state: State,
    pub(crate) attack_override: Option<State>,
    pub(crate) attack_rotation: u32,
    pub(crate) previous_velocity: Vec2,
    /// Facing the weapon fixture was last built for.
    pub(crate) fixture_facing_right: bool,

    pub(crate) inventory: Inventory,
    pub(crate) skills: SkillBook,
    pub(crate) active_skills: BTreeMap<ActiveSkillId, ActiveSkill>,
    pub(crate) current_skill: Option<String>,

    pub(crate) in_range: BTreeSet<CharacterId>,
    pub(crate) locked_on: Option<CharacterId>,
    pub(crate) combo: ComboTracker,
    pub(crate) regen_timer: f32,
    pub(crate) party: Option<PartyId>,
}

impl Character {
    pub fn new(
        id: CharacterId,
        role: Role,
        profile: CharacterProfile,
        body: Option<BodyHandle>,
    ) -> Self {
        Self {
            id,
            role,
            body,
            profile,
            flags: ActionFlags::FACING_RIGHT,
            // The first tick always plays the derived state's animation.
            current_state: State::ForceUpdate,
            previous_state: State::ForceUpdate,
            attack_override: None,
            attack_rotation: 0,
            previous_velocity: Vec2::ZERO,
            fixture_facing_right: true,
            inventory: Inventory::new(),
            skills: SkillBook::new(),
            active_skills: BTreeMap::new(),
            current_skill: None,
            in_range: BTreeSet::new(),
            locked_on: None,
            combo: ComboTracker::new(),
            regen_timer: 0.0,
            party: None,
        }
    }

    pub fn id(&self) -> CharacterId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    pub fn profile(&self) -> &CharacterProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut CharacterProfile {
        &mut self.profile
    }

    pub fn flags(&self) -> ActionFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut ActionFlags {
        &mut self.flags
    }

    pub fn current_state(&self) -> State {
        self.current_state
    }

    pub fn previous_state(&self) -> State {
        self.previous_state
    }

    pub fn attack_override(&self) -> Option<State> {
        self.attack_override
    }

    pub fn attack_rotation(&self) -> u32 {
        self.attack_rotation
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn skills(&self) -> &SkillBook {
        &self.skills
    }

    pub fn active_skills(&self) -> impl Iterator<Item = &ActiveSkill> {
        self.active_skills.values()
    }

    pub fn current_skill(&self) -> Option<&str> {
        self.current_skill.as_deref()
    }

    pub fn in_range_targets(&self) -> &BTreeSet<CharacterId> {
        &self.in_range
    }

    /// Lock-on as stored, without checking the target is still alive.
    ///
    /// Prefer `World::resolve_lock_on`, which clears stale targets.
    pub fn locked_on(&self) -> Option<CharacterId> {
        self.locked_on
    }

    pub fn combo(&self) -> &ComboTracker {
        &self.combo
    }

    pub fn party(&self) -> Option<PartyId> {
        self.party
    }

    pub fn is_dying(&self) -> bool {
        self.flags.is_dying()
    }

    pub fn is_killed(&self) -> bool {
        self.flags.contains(ActionFlags::KILLED)
    }

    pub fn is_invincible(&self) -> bool {
        self.flags.contains(ActionFlags::INVINCIBLE)
    }

    pub fn has_weapon(&self) -> bool {
        self.inventory.equipped(EquipmentSlot::Weapon).is_some()
    }

    /// Animation duration of `state` for this character.
    pub fn duration(&self, state: State) -> f32 {
        self.profile.timings.duration(state)
    }

    pub fn fixture_shape(&self) -> FixtureShape {
        FixtureShape {
            facing_right: self.flags.facing_right(),
            crouching: self.flags.contains(ActionFlags::CROUCHING),
            attack_range: self.profile.attack_range,
        }
    }

    /// Snapshot of everything state derivation depends on.
    pub fn state_inputs(&self, velocity: Vec2) -> StateInputs {
        StateInputs {
            flags: self.flags,
            velocity,
            attack_override: self.attack_override,
            has_weapon: self.has_weapon(),
        }
    }

    /// Sets the lock-on target and marks this character as alerted.
    pub(crate) fn lock_on(&mut self, target: CharacterId) {
        self.flags.insert(ActionFlags::ALERTED);
        self.locked_on = Some(target);
    }

    /// Drops every reference this character holds to `target`.
    pub(crate) fn forget_target(&mut self, target: CharacterId) {
        self.in_range.remove(&target);
        if self.locked_on == Some(target) {
            self.locked_on = None;
        }
    }
}
