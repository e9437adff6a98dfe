//! Action-RPG character simulation rules.
//!
//! `arpg-core` drives each character's moment-to-moment behavior (movement,
//! jumping, dodging, attacking, skills, taking damage, death) and resolves
//! combat, inventory and progression outcomes. It performs no rendering,
//! physics integration, audio or file I/O; those are reached through the
//! collaborator traits in [`env`]. All mutation flows through [`World`],
//! which owns the character registry and the deferred callback [`Scheduler`].
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod fsm;
pub mod interact;
pub mod inventory;
pub mod party;
pub mod progression;
pub mod scheduler;
pub mod skill;
pub mod state;
pub mod world;

pub use combat::{CombatError, ComboTracker, DamageOutcome, DodgeDirection, IgnoreReason};
pub use config::SimConfig;
pub use env::{
    AnimationRequest, Audio, BodyCategory, BodyHandle, Clip, ContentOracle, FixtureKind,
    FixtureShape, Physics, Playback, PcgRng, Presentation, RngOracle, SimEnv, Vec2,
};
pub use error::{ErrorSeverity, GameError};
pub use fsm::{MovementError, State, StateInputs, determine_state};
pub use interact::{DroppedItem, Interactable};
pub use inventory::{
    EquipmentSlot, Inventory, InventoryError, ItemCategory, ItemDefinition, ItemKey, ItemKind,
};
pub use party::{Party, PartyError, PartyRoster, WaitLocation};
pub use progression::next_level_exp;
pub use scheduler::{PendingGauge, Scheduler, TimerId};
pub use skill::{ActiveSkill, Skill, SkillBook, SkillError, SkillKind, SkillProfile, SkillStrike};
pub use state::{
    ActionFlags, ActiveSkillId, Character, CharacterId, CharacterProfile, PartyId, Role,
};
pub use world::{
    Deferred, SpawnError, SuspendFlag, TeardownError, TeardownReport, TickReport, World,
    WorldError,
};
