//! Event payloads published by the runtime.

use serde::{Deserialize, Serialize};

use arpg_core::{AnimationRequest, CharacterId, PartyId, Role};

/// Visual side effects, one per `Presentation` call the simulation makes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PresentationEvent {
    Animation {
        character: CharacterId,
        request: AnimationRequest,
    },
    FloatingDamage {
        character: CharacterId,
        amount: u32,
    },
    HitEffect {
        character: CharacterId,
    },
    StatusBarsRefreshed,
    AfterImage {
        character: CharacterId,
        active: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AudioEvent {
    Sfx { name: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LifecycleEvent {
    Spawned {
        character: CharacterId,
        name: String,
        role: Role,
    },
    Despawned {
        character: CharacterId,
    },
    Ticked {
        tick: u64,
        fired: usize,
        transitions: usize,
    },
    /// The world stopped accepting timer-arming intents for a reload.
    Suspended,
    Resumed,
    TornDown {
        removed: Vec<CharacterId>,
        dismissed: Vec<PartyId>,
    },
}
