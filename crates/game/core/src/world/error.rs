use crate::error::{ErrorSeverity, GameError};
use crate::inventory::ItemKey;
use crate::state::CharacterId;

/// Registry lookups that failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("character {0} is dying")]
    Dying(CharacterId),
}

impl GameError for WorldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCharacter(_) => ErrorSeverity::Validation,
            Self::Dying(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCharacter(_) => "WORLD_UNKNOWN_CHARACTER",
            Self::Dying(_) => "WORLD_DYING",
        }
    }
}

/// A character profile referenced content that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SpawnError {
    #[error("unknown default item {0}")]
    UnknownItem(ItemKey),

    #[error("unknown default skill {0:?}")]
    UnknownSkill(String),
}

impl GameError for SpawnError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownItem(_) => "SPAWN_UNKNOWN_ITEM",
            Self::UnknownSkill(_) => "SPAWN_UNKNOWN_SKILL",
        }
    }
}

/// Teardown refused because deferred callbacks could still touch the
/// characters it would remove.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TeardownError {
    #[error("{pending} deferred callbacks are still pending")]
    PendingCallbacks { pending: usize },
}

impl GameError for TeardownError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "TEARDOWN_PENDING_CALLBACKS"
    }
}
