//! Combat errors.

use crate::error::{ErrorSeverity, GameError};
use crate::fsm::State;
use crate::state::CharacterId;

/// Reasons a combat operation was rejected. A rejected operation leaves all
/// state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    #[error("target {0} does not exist")]
    MissingTarget(CharacterId),

    #[error("damage source {0} does not exist")]
    MissingSource(CharacterId),

    #[error("world is suspended")]
    Suspended,

    #[error("{0} is not an attack state")]
    NotAnAttack(State),

    #[error("character is already attacking")]
    AlreadyAttacking,

    #[error("character is getting up from a fall")]
    GettingUp,

    #[error("character is already dodging")]
    AlreadyDodging,

    #[error("character is double jumping")]
    DoubleJumping,
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            // Retry once the current action finishes
            Suspended | AlreadyAttacking | GettingUp | AlreadyDodging | DoubleJumping => {
                ErrorSeverity::Recoverable
            }
            UnknownCharacter(_) | MissingTarget(_) | MissingSource(_) | NotAnAttack(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            UnknownCharacter(_) => "COMBAT_UNKNOWN_CHARACTER",
            MissingTarget(_) => "COMBAT_MISSING_TARGET",
            MissingSource(_) => "COMBAT_MISSING_SOURCE",
            Suspended => "COMBAT_SUSPENDED",
            NotAnAttack(_) => "COMBAT_NOT_AN_ATTACK",
            AlreadyAttacking => "COMBAT_ALREADY_ATTACKING",
            GettingUp => "COMBAT_GETTING_UP",
            AlreadyDodging => "COMBAT_ALREADY_DODGING",
            DoubleJumping => "COMBAT_DOUBLE_JUMPING",
        }
    }
}
