//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, content loading, and the
//! simulation's own rejections so clients can bubble them up with consistent
//! context.
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

use arpg_core::{CharacterId, ErrorSeverity, GameError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("no character profile named {0:?}")]
    UnknownProfile(String),

    #[error("character {0} does not exist")]
    UnknownCharacter(CharacterId),

    /// The simulation refused the request. `code` is the core error code.
    #[error("{code}: {message}")]
    Rejected {
        code: &'static str,
        severity: ErrorSeverity,
        message: String,
    },

    #[error("{pending} deferred callbacks still pending after {waited:?}")]
    ReloadTimeout { pending: usize, waited: Duration },

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("runtime requires a content library before building")]
    MissingContent,
}

impl RuntimeError {
    pub(crate) fn rejected<E: GameError>(error: E) -> Self {
        Self::Rejected {
            code: error.error_code(),
            severity: error.severity(),
            message: error.to_string(),
        }
    }

    /// Severity of a simulation rejection, `None` for runtime failures.
    pub fn severity(&self) -> Option<ErrorSeverity> {
        match self {
            Self::Rejected { severity, .. } => Some(*severity),
            _ => None,
        }
    }
}
