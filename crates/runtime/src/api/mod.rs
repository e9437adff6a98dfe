//! Public API surface for runtime consumers.
//!
//! Re-exports the handle, intent and snapshot types, and the error type that
//! downstream crates interact with.
mod errors;
mod handle;
mod intent;
mod snapshot;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use intent::Intent;
pub use snapshot::CharacterSnapshot;
