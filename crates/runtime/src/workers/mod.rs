//! Background workers owned by the runtime.
//!
//! Workers are internal implementation details. They communicate with the
//! public API via channels defined in [`crate::api`].
mod simulation;

pub(crate) use simulation::{Command, SimulationWorker};
