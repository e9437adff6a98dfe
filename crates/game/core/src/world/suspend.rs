use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global "make no further decisions" switch used while a map reload waits
/// for deferred callbacks to drain.
///
/// While raised, intents that would arm new timers are rejected.
#[derive(Clone, Debug, Default)]
pub struct SuspendFlag(Arc<AtomicBool>);

impl SuspendFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}
