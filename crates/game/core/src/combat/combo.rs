use crate::config::SimConfig;
use crate::fsm::State;

/// Chain of attacks landed in quick succession.
///
/// Every successful attack extends the chain and restarts the window; the
/// chain resets when the window runs out or the character dodges.
#[derive(Clone, Debug, PartialEq)]
pub struct ComboTracker {
    chain: Vec<State>,
    window: f32,
    remaining: f32,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::with_window(SimConfig::DEFAULT_COMBO_WINDOW)
    }

    pub fn with_window(window: f32) -> Self {
        Self {
            chain: Vec::new(),
            window,
            remaining: 0.0,
        }
    }

    pub fn register(&mut self, attack: State) {
        self.chain.push(attack);
        self.remaining = self.window;
    }

    pub fn update(&mut self, delta: f32) {
        if self.chain.is_empty() {
            return;
        }
        self.remaining -= delta;
        if self.remaining <= 0.0 {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.chain.clear();
        self.remaining = 0.0;
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn chain(&self) -> &[State] {
        &self.chain
    }
}

impl Default for ComboTracker {
    fn default() -> Self {
        Self::new()
    }
}
