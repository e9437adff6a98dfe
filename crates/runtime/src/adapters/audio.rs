use arpg_core::Audio;

use crate::events::{AudioEvent, Event, EventBus};

/// Publishes every sound effect on [`crate::Topic::Audio`].
#[derive(Clone)]
pub struct EventAudio {
    bus: EventBus,
}

impl EventAudio {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }
}

impl Audio for EventAudio {
    fn play_sfx(&mut self, sfx: &str) {
        self.bus.publish(Event::Audio(AudioEvent::Sfx {
            name: sfx.to_owned(),
        }));
    }
}
