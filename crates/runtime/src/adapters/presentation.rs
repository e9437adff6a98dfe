use arpg_core::{AnimationRequest, CharacterId, Presentation};

use crate::events::{Event, EventBus, PresentationEvent};

/// Publishes presentation requests on [`crate::Topic::Presentation`].
#[derive(Clone)]
pub struct EventPresentation {
    bus: EventBus,
}

impl EventPresentation {
    pub fn new(bus: EventBus) -> Self {
        Self { bus }
    }

    fn publish(&self, event: PresentationEvent) {
        self.bus.publish(Event::Presentation(event));
    }
}

impl Presentation for EventPresentation {
    fn play_animation(&mut self, character: CharacterId, request: AnimationRequest) {
        self.publish(PresentationEvent::Animation { character, request });
    }

    fn show_floating_damage(&mut self, character: CharacterId, amount: u32) {
        self.publish(PresentationEvent::FloatingDamage { character, amount });
    }

    fn show_hit_effect(&mut self, character: CharacterId) {
        self.publish(PresentationEvent::HitEffect { character });
    }

    fn refresh_status_bars(&mut self) {
        self.publish(PresentationEvent::StatusBarsRefreshed);
    }

    fn register_after_image(&mut self, character: CharacterId) {
        self.publish(PresentationEvent::AfterImage {
            character,
            active: true,
        });
    }

    fn unregister_after_image(&mut self, character: CharacterId) {
        self.publish(PresentationEvent::AfterImage {
            character,
            active: false,
        });
    }
}
