//! Recording collaborators for unit tests.

use std::collections::BTreeMap;

use crate::inventory::{ItemDefinition, ItemKey};
use crate::skill::SkillProfile;
use crate::state::CharacterId;

use super::{
    AnimationRequest, Audio, BodyCategory, BodyHandle, ContentOracle, FixtureKind, FixtureShape,
    Physics, Presentation, SimEnv, Vec2,
};

#[derive(Debug, Default)]
pub struct RecordingPhysics {
    pub velocities: BTreeMap<BodyHandle, Vec2>,
    pub damping: BTreeMap<BodyHandle, f32>,
    pub impulses: Vec<(BodyHandle, Vec2)>,
    pub categories: Vec<(BodyHandle, BodyCategory)>,
    pub destroyed: Vec<BodyHandle>,
    pub feet_sensor: Vec<(BodyHandle, bool)>,
    pub fixtures: Vec<(BodyHandle, FixtureKind, FixtureShape)>,
}

impl RecordingPhysics {
    pub fn velocity(&self, body: BodyHandle) -> Vec2 {
        self.velocities.get(&body).copied().unwrap_or_default()
    }
}

impl Physics for RecordingPhysics {
    fn linear_velocity(&self, body: BodyHandle) -> Vec2 {
        self.velocity(body)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        self.velocities.insert(body, velocity);
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        self.impulses.push((body, impulse));
    }

    fn linear_damping(&self, body: BodyHandle) -> f32 {
        self.damping.get(&body).copied().unwrap_or(0.0)
    }

    fn set_damping(&mut self, body: BodyHandle, damping: f32) {
        self.damping.insert(body, damping);
    }

    fn destroy_body(&mut self, body: BodyHandle) {
        self.destroyed.push(body);
    }

    fn set_body_category(&mut self, body: BodyHandle, category: BodyCategory) {
        self.categories.push((body, category));
    }

    fn set_feet_sensor(&mut self, body: BodyHandle, sensor: bool) {
        self.feet_sensor.push((body, sensor));
    }

    fn redefine_fixture(&mut self, body: BodyHandle, kind: FixtureKind, shape: FixtureShape) {
        self.fixtures.push((body, kind, shape));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PresentationCue {
    HitEffect(CharacterId),
    FloatingDamage(CharacterId, u32),
    AfterImage(CharacterId, bool),
}

#[derive(Debug, Default)]
pub struct RecordingPresentation {
    pub animations: Vec<(CharacterId, AnimationRequest)>,
    pub cues: Vec<PresentationCue>,
    pub status_refreshes: usize,
}

impl Presentation for RecordingPresentation {
    fn play_animation(&mut self, character: CharacterId, request: AnimationRequest) {
        self.animations.push((character, request));
    }

    fn show_floating_damage(&mut self, character: CharacterId, amount: u32) {
        self.cues.push(PresentationCue::FloatingDamage(character, amount));
    }

    fn show_hit_effect(&mut self, character: CharacterId) {
        self.cues.push(PresentationCue::HitEffect(character));
    }

    fn refresh_status_bars(&mut self) {
        self.status_refreshes += 1;
    }

    fn register_after_image(&mut self, character: CharacterId) {
        self.cues.push(PresentationCue::AfterImage(character, true));
    }

    fn unregister_after_image(&mut self, character: CharacterId) {
        self.cues.push(PresentationCue::AfterImage(character, false));
    }
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<String>,
}

impl Audio for RecordingAudio {
    fn play_sfx(&mut self, sfx: &str) {
        self.played.push(sfx.to_owned());
    }
}

/// Owns one of each recorder and lends them out as a [`SimEnv`].
#[derive(Debug, Default)]
pub struct TestEnv {
    pub physics: RecordingPhysics,
    pub presentation: RecordingPresentation,
    pub audio: RecordingAudio,
}

impl TestEnv {
    pub fn env(&mut self) -> SimEnv<'_> {
        SimEnv::new(&mut self.physics, &mut self.presentation, &mut self.audio)
    }
}

#[derive(Clone, Debug, Default)]
pub struct StaticContent {
    items: BTreeMap<ItemKey, ItemDefinition>,
    skills: BTreeMap<String, SkillProfile>,
}

impl StaticContent {
    pub fn with_item(mut self, definition: ItemDefinition) -> Self {
        self.items.insert(definition.key.clone(), definition);
        self
    }

    pub fn with_skill(mut self, profile: SkillProfile) -> Self {
        self.skills.insert(profile.name.clone(), profile);
        self
    }
}

impl ContentOracle for StaticContent {
    fn item(&self, key: &ItemKey) -> Option<ItemDefinition> {
        self.items.get(key).cloned()
    }

    fn skill(&self, name: &str) -> Option<SkillProfile> {
        self.skills.get(name).cloned()
    }
}
