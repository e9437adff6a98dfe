//! Rigid-body collaborator boundary.
//!
//! The simulation never integrates motion itself. It reads velocities from the
//! physics world and asks it to apply impulses, change damping, or reshape
//! fixtures. Bodies are addressed by an opaque [`BodyHandle`].

/// Opaque handle to a rigid body owned by the physics collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHandle(pub u32);

/// 2D vector in physics units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Collision category assigned to a character's body fixture.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum BodyCategory {
    Player,
    Npc,
    /// No longer collides with weapons or other characters.
    Destroyed,
}

/// Which fixture of a character body is being redefined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FixtureKind {
    Body,
    Feet,
    Weapon,
}

/// Posture parameters the physics collaborator needs to rebuild a fixture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixtureShape {
    pub facing_right: bool,
    pub crouching: bool,
    pub attack_range: f32,
}

pub trait Physics {
    fn linear_velocity(&self, body: BodyHandle) -> Vec2;

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    fn linear_damping(&self, body: BodyHandle) -> f32;

    fn set_damping(&mut self, body: BodyHandle, damping: f32);

    fn destroy_body(&mut self, body: BodyHandle);

    fn set_body_category(&mut self, body: BodyHandle, category: BodyCategory);

    /// Turns the feet fixture into a sensor so the body falls through
    /// one-way platforms.
    fn set_feet_sensor(&mut self, body: BodyHandle, sensor: bool);

    fn redefine_fixture(&mut self, body: BodyHandle, kind: FixtureKind, shape: FixtureShape);
}
