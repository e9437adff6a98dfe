//! Velocity-only body store.

use std::collections::BTreeMap;

use tracing::trace;

use arpg_core::{BodyCategory, BodyHandle, FixtureKind, FixtureShape, Physics, Vec2};

/// State of one kinematic body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KinematicBody {
    pub velocity: Vec2,
    pub damping: f32,
    pub category: Option<BodyCategory>,
    pub feet_sensor: bool,
    fixtures: Vec<(FixtureKind, FixtureShape)>,
}

impl KinematicBody {
    /// Most recent shape the simulation requested for `kind`.
    pub fn fixture(&self, kind: FixtureKind) -> Option<FixtureShape> {
        self.fixtures
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, shape)| *shape)
    }
}

/// [`Physics`] implementation that stores velocities and fixture requests
/// without simulating collisions.
///
/// Impulses change velocity directly (unit mass). [`KinematicBodies::step`]
/// applies linear damping. Calls against destroyed or unknown handles are
/// ignored.
#[derive(Debug, Default)]
pub struct KinematicBodies {
    bodies: BTreeMap<BodyHandle, KinematicBody>,
    next_handle: u32,
}

impl KinematicBodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_body(&mut self) -> BodyHandle {
        let handle = BodyHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.insert(handle, KinematicBody::default());
        handle
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&KinematicBody> {
        self.bodies.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Applies linear damping to every body over `delta` seconds.
    pub fn step(&mut self, delta: f32) {
        for body in self.bodies.values_mut() {
            let factor = 1.0 / (1.0 + delta * body.damping.max(0.0));
            body.velocity.x *= factor;
            body.velocity.y *= factor;
        }
    }

    fn with_body(&mut self, handle: BodyHandle, apply: impl FnOnce(&mut KinematicBody)) {
        match self.bodies.get_mut(&handle) {
            Some(body) => apply(body),
            None => trace!(?handle, "ignoring call on missing body"),
        }
    }
}

impl Physics for KinematicBodies {
    fn linear_velocity(&self, body: BodyHandle) -> Vec2 {
        self.bodies
            .get(&body)
            .map_or(Vec2::ZERO, |body| body.velocity)
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        self.with_body(body, |body| body.velocity = velocity);
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        self.with_body(body, |body| {
            body.velocity.x += impulse.x;
            body.velocity.y += impulse.y;
        });
    }

    fn linear_damping(&self, body: BodyHandle) -> f32 {
        self.bodies.get(&body).map_or(0.0, |body| body.damping)
    }

    fn set_damping(&mut self, body: BodyHandle, damping: f32) {
        self.with_body(body, |body| body.damping = damping);
    }

    fn destroy_body(&mut self, body: BodyHandle) {
        self.bodies.remove(&body);
    }

    fn set_body_category(&mut self, body: BodyHandle, category: BodyCategory) {
        self.with_body(body, |body| body.category = Some(category));
    }

    fn set_feet_sensor(&mut self, body: BodyHandle, sensor: bool) {
        self.with_body(body, |body| body.feet_sensor = sensor);
    }

    fn redefine_fixture(&mut self, body: BodyHandle, kind: FixtureKind, shape: FixtureShape) {
        self.with_body(body, |body| {
            body.fixtures.retain(|(existing, _)| *existing != kind);
            body.fixtures.push((kind, shape));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulses_accumulate_and_damping_slows() {
        let mut bodies = KinematicBodies::new();
        let handle = bodies.create_body();

        bodies.apply_impulse(handle, Vec2::new(2.0, 0.0));
        bodies.apply_impulse(handle, Vec2::new(2.0, 1.0));
        assert_eq!(bodies.linear_velocity(handle), Vec2::new(4.0, 1.0));

        bodies.set_damping(handle, 1.0);
        bodies.step(1.0);
        assert_eq!(bodies.linear_velocity(handle), Vec2::new(2.0, 0.5));
    }

    #[test]
    fn destroyed_bodies_ignore_calls() {
        let mut bodies = KinematicBodies::new();
        let handle = bodies.create_body();
        bodies.destroy_body(handle);

        bodies.apply_impulse(handle, Vec2::new(1.0, 1.0));
        assert_eq!(bodies.linear_velocity(handle), Vec2::ZERO);
        assert!(bodies.is_empty());
    }

    #[test]
    fn redefining_a_fixture_replaces_only_that_kind() {
        let mut bodies = KinematicBodies::new();
        let handle = bodies.create_body();
        let standing = FixtureShape {
            facing_right: true,
            crouching: false,
            attack_range: 0.2,
        };
        let crouched = FixtureShape {
            crouching: true,
            ..standing
        };

        bodies.redefine_fixture(handle, FixtureKind::Body, standing);
        bodies.redefine_fixture(handle, FixtureKind::Weapon, standing);
        bodies.redefine_fixture(handle, FixtureKind::Body, crouched);

        let body = bodies.body(handle).unwrap();
        assert_eq!(body.fixture(FixtureKind::Body), Some(crouched));
        assert_eq!(body.fixture(FixtureKind::Weapon), Some(standing));
        assert_eq!(body.fixture(FixtureKind::Feet), None);
    }
}
