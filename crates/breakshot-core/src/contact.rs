//! Contact interpreter: raw contact reports to domain events.
//!
//! The physics layer reports body pairs, not game meaning. The interpreter
//! classifies each [`felt::ContactReport`] against the ball registry and its
//! known pocket sensors:
//!
//! - Sensor persistence with exactly one ball and one pocket participant is
//!   a pocket-capture candidate. The ball is captured iff its center is
//!   within one ball radius of the pocket's world-space center: deep enough
//!   to have visually entered the mouth, not merely grazing it.
//! - A contact begin between two balls is a collision event; the shot
//!   accumulator derives the cue-touched flag from it.
//!
//! Reports with no ball participant, or with ambiguous roles, are dropped
//! silently (a non-match, not an error).

use std::collections::BTreeSet;

use felt::{BodyId, ContactReport, World};
use tracing::debug;

use crate::ball::BallRegistry;
use crate::event::TableEvent;

/// Classifier turning contact reports into [`TableEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct ContactInterpreter {
    /// Bodies registered as pocket sensors.
    pockets: BTreeSet<BodyId>,
}

impl ContactInterpreter {
    /// Creates an interpreter with no known pockets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a sensor body as a pocket.
    pub fn register_pocket(&mut self, body: BodyId) {
        self.pockets.insert(body);
    }

    /// Returns true if the body is a registered pocket.
    #[must_use]
    pub fn is_pocket(&self, body: BodyId) -> bool {
        self.pockets.contains(&body)
    }

    /// Classifies one contact report.
    ///
    /// Returns `None` for reports that carry no game meaning (no ball
    /// participant, unknown bodies, or a sensor overlap that has not crossed
    /// the capture threshold yet).
    #[must_use]
    pub fn classify(
        &self,
        report: ContactReport,
        world: &World,
        registry: &BallRegistry,
    ) -> Option<TableEvent> {
        match report {
            ContactReport::SensorPersist { a, b } => self.classify_sensor(a, b, world, registry),
            ContactReport::Begin { a, b } => {
                let ball_a = registry.ball_of(a)?;
                let ball_b = registry.ball_of(b)?;
                debug!(a = %ball_a, b = %ball_b, "balls collided");
                Some(TableEvent::BallsCollided(ball_a, ball_b))
            }
        }
    }

    fn classify_sensor(
        &self,
        a: BodyId,
        b: BodyId,
        world: &World,
        registry: &BallRegistry,
    ) -> Option<TableEvent> {
        // Exactly one participant must be a ball and the other a pocket.
        let (ball_body, pocket_body) = match (registry.ball_of(a), registry.ball_of(b)) {
            (Some(_), None) if self.is_pocket(b) => (a, b),
            (None, Some(_)) if self.is_pocket(a) => (b, a),
            _ => return None,
        };

        let ball = *world.body(ball_body)?;
        let pocket = *world.body(pocket_body)?;

        // World position of the pocket's geometric center: the sensor
        // circle is defined relative to the owning table frame.
        let pocket_in_world = pocket.shape_center();
        let distance = ball.position.distance(pocket_in_world);

        if distance <= ball.radius {
            let ball_id = registry.ball_of(ball_body)?;
            debug!(ball = %ball_id, distance, "pocket capture");
            Some(TableEvent::BallPocketed(ball_id))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::{BallId, BALL_RADIUS};
    use felt::{Bounds, WorldConfig};
    use glam::Vec2;

    fn test_world() -> World {
        World::new(WorldConfig {
            bounds: Bounds::new(2.84, 1.42),
            ..WorldConfig::default()
        })
    }

    struct Fixture {
        world: World,
        registry: BallRegistry,
        interpreter: ContactInterpreter,
        pocket: BodyId,
    }

    /// World with one pocket at (0.5, 0.25), its sensor hung off a frame at
    /// the origin.
    fn fixture() -> Fixture {
        let mut world = test_world();
        let pocket = world.add_sensor(Vec2::ZERO, Vec2::new(0.5, 0.25), 0.05);
        let mut interpreter = ContactInterpreter::new();
        interpreter.register_pocket(pocket);
        Fixture {
            world,
            registry: BallRegistry::new(),
            interpreter,
            pocket,
        }
    }

    mod sensor_tests {
        use super::*;

        #[test]
        fn ball_at_pocket_center_is_captured() {
            let mut fx = fixture();
            let body = fx.world.add_ball(Vec2::new(0.5, 0.25), BALL_RADIUS);
            fx.registry.insert(BallId::new(4), body);

            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: body, b: fx.pocket },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, Some(TableEvent::BallPocketed(BallId::new(4))));
        }

        #[test]
        fn capture_threshold_is_one_ball_radius() {
            let mut fx = fixture();
            // Overlapping the sensor mouth but center more than one radius
            // from the pocket center: not captured.
            let body = fx
                .world
                .add_ball(Vec2::new(0.5 + BALL_RADIUS * 1.5, 0.25), BALL_RADIUS);
            fx.registry.insert(BallId::new(4), body);

            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: body, b: fx.pocket },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, None);

            // Exactly one radius away: captured (inclusive threshold).
            fx.world
                .set_position(body, Vec2::new(0.5 + BALL_RADIUS * 0.999, 0.25))
                .unwrap();
            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: body, b: fx.pocket },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, Some(TableEvent::BallPocketed(BallId::new(4))));
        }

        #[test]
        fn participant_order_does_not_matter() {
            let mut fx = fixture();
            let body = fx.world.add_ball(Vec2::new(0.5, 0.25), BALL_RADIUS);
            fx.registry.insert(BallId::CUE, body);

            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: fx.pocket, b: body },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, Some(TableEvent::BallPocketed(BallId::CUE)));
        }

        #[test]
        fn no_ball_participant_is_dropped() {
            let fx = fixture();
            let stray = BodyId::new(99);
            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: stray, b: fx.pocket },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, None);
        }

        #[test]
        fn unregistered_sensor_is_dropped() {
            let mut fx = fixture();
            let body = fx.world.add_ball(Vec2::new(0.5, 0.25), BALL_RADIUS);
            fx.registry.insert(BallId::new(4), body);
            let unregistered = fx.world.add_sensor(Vec2::new(0.5, 0.25), Vec2::ZERO, 0.05);

            let event = fx.interpreter.classify(
                ContactReport::SensorPersist { a: body, b: unregistered },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, None);
        }
    }

    mod collision_tests {
        use super::*;

        #[test]
        fn ball_ball_begin_is_a_collision() {
            let mut fx = fixture();
            let body_a = fx.world.add_ball(Vec2::ZERO, BALL_RADIUS);
            let body_b = fx.world.add_ball(Vec2::new(0.05, 0.0), BALL_RADIUS);
            fx.registry.insert(BallId::CUE, body_a);
            fx.registry.insert(BallId::new(9), body_b);

            let event = fx.interpreter.classify(
                ContactReport::Begin { a: body_a, b: body_b },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(
                event,
                Some(TableEvent::BallsCollided(BallId::CUE, BallId::new(9)))
            );
        }

        #[test]
        fn begin_with_unknown_body_is_dropped() {
            let mut fx = fixture();
            let body_a = fx.world.add_ball(Vec2::ZERO, BALL_RADIUS);
            fx.registry.insert(BallId::CUE, body_a);

            let event = fx.interpreter.classify(
                ContactReport::Begin { a: body_a, b: BodyId::new(77) },
                &fx.world,
                &fx.registry,
            );
            assert_eq!(event, None);
        }
    }
}
