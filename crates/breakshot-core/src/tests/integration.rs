//! End-to-end tests: stroke through physics to rule resolution.

use glam::Vec2;

use super::helpers::{foul_messages, notice_ball_delta, seeded_session, settle, shoot_cue_at};
use crate::ball::{BallId, BallRegistry, BALL_RADIUS};
use crate::contact::ContactInterpreter;
use crate::event::{GameNotice, PlayerId};
use crate::motion::MotionMonitor;
use crate::rules::RuleEngine;
use crate::shot::ShotAccumulator;
use felt::{Bounds, World, WorldConfig};

// =============================================================================
// Session-level runs
// =============================================================================

#[test]
fn break_shot_conserves_balls() {
    let mut session = seeded_session(11);
    let foot_center = Vec2::new(-session.table().config().width * 0.25, 0.0);
    shoot_cue_at(&mut session, foot_center, 4.0);
    settle(&mut session);

    let notices = session.drain_notices();
    let expected = usize::try_from(notice_ball_delta(&notices)).expect("net adds");
    assert_eq!(session.balls_in_play(), expected);
    assert!(session.can_shoot());
}

#[test]
fn deliberate_scratch_respots_cue_at_pre_shot_position() {
    let mut session = seeded_session(0);
    let start = session.cue_position().expect("cue on table");

    // Fire the cue ball straight into the far corner pocket. The rack sits
    // on the other half of the table, so nothing deflects it.
    let pocket = session.table().pockets()[5].offset;
    shoot_cue_at(&mut session, pocket, 3.0);
    settle(&mut session);

    assert_eq!(session.score(PlayerId::One), -1);
    assert_eq!(session.current_player(), PlayerId::Two);

    let cue = session.cue_position().expect("cue respotted");
    assert!(cue.distance(start) < 1e-5);
    let notices = session.drain_notices();
    assert!(notices.contains(&GameNotice::BallRemoved(BallId::CUE)));
    assert!(notices
        .iter()
        .any(|n| matches!(n, GameNotice::BallAdded { ball, .. } if ball.is_cue())));
    let fouls = foul_messages(&notices);
    assert_eq!(fouls.len(), 1);
    assert!(fouls[0].contains("pocketed the cue ball"));
}

#[test]
fn respotted_cue_is_at_rest_and_strokeable() {
    let mut session = seeded_session(0);
    let pocket = session.table().pockets()[5].offset;
    shoot_cue_at(&mut session, pocket, 3.0);
    settle(&mut session);
    session.drain_notices();

    // Player 2 can immediately play from the respotted cue ball.
    let away_from_rack = Vec2::new(session.table().config().width * 0.45, 0.0);
    shoot_cue_at(&mut session, away_from_rack, 0.8);
    settle(&mut session);
    assert_eq!(session.current_player(), PlayerId::One);
}

#[test]
fn alternating_no_contact_shots_alternate_turns() {
    let mut session = seeded_session(4);

    // Each player taps the cue ball toward the empty head rail.
    for expected_next in [PlayerId::Two, PlayerId::One] {
        let rail = Vec2::new(session.table().config().width * 0.49, 0.0);
        shoot_cue_at(&mut session, rail, 0.6);
        settle(&mut session);
        assert_eq!(session.current_player(), expected_next);
    }
    assert_eq!(session.score(PlayerId::One), -1);
    assert_eq!(session.score(PlayerId::Two), -1);
}

// =============================================================================
// Hand-assembled pipeline
// =============================================================================

struct Rig {
    world: World,
    registry: BallRegistry,
    interpreter: ContactInterpreter,
    monitor: MotionMonitor,
    accumulator: ShotAccumulator,
    rules: RuleEngine,
}

/// Minimal table: one pocket on the right rail, cue ball and the five ball
/// lined up in front of it.
fn rig() -> Rig {
    let mut world = World::new(WorldConfig {
        bounds: Bounds::new(2.0, 1.0),
        ..WorldConfig::default()
    });
    let mut interpreter = ContactInterpreter::new();
    let pocket = world.add_sensor(Vec2::ZERO, Vec2::new(0.9, 0.0), 0.05);
    interpreter.register_pocket(pocket);

    let mut registry = BallRegistry::new();
    let cue = world.add_ball(Vec2::new(0.0, 0.0), BALL_RADIUS);
    let five = world.add_ball(Vec2::new(0.3, 0.0), BALL_RADIUS);
    registry.insert(BallId::CUE, cue);
    registry.insert(BallId::new(5), five);

    Rig {
        world,
        registry,
        interpreter,
        monitor: MotionMonitor::new(),
        accumulator: ShotAccumulator::new(),
        rules: RuleEngine::new(),
    }
}

/// Steps the rig until the monitor settles, resolving at the boundary.
fn run_to_settle(rig: &mut Rig) -> crate::rules::Resolution {
    for _ in 0..50_000 {
        let reports = rig.world.step();
        let mut events = Vec::new();
        for report in reports {
            if let Some(event) = rig.interpreter.classify(report, &rig.world, &rig.registry) {
                events.push(event);
            }
        }
        let edge = rig
            .monitor
            .observe(rig.world.balls().map(|(_, b)| b.velocity));
        if edge == Some(crate::event::TableEvent::MotionStarted) {
            rig.rules.on_motion_started();
            rig.accumulator.begin(Vec2::ZERO);
        }
        for event in events {
            consume(rig, event);
        }
        if edge == Some(crate::event::TableEvent::MotionSettled) {
            let bundle = rig.accumulator.settle();
            return rig.rules.resolve(&bundle);
        }
    }
    panic!("rig never settled");
}

fn consume(rig: &mut Rig, event: crate::event::TableEvent) {
    if let crate::event::TableEvent::BallPocketed(ball) = event {
        if let Some(body) = rig.registry.remove(ball) {
            rig.world.remove_body(body).expect("pocketed body exists");
        }
    }
    rig.accumulator.record(event);
}

#[test]
fn straight_pot_scores_and_keeps_the_turn() {
    let mut rig = rig();
    let cue = rig.registry.body_of(BallId::CUE).expect("cue body");
    rig.world
        .apply_impulse(cue, Vec2::new(2.5, 0.0))
        .expect("cue exists");

    run_to_settle(&mut rig);

    assert_eq!(rig.rules.score(PlayerId::One), 1);
    assert_eq!(rig.rules.current_player(), PlayerId::One);
    assert!(!rig.registry.in_play(BallId::new(5)));
    assert!(rig.registry.in_play(BallId::CUE));
    assert_eq!(rig.rules.backlog(), &[BallId::new(5)]);
}

#[test]
fn soft_touch_without_pot_passes_the_turn() {
    let mut rig = rig();
    let cue = rig.registry.body_of(BallId::CUE).expect("cue body");
    // Enough to reach the five ball, nowhere near enough to pot it.
    rig.world
        .apply_impulse(cue, Vec2::new(0.7, 0.0))
        .expect("cue exists");

    let resolution = run_to_settle(&mut rig);

    assert_eq!(rig.rules.score(PlayerId::One), 0);
    assert_eq!(rig.rules.current_player(), PlayerId::Two);
    assert!(rig.registry.in_play(BallId::new(5)));
    assert!(resolution
        .notices
        .iter()
        .all(|n| !matches!(n, GameNotice::Foul(_))));
}
