//! Test setup utilities shared across the integration suite.

use glam::Vec2;

use crate::event::GameNotice;
use crate::session::{GameConfig, Session};

/// A session whose rack shuffle uses the given seed.
pub fn seeded_session(seed: u64) -> Session {
    Session::new(GameConfig {
        rack_seed: seed,
        ..GameConfig::default()
    })
}

/// Runs the step loop until the table settles. Panics if it never does.
pub fn settle(session: &mut Session) {
    for _ in 0..50_000 {
        if !session.step() {
            return;
        }
    }
    panic!("table never settled");
}

/// Strokes the cue ball toward `target` with the given strength.
///
/// The stick ray starts behind the cue ball on the cue-target line, so it
/// always strikes the cue ball first.
pub fn shoot_cue_at(session: &mut Session, target: Vec2, strength: f32) {
    let cue = session.cue_position().expect("cue ball on the table");
    let dir = (target - cue).normalize();
    session
        .stroke(cue - dir * 0.2, dir, strength)
        .expect("stroke accepted");
}

/// All foul messages among the notices, in order.
pub fn foul_messages(notices: &[GameNotice]) -> Vec<&str> {
    notices
        .iter()
        .filter_map(|n| match n {
            GameNotice::Foul(text) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Net balls on the table implied by the add/remove notice stream.
pub fn notice_ball_delta(notices: &[GameNotice]) -> i64 {
    notices
        .iter()
        .map(|n| match n {
            GameNotice::BallAdded { .. } => 1,
            GameNotice::BallRemoved(_) => -1,
            _ => 0,
        })
        .sum()
}
