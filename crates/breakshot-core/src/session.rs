//! Session: the simulation adapter that owns the table and runs the loop.
//!
//! A [`Session`] wires the whole pipeline together: the physics
//! [`felt::World`] with its pocket sensors and ball bodies, the
//! [`ContactInterpreter`], the [`MotionMonitor`], the [`ShotAccumulator`],
//! and the [`RuleEngine`]. Each [`Session::step`] advances the world one
//! fixed tick, classifies the raw contact reports into domain events, and
//! dispatches them in a fixed order: the motion-started edge first, contact
//! events next, the motion-settled edge last, so a shot is always opened
//! before its events and resolved after all of them.
//!
//! The session is single-threaded by construction; determinism follows from
//! the world's fixed timestep, ordered body iteration, and the seeded rack
//! shuffle.

use felt::{World, WorldConfig};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ball::{BallId, BallRegistry, BALL_RADIUS};
use crate::contact::ContactInterpreter;
use crate::error::GameError;
use crate::event::{GameNotice, PlayerId, TableEvent};
use crate::motion::{MotionMonitor, REST_EPSILON};
use crate::rack;
use crate::rules::{RuleEngine, ShotPhase, TableCommand};
use crate::shot::ShotAccumulator;
use crate::table::{Table, TableConfig};

/// Full configuration of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Table geometry and pocket sizing.
    pub table: TableConfig,
    /// Fixed simulation timestep in seconds.
    pub dt: f32,
    /// Exponential velocity damping coefficient (cloth drag).
    pub damping: f32,
    /// Cushion and ball restitution.
    pub restitution: f32,
    /// Speed below which the integrator snaps a ball to rest.
    pub rest_cutoff: f32,
    /// Speed below which the motion monitor counts a ball as resting.
    pub rest_epsilon: f32,
    /// Seed for the rack shuffle; reracks derive follow-up seeds from it.
    pub rack_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        let world = WorldConfig::default();
        Self {
            table: TableConfig::default(),
            dt: world.dt,
            damping: world.damping,
            restitution: world.restitution,
            rest_cutoff: world.rest_cutoff,
            rest_epsilon: REST_EPSILON,
            rack_seed: 0,
        }
    }
}

/// One running game: world, pipeline stages, and notice queue.
#[derive(Debug)]
pub struct Session {
    world: World,
    table: Table,
    registry: BallRegistry,
    interpreter: ContactInterpreter,
    monitor: MotionMonitor,
    accumulator: ShotAccumulator,
    rules: RuleEngine,
    /// Presentation notices queued since the last drain.
    notices: Vec<GameNotice>,
    /// Cue ball rest position captured at the last settle (respot target).
    cue_rest: Vec2,
    rack_seed: u64,
    /// Racks dealt so far; salts the shuffle seed per rerack.
    racks_dealt: u64,
}

impl Session {
    /// Creates a session with the break set up: fifteen object balls racked
    /// on the foot, the cue ball on the head spot, Player 1 to shoot.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let table = Table::new(config.table);
        let world = World::new(WorldConfig {
            bounds: table.bounds(),
            dt: config.dt,
            damping: config.damping,
            restitution: config.restitution,
            rest_cutoff: config.rest_cutoff,
        });

        let mut session = Self {
            world,
            table,
            registry: BallRegistry::new(),
            interpreter: ContactInterpreter::new(),
            monitor: MotionMonitor::with_epsilon(config.rest_epsilon),
            accumulator: ShotAccumulator::new(),
            rules: RuleEngine::new(),
            notices: Vec::new(),
            cue_rest: table.head_spot(),
            rack_seed: config.rack_seed,
            racks_dealt: 0,
        };

        // All pocket sensors hang off one static table frame at the origin.
        for pocket in session.table.pockets() {
            let body =
                session
                    .world
                    .add_sensor(Vec2::ZERO, pocket.offset, session.table.pocket_radius());
            session.interpreter.register_pocket(body);
        }

        let balls: Vec<BallId> = BallId::object_balls().collect();
        session.deal_rack(&balls);
        session.spawn_ball(BallId::CUE, session.table.head_spot());

        info!(seed = config.rack_seed, "session ready, break set up");
        session
    }

    /// Aims a ray into the table and strikes the first ball it hits.
    ///
    /// `origin` and `dir` define the cue stick's line; `strength` scales the
    /// impulse applied to the struck ball. Striking a ball other than the
    /// cue ball is accepted, but flagged as a foul for the coming shot.
    ///
    /// # Errors
    ///
    /// [`GameError::ShotInFlight`] while balls are moving,
    /// [`GameError::NothingStruck`] if the ray misses every ball.
    pub fn stroke(&mut self, origin: Vec2, dir: Vec2, strength: f32) -> Result<(), GameError> {
        if !self.rules.can_shoot() {
            return Err(GameError::ShotInFlight);
        }
        let hit = self
            .world
            .raycast(origin, dir)
            .ok_or(GameError::NothingStruck)?;

        match self.registry.ball_of(hit.body) {
            Some(ball) if ball.is_cue() => {}
            Some(ball) => {
                debug!(%ball, "stroke struck an object ball");
                self.accumulator.note_wrong_ball_struck();
            }
            // Raycast only reports balls; an unregistered one is a miss.
            None => return Err(GameError::NothingStruck),
        }

        self.world.apply_impulse(hit.body, dir.normalize() * strength)?;
        debug!(body = %hit.body, strength, "stroke applied");
        Ok(())
    }

    /// Advances the simulation one fixed tick.
    ///
    /// Returns `true` while a shot is still in flight, so a caller can run
    /// `while session.step() {}` to settle the table after a stroke.
    pub fn step(&mut self) -> bool {
        let reports = self.world.step();

        let mut events: Vec<TableEvent> = Vec::new();
        for report in reports {
            if let Some(event) = self.interpreter.classify(report, &self.world, &self.registry) {
                events.push(event);
            }
        }

        // Edge placement: a started edge opens the interval before any of
        // this tick's events, a settled edge closes it after all of them.
        let edge = self
            .monitor
            .observe(self.world.balls().map(|(_, body)| body.velocity));
        match edge {
            Some(TableEvent::MotionStarted) => events.insert(0, TableEvent::MotionStarted),
            Some(TableEvent::MotionSettled) => events.push(TableEvent::MotionSettled),
            _ => {}
        }

        for event in events {
            self.dispatch(event);
        }

        !self.rules.can_shoot()
    }

    fn dispatch(&mut self, event: TableEvent) {
        match event {
            TableEvent::MotionStarted => {
                self.rules.on_motion_started();
                self.accumulator.begin(self.cue_rest);
            }
            TableEvent::BallPocketed(ball) => {
                self.accumulator.record(event);
                if let Some(body) = self.registry.remove(ball) {
                    if self.world.remove_body(body).is_ok() {
                        self.notices.push(GameNotice::BallRemoved(ball));
                    }
                }
            }
            TableEvent::BallsCollided(_, _) => self.accumulator.record(event),
            TableEvent::MotionSettled => {
                let bundle = self.accumulator.settle();
                let resolution = self.rules.resolve(&bundle);
                self.notices.extend(resolution.notices);
                for command in resolution.commands {
                    self.apply_command(command);
                }
                if let Some(position) = self.cue_position() {
                    self.cue_rest = position;
                }
            }
        }
    }

    fn apply_command(&mut self, command: TableCommand) {
        match command {
            TableCommand::Rerack(balls) => self.deal_rack(&balls),
            TableCommand::RespotCue(position) => {
                self.spawn_ball(BallId::CUE, position);
                self.cue_rest = position;
            }
        }
    }

    /// Racks the given balls on the foot spot with a per-rack seed.
    fn deal_rack(&mut self, balls: &[BallId]) {
        let seed = self.rack_seed.wrapping_add(self.racks_dealt);
        self.racks_dealt += 1;
        for (ball, position) in rack::layout(&self.table, balls, seed) {
            self.spawn_ball(ball, position);
        }
    }

    fn spawn_ball(&mut self, ball: BallId, position: Vec2) {
        let body = self.world.add_ball(position, BALL_RADIUS);
        self.registry.insert(ball, body);
        self.notices.push(GameNotice::BallAdded { ball, position });
    }

    /// Takes all notices queued since the last drain, in emission order.
    pub fn drain_notices(&mut self) -> Vec<GameNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Current position of the cue ball, if it is on the table.
    #[must_use]
    pub fn cue_position(&self) -> Option<Vec2> {
        self.ball_position(BallId::CUE)
    }

    /// Current position of any ball, if it is on the table.
    #[must_use]
    pub fn ball_position(&self, ball: BallId) -> Option<Vec2> {
        self.registry
            .body_of(ball)
            .and_then(|body| self.world.position(body))
    }

    /// True when the table is settled and a stroke will be accepted.
    #[must_use]
    pub fn can_shoot(&self) -> bool {
        self.rules.can_shoot()
    }

    /// Where the engine is in the shot cycle.
    #[must_use]
    pub fn phase(&self) -> ShotPhase {
        self.rules.phase()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.rules.current_player()
    }

    /// A player's score.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> i32 {
        self.rules.score(player)
    }

    /// Number of balls currently on the table, cue included.
    #[must_use]
    pub fn balls_in_play(&self) -> usize {
        self.registry.len()
    }

    /// The table geometry.
    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Read access to the physics world, for observers and tests.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }
}
