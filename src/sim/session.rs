//! Game session: owns all round state and wires the pieces together
//!
//! The outer loop (capture, detection, drawing) calls [`GameSession::start`]
//! once with a snapshot, then [`GameSession::tick`] once per rendered frame
//! and [`GameSession::swing`] on player input.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::course::build_course;
use super::physics::{PhysicsParams, advance};
use super::state::{Ball, Hole, Obstacle, Player, RoundPhase};
use super::turn::{self, Advance, StrokeOutcome, SwingError};
use crate::perception::{FrameBounds, Snapshot};
use crate::scorecard::{Scorecard, hud_lines};
use crate::settings::GolfSettings;

/// Outcome of one call to [`GameSession::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    /// `start` has not been called
    NotStarted,
    /// Ball simulated, still in play
    Rolling { bounced: bool },
    /// Ball dropped; the turn manager already moved the round along
    HoledOut {
        player: usize,
        hole: u32,
        advance: Advance,
    },
    /// Terminal state; nothing was simulated
    RoundAlreadyComplete,
}

/// Read-only copy of everything a renderer needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub ball: Option<Ball>,
    pub hole: Option<Hole>,
    pub tee: Option<Vec3>,
    pub obstacles: Vec<Obstacle>,
    pub players: Vec<Player>,
    pub current_player: usize,
    pub current_hole: u32,
    pub phase: RoundPhase,
    pub round_active: bool,
}

/// One round of AR golf
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(crate) settings: GolfSettings,
    pub(crate) phase: RoundPhase,
    pub(crate) players: Vec<Player>,
    pub(crate) current_player: usize,
    /// 1-based; 0 before the first course is built
    pub(crate) current_hole: u32,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) ball: Option<Ball>,
    pub(crate) hole: Option<Hole>,
    pub(crate) tee: Option<Vec3>,
    pub(crate) rng: Pcg32,
    seed: u64,
    time_ticks: u64,
}

impl GameSession {
    /// Idle session seeded from `settings.seed`
    pub fn new(settings: GolfSettings) -> Self {
        let seed = settings.seed;
        Self::with_seed(settings, seed)
    }

    /// Idle session with an explicit jitter seed. Settings that fail
    /// validation are replaced by the defaults.
    pub fn with_seed(settings: GolfSettings, seed: u64) -> Self {
        Self {
            settings: settings.validated_or_default(),
            phase: RoundPhase::Idle,
            players: Vec::new(),
            current_player: 0,
            current_hole: 0,
            obstacles: Vec::new(),
            ball: None,
            hole: None,
            tee: None,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            time_ticks: 0,
        }
    }

    /// Build the course from a snapshot and begin a round. Calling this again
    /// discards the current round.
    pub fn start(&mut self, snapshot: &Snapshot, bounds: FrameBounds) {
        let course = build_course(snapshot, bounds, &self.settings);

        self.rng = Pcg32::seed_from_u64(self.seed);
        self.players = course.players;
        self.obstacles = course.obstacles;
        self.current_player = 0;
        self.current_hole = 1;
        self.tee = Some(course.tee);
        self.ball = Some(Ball::at(course.tee).with_radius(self.settings.ball_radius));
        self.hole = Some(
            Hole::new(course.hole, self.settings.hole_radius).with_par(self.settings.par_for(1)),
        );
        self.time_ticks = 0;
        self.phase = RoundPhase::RoundActive;

        log::info!(
            "Round started: {} players, {} obstacles, {} holes",
            self.players.len(),
            self.obstacles.len(),
            self.settings.max_holes
        );
    }

    /// Advance one frame: physics, then turn bookkeeping on a hole-out
    pub fn tick(&mut self) -> TickStatus {
        match self.phase {
            RoundPhase::Idle => return TickStatus::NotStarted,
            RoundPhase::RoundComplete => return TickStatus::RoundAlreadyComplete,
            RoundPhase::RoundActive => {}
        }

        let params = PhysicsParams::from(&self.settings);
        let result = advance(
            self.ball.as_mut(),
            &self.obstacles,
            self.hole.as_ref(),
            &params,
        );
        if result.skipped {
            log::warn!("Tick skipped: no ball or hole on an active round");
            return TickStatus::NotStarted;
        }
        self.time_ticks += 1;

        if !result.holed {
            return TickStatus::Rolling {
                bounced: result.bounced,
            };
        }

        let player = self.current_player;
        let hole = self.current_hole;
        match turn::on_holed(self) {
            Some(advance) => TickStatus::HoledOut {
                player,
                hole,
                advance,
            },
            None => TickStatus::Rolling { bounced: result.bounced },
        }
    }

    /// Hit the ball along `direction` at `power`
    pub fn swing(&mut self, direction: Vec3, power: f32) -> Result<StrokeOutcome, SwingError> {
        let outcome = turn::apply_stroke(self, direction, power);
        if let Err(e) = &outcome {
            log::warn!("Swing refused: {}", e);
        }
        outcome
    }

    /// Hit the ball straight at the cup with the configured power
    pub fn swing_toward_hole(&mut self) -> Result<StrokeOutcome, SwingError> {
        let direction = match (&self.ball, &self.hole) {
            (Some(ball), Some(hole)) => hole.pos - ball.pos,
            _ if self.phase == RoundPhase::RoundComplete => return Err(SwingError::RoundComplete),
            _ => return Err(SwingError::NotStarted),
        };
        self.swing(direction, self.settings.swing_power)
    }

    pub fn settings(&self) -> &GolfSettings {
        &self.settings
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn is_round_active(&self) -> bool {
        self.phase == RoundPhase::RoundActive
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn hole(&self) -> Option<&Hole> {
        self.hole.as_ref()
    }

    pub fn tee(&self) -> Option<Vec3> {
        self.tee
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn active_player(&self) -> Option<&Player> {
        if self.is_round_active() {
            self.players.get(self.current_player)
        } else {
            None
        }
    }

    pub fn current_hole(&self) -> u32 {
        self.current_hole
    }

    /// Ticks simulated since `start`
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Whether the ball has slowed below the rest threshold
    pub fn ball_at_rest(&self) -> bool {
        self.ball
            .map(|b| b.is_at_rest(self.settings.rest_speed))
            .unwrap_or(true)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            ball: self.ball,
            hole: self.hole,
            tee: self.tee,
            obstacles: self.obstacles.clone(),
            players: self.players.clone(),
            current_player: self.current_player,
            current_hole: self.current_hole,
            phase: self.phase,
            round_active: self.is_round_active(),
        }
    }

    pub fn scorecard(&self) -> Scorecard {
        Scorecard::new(&self.players, &self.settings, self.phase == RoundPhase::RoundComplete)
    }

    /// One status line per player, current player marked with `->`
    pub fn hud_lines(&self) -> Vec<String> {
        hud_lines(&self.players, self.current_player, self.current_hole)
    }
}
