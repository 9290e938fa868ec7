//! Per-tick ball dynamics
//!
//! One call to [`advance`] is one tick, and one tick is one rendered frame.
//! Friction is per tick, not per second: at a higher frame rate the same
//! swing covers the same distance in less wall-clock time. There is no
//! delta-time scaling.
//!
//! Tick order:
//! 1. friction (every velocity component scaled)
//! 2. Euler step (`pos += vel`)
//! 3. obstacle bounces
//! 4. hole capture check

use serde::{Deserialize, Serialize};

use super::collision::resolve_obstacles;
use super::state::{Ball, Hole, Obstacle};
use crate::consts::*;
use crate::distance3;
use crate::settings::GolfSettings;

/// Physics constants for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    pub friction: f32,
    pub restitution: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            restitution: RESTITUTION,
        }
    }
}

impl From<&GolfSettings> for PhysicsParams {
    fn from(settings: &GolfSettings) -> Self {
        Self {
            friction: settings.friction,
            restitution: settings.restitution,
        }
    }
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickResult {
    /// Ball ended strictly inside the capture radius
    pub holed: bool,
    /// Ball bounced off at least one obstacle
    pub bounced: bool,
    /// Ball or hole missing; nothing was simulated
    pub skipped: bool,
}

impl TickResult {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Default::default()
        }
    }
}

/// Strict capture test: never true at exactly the capture radius
#[inline]
pub fn is_captured(ball: &Ball, hole: &Hole) -> bool {
    distance3(ball.pos, hole.pos) < hole.capture_radius
}

/// Advance the ball by one fixed tick
pub fn advance(
    ball: Option<&mut Ball>,
    obstacles: &[Obstacle],
    hole: Option<&Hole>,
    params: &PhysicsParams,
) -> TickResult {
    let (Some(ball), Some(hole)) = (ball, hole) else {
        return TickResult::skipped();
    };

    ball.vel *= params.friction;
    ball.pos += ball.vel;

    let collision = resolve_obstacles(ball.pos, ball.vel, obstacles, params.restitution);
    ball.vel = collision.vel;

    TickResult {
        holed: is_captured(ball, hole),
        bounced: collision.hit(),
        skipped: false,
    }
}
