//! Course construction from a detection snapshot
//!
//! Persons become players, everything else becomes an obstacle. The tee and
//! hole sit at fixed offsets from the frame corners for the first hole and
//! are jittered inside configured boxes for every later hole.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{Obstacle, Player};
use crate::perception::{FrameBounds, Snapshot};
use crate::settings::{GolfSettings, JitterBox};

/// Everything needed to start a round
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub players: Vec<Player>,
    pub obstacles: Vec<Obstacle>,
    pub tee: Vec3,
    pub hole: Vec3,
}

/// Build the opening course from a snapshot
pub fn build_course(snapshot: &Snapshot, bounds: FrameBounds, settings: &GolfSettings) -> Course {
    let mut players: Vec<Player> = snapshot
        .persons()
        .enumerate()
        .map(|(i, _)| Player::numbered(i))
        .collect();
    if players.is_empty() {
        players.push(Player::numbered(0));
    }

    let obstacles: Vec<Obstacle> = snapshot
        .objects()
        .map(|det| Obstacle::from_detection(det, settings.depth_scale, settings.depth_floor))
        .collect();

    let (tee, hole) = initial_layout(bounds, settings);

    Course {
        players,
        obstacles,
        tee,
        hole,
    }
}

/// Tee near bottom-left, hole near top-right
pub fn initial_layout(bounds: FrameBounds, settings: &GolfSettings) -> (Vec3, Vec3) {
    let z = settings.nominal_depth;
    let tee = Vec3::new(
        settings.tee_margin.x,
        bounds.height - settings.tee_margin.y,
        z,
    );
    let hole = Vec3::new(
        bounds.width - settings.hole_margin.x,
        settings.hole_margin.y,
        z,
    );
    (tee, hole)
}

/// New tee and hole for a later hole
pub fn regenerate_layout<R: Rng>(rng: &mut R, settings: &GolfSettings) -> (Vec3, Vec3) {
    let tee = sample_jitter(rng, &settings.tee_jitter).extend(settings.nominal_depth);
    let hole = sample_jitter(rng, &settings.hole_jitter).extend(settings.nominal_depth);
    (tee, hole)
}

fn sample_jitter<R: Rng>(rng: &mut R, jitter: &JitterBox) -> Vec2 {
    let dx = sample_range(rng, jitter.x_range);
    let dy = sample_range(rng, jitter.y_range);
    jitter.origin + Vec2::new(dx, dy)
}

/// Uniform in `[lo, hi)`. An empty range collapses to `lo`, and a
/// non-finite `lo` to the origin.
fn sample_range<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if !lo.is_finite() {
        0.0
    } else if hi.is_finite() && lo < hi {
        rng.random_range(lo..hi)
    } else {
        lo
    }
}
