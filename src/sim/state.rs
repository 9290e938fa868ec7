//! Game entities and round phase
//!
//! Everything the session owns lives here as plain data so renderers can
//! read it without touching simulation logic.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::perception::Detection;

/// Where the round is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// No course built yet
    #[default]
    Idle,
    /// Players are taking turns
    RoundActive,
    /// Last player finished the last hole; terminal
    RoundComplete,
}

/// The golf ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Render radius; physics treats the ball as a point
    pub radius: f32,
}

impl Ball {
    /// A ball at rest on the tee
    pub fn at(tee: Vec3) -> Self {
        Self {
            pos: tee,
            vel: Vec3::ZERO,
            radius: BALL_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    pub fn is_at_rest(&self, rest_speed: f32) -> bool {
        self.speed() < rest_speed
    }
}

/// The cup the ball must reach
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub pos: Vec3,
    /// Ball is captured strictly inside this distance
    pub capture_radius: f32,
    pub par: u32,
}

impl Hole {
    pub fn new(pos: Vec3, capture_radius: f32) -> Self {
        Self {
            pos,
            capture_radius,
            par: 0,
        }
    }

    pub fn with_par(mut self, par: u32) -> Self {
        self.par = par;
        self
    }
}

/// A static obstacle built from a non-person detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub label: String,
    /// Footprint center in frame pixels
    pub center: Vec2,
    pub half_extents: Vec2,
    /// Estimated distance from the camera
    pub depth: f32,
}

impl Obstacle {
    /// Build from a detection with a depth estimate of
    /// `max(depth_floor, depth_scale / apparent size)`
    pub fn from_detection(det: &Detection, depth_scale: f32, depth_floor: f32) -> Self {
        let bbox = det.bbox;
        Self {
            label: det.label.clone(),
            center: bbox.center(),
            half_extents: Vec2::new(bbox.width(), bbox.height()) / 2.0,
            depth: estimate_depth(bbox.apparent_size(), depth_scale, depth_floor),
        }
    }

    pub fn width(&self) -> f32 {
        self.half_extents.x * 2.0
    }

    pub fn height(&self) -> f32 {
        self.half_extents.y * 2.0
    }

    /// Strict containment of a point in the footprint (z ignored)
    pub fn contains(&self, p: Vec3) -> bool {
        (p.x - self.center.x).abs() < self.half_extents.x
            && (p.y - self.center.y).abs() < self.half_extents.y
    }
}

/// Larger things look closer. Sizes under one pixel count as one pixel.
pub fn estimate_depth(apparent_size: f32, depth_scale: f32, depth_floor: f32) -> f32 {
    let size = if apparent_size.is_finite() {
        apparent_size.max(1.0)
    } else {
        1.0
    };
    (depth_scale / size).max(depth_floor)
}

/// A golfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// One entry per completed hole
    pub strokes: Vec<u32>,
    /// Sum of `strokes`
    pub total: u32,
    /// Swings attempted this round (not used for scoring)
    #[serde(default)]
    pub swings: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strokes: Vec::new(),
            total: 0,
            swings: 0,
        }
    }

    /// Default name for the 0-based player index
    pub fn numbered(index: usize) -> Self {
        Self::new(format!("Player {}", index + 1))
    }

    pub fn holes_completed(&self) -> usize {
        self.strokes.len()
    }

    /// Record a completed hole
    pub fn record_hole(&mut self, strokes: u32) {
        self.strokes.push(strokes);
        self.total += strokes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perception::BoundingBox;

    #[test]
    fn test_depth_inverse_and_floor() {
        // 1000 / 10 = 100
        assert_eq!(estimate_depth(10.0, 1000.0, 50.0), 100.0);
        // Bigger box is closer
        assert!(estimate_depth(15.0, 1000.0, 50.0) < estimate_depth(10.0, 1000.0, 50.0));
        // 1000 / 100 = 10 is clamped to the floor
        assert_eq!(estimate_depth(100.0, 1000.0, 50.0), 50.0);
    }

    #[test]
    fn test_depth_degenerate_box_is_finite() {
        assert_eq!(estimate_depth(0.0, 1000.0, 50.0), 1000.0);
        assert_eq!(estimate_depth(-4.0, 1000.0, 50.0), 1000.0);
        assert!(estimate_depth(f32::NAN, 1000.0, 50.0).is_finite());
    }

    #[test]
    fn test_obstacle_from_detection() {
        let det = Detection::new("chair", BoundingBox::new(100.0, 200.0, 140.0, 220.0), 0.8);
        let obs = Obstacle::from_detection(&det, 1000.0, 50.0);
        assert_eq!(obs.label, "chair");
        assert_eq!(obs.center, Vec2::new(120.0, 210.0));
        assert_eq!(obs.width(), 40.0);
        assert_eq!(obs.height(), 20.0);
        // size = 30 -> 33.3 -> floor 50
        assert_eq!(obs.depth, 50.0);
    }

    #[test]
    fn test_obstacle_contains_is_strict() {
        let det = Detection::new("box", BoundingBox::new(0.0, 0.0, 20.0, 20.0), 1.0);
        let obs = Obstacle::from_detection(&det, 1000.0, 50.0);
        assert!(obs.contains(Vec3::new(10.0, 10.0, 999.0)));
        assert!(obs.contains(Vec3::new(19.9, 0.1, 0.0)));
        // On the edge is outside
        assert!(!obs.contains(Vec3::new(20.0, 10.0, 0.0)));
        assert!(!obs.contains(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_player_record_hole() {
        let mut p = Player::numbered(0);
        assert_eq!(p.name, "Player 1");
        p.record_hole(1);
        p.record_hole(1);
        assert_eq!(p.strokes, vec![1, 1]);
        assert_eq!(p.total, 2);
        assert_eq!(p.holes_completed(), 2);
    }

    #[test]
    fn test_ball_rest() {
        let mut ball = Ball::at(Vec3::new(1.0, 2.0, 3.0));
        assert!(ball.is_at_rest(REST_SPEED));
        ball.vel = Vec3::new(0.0, 1.0, 0.0);
        assert!(!ball.is_at_rest(REST_SPEED));
    }
}
