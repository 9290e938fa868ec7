//! AR Golf - mini golf played on a course built from camera detections
//!
//! Core modules:
//! - `perception`: Detection snapshots handed over by the object detector
//! - `settings`: Data-driven tuning (physics constants, course layout, policies)
//! - `sim`: Deterministic simulation (course building, physics, turns, session)
//! - `scorecard`: Standings, par comparison and HUD text

pub mod perception;
pub mod scorecard;
pub mod settings;
pub mod sim;

pub use perception::{BoundingBox, Detection, FrameBounds, PerceptionError, Snapshot};
pub use scorecard::{Scorecard, ScorecardEntry};
pub use settings::{GolfSettings, JitterBox, ObstaclePolicy, SettingsError, StrokePolicy};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Holes in a round
    pub const MAX_HOLES: u32 = 9;
    /// Par for holes 1..=9
    pub const PAR_VALUES: [u32; 9] = [3, 4, 3, 5, 4, 3, 4, 5, 4];

    /// Ball radius (pixels, render only)
    pub const BALL_RADIUS: f32 = 15.0;
    /// Distance under which the ball drops into the hole
    pub const HOLE_RADIUS: f32 = 20.0;

    /// Velocity multiplier applied once per tick (not per second)
    pub const FRICTION: f32 = 0.92;
    /// Velocity multiplier on x/y when overlapping an obstacle
    pub const RESTITUTION: f32 = -0.5;
    /// Speed given by the "swing toward hole" action
    pub const SWING_POWER: f32 = 20.0;
    /// Below this speed the ball counts as at rest
    pub const REST_SPEED: f32 = 0.05;

    /// Depth estimate: z = max(DEPTH_FLOOR, DEPTH_SCALE / apparent size)
    pub const DEPTH_SCALE: f32 = 1000.0;
    pub const DEPTH_FLOOR: f32 = 50.0;
    /// Depth of the tee and hole planes
    pub const NOMINAL_DEPTH: f32 = 200.0;

    /// Initial tee offset from the bottom-left corner
    pub const TEE_MARGIN_X: f32 = 100.0;
    pub const TEE_MARGIN_Y: f32 = 100.0;
    /// Initial hole offset from the top-right corner
    pub const HOLE_MARGIN_X: f32 = 150.0;
    pub const HOLE_MARGIN_Y: f32 = 100.0;

    /// Class label the detector uses for people
    pub const PERSON_LABEL: &str = "person";
}

/// Euclidean distance between two points in 3D
#[inline]
pub fn distance3(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Unit vector in the direction of `v`, or `None` when it has no direction
#[inline]
pub fn normalize_direction(v: Vec3) -> Option<Vec3> {
    v.try_normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance3() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert!((distance3(a, b) - 5.0).abs() < 1e-6);
        assert_eq!(distance3(a, b), distance3(b, a));
        assert_eq!(distance3(a, a), 0.0);
    }

    #[test]
    fn test_normalize_direction() {
        let dir = normalize_direction(Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dir.x - 0.6).abs() < 1e-6);

        assert!(normalize_direction(Vec3::ZERO).is_none());
        assert!(normalize_direction(Vec3::new(f32::NAN, 1.0, 0.0)).is_none());
    }
}
