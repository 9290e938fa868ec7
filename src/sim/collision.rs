//! Ball/obstacle collision
//!
//! Obstacles are axis-aligned footprints in the frame plane. A ball whose
//! (x, y) is strictly inside a footprint bounces: both planar velocity
//! components are scaled by the restitution factor. Overlaps with several
//! obstacles compound in obstacle order.

use glam::Vec3;

use super::state::Obstacle;

/// Result of resolving one tick's obstacle contacts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionResult {
    /// Number of obstacles the ball overlapped
    pub hits: usize,
    /// Velocity after all reflections
    pub vel: Vec3,
}

impl CollisionResult {
    pub fn miss(vel: Vec3) -> Self {
        Self { hits: 0, vel }
    }

    pub fn hit(&self) -> bool {
        self.hits > 0
    }
}

/// Scale planar velocity by `restitution`; z passes through
#[inline]
pub fn reflect_planar(vel: Vec3, restitution: f32) -> Vec3 {
    Vec3::new(vel.x * restitution, vel.y * restitution, vel.z)
}

/// Linear scan of every obstacle against the ball position
pub fn resolve_obstacles(
    pos: Vec3,
    vel: Vec3,
    obstacles: &[Obstacle],
    restitution: f32,
) -> CollisionResult {
    obstacles
        .iter()
        .filter(|obs| obs.contains(pos))
        .fold(CollisionResult::miss(vel), |acc, _| CollisionResult {
            hits: acc.hits + 1,
            vel: reflect_planar(acc.vel, restitution),
        })
}
