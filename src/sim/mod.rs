//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only (one tick per rendered frame)
//! - Seeded RNG only
//! - Stable iteration order (players and obstacles in detection order)
//! - No capture, detection or drawing dependencies

pub mod collision;
pub mod course;
pub mod physics;
pub mod session;
pub mod state;
pub mod turn;

pub use collision::{CollisionResult, reflect_planar, resolve_obstacles};
pub use course::{Course, build_course, initial_layout, regenerate_layout};
pub use physics::{PhysicsParams, TickResult, advance, is_captured};
pub use session::{GameSession, SessionView, TickStatus};
pub use state::{Ball, Hole, Obstacle, Player, RoundPhase, estimate_depth};
pub use turn::{Advance, STROKES_PER_HOLE_OUT, StrokeOutcome, SwingError, apply_stroke, on_holed};
