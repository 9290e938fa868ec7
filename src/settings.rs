//! Game settings and tuning
//!
//! Loaded from a JSON file when one is given; every field falls back to the
//! values in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// What happens to obstacles when the round moves to the next hole
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ObstaclePolicy {
    /// Keep the obstacles detected at session start
    #[default]
    Persist,
    /// Play every hole after the first on an empty course
    Clear,
}

impl ObstaclePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObstaclePolicy::Persist => "persist",
            ObstaclePolicy::Clear => "clear",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "persist" | "keep" => Some(ObstaclePolicy::Persist),
            "clear" | "reset" => Some(ObstaclePolicy::Clear),
            _ => None,
        }
    }
}

/// When a swing is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrokePolicy {
    /// Swings overwrite the ball velocity even while it rolls
    #[default]
    AnyTime,
    /// Swings are refused until the ball speed drops below `rest_speed`
    AtRest,
}

impl StrokePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StrokePolicy::AnyTime => "any_time",
            StrokePolicy::AtRest => "at_rest",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "any_time" | "anytime" | "always" => Some(StrokePolicy::AnyTime),
            "at_rest" | "rest" => Some(StrokePolicy::AtRest),
            _ => None,
        }
    }
}

/// Rectangle of allowed positions: origin + [x_range) x [y_range)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JitterBox {
    pub origin: Vec2,
    pub x_range: (f32, f32),
    pub y_range: (f32, f32),
}

impl JitterBox {
    pub fn min(&self) -> Vec2 {
        self.origin + Vec2::new(self.x_range.0, self.y_range.0)
    }

    pub fn max(&self) -> Vec2 {
        self.origin + Vec2::new(self.x_range.1, self.y_range.1)
    }

    /// Finite origin and finite, non-empty ranges
    pub fn is_sampleable(&self) -> bool {
        let ordered = |(lo, hi): (f32, f32)| lo.is_finite() && hi.is_finite() && lo < hi;
        self.origin.is_finite() && ordered(self.x_range) && ordered(self.y_range)
    }

    /// Whether `p` lies in the half-open box
    pub fn contains(&self, p: Vec2) -> bool {
        let (lo, hi) = (self.min(), self.max());
        p.x >= lo.x && p.x < hi.x && p.y >= lo.y && p.y < hi.y
    }
}

/// All tunables for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GolfSettings {
    // === Round ===
    pub max_holes: u32,
    /// Par per hole; holes past the end of the table fall back to the last entry
    pub par: Vec<u32>,

    // === Physics ===
    pub ball_radius: f32,
    pub hole_radius: f32,
    /// Per-tick velocity multiplier
    pub friction: f32,
    pub restitution: f32,
    pub swing_power: f32,
    pub rest_speed: f32,

    // === Course ===
    pub depth_scale: f32,
    pub depth_floor: f32,
    pub nominal_depth: f32,
    pub tee_margin: Vec2,
    pub hole_margin: Vec2,
    pub tee_jitter: JitterBox,
    pub hole_jitter: JitterBox,

    // === Policies ===
    pub obstacle_policy: ObstaclePolicy,
    pub stroke_policy: StrokePolicy,

    /// Seed for hole regeneration jitter
    pub seed: u64,
}

impl Default for GolfSettings {
    fn default() -> Self {
        Self {
            max_holes: MAX_HOLES,
            par: PAR_VALUES.to_vec(),

            ball_radius: BALL_RADIUS,
            hole_radius: HOLE_RADIUS,
            friction: FRICTION,
            restitution: RESTITUTION,
            swing_power: SWING_POWER,
            rest_speed: REST_SPEED,

            depth_scale: DEPTH_SCALE,
            depth_floor: DEPTH_FLOOR,
            nominal_depth: NOMINAL_DEPTH,
            tee_margin: Vec2::new(TEE_MARGIN_X, TEE_MARGIN_Y),
            hole_margin: Vec2::new(HOLE_MARGIN_X, HOLE_MARGIN_Y),
            tee_jitter: JitterBox {
                origin: Vec2::new(100.0, 400.0),
                x_range: (0.0, 200.0),
                y_range: (-50.0, 50.0),
            },
            hole_jitter: JitterBox {
                origin: Vec2::new(500.0, 150.0),
                x_range: (0.0, 200.0),
                y_range: (-50.0, 50.0),
            },

            obstacle_policy: ObstaclePolicy::Persist,
            stroke_policy: StrokePolicy::AnyTime,

            seed: 0,
        }
    }
}

impl GolfSettings {
    /// Par for a 1-based hole number
    pub fn par_for(&self, hole: u32) -> u32 {
        let idx = hole.saturating_sub(1) as usize;
        self.par
            .get(idx)
            .or(self.par.last())
            .copied()
            .unwrap_or(0)
    }

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!(
                    "Using default settings ({}: {})",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field: &'static str, reason: &str| SettingsError::Invalid {
            field,
            reason: reason.to_string(),
        };

        if self.max_holes == 0 {
            return Err(invalid("max_holes", "must be at least 1"));
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(invalid("friction", "must be in (0, 1]"));
        }
        if !self.restitution.is_finite() || self.restitution.abs() > 1.0 {
            return Err(invalid("restitution", "must be in [-1, 1]"));
        }
        if !(self.hole_radius > 0.0 && self.hole_radius.is_finite()) {
            return Err(invalid("hole_radius", "must be positive"));
        }
        if !(self.depth_floor > 0.0
            && self.depth_scale > 0.0
            && self.depth_floor.is_finite()
            && self.depth_scale.is_finite())
        {
            return Err(invalid("depth_floor", "depth model must be positive"));
        }
        if !(self.swing_power >= 0.0 && self.swing_power.is_finite()) {
            return Err(invalid("swing_power", "must be non-negative"));
        }
        if !(self.rest_speed >= 0.0 && self.rest_speed.is_finite()) {
            return Err(invalid("rest_speed", "must be non-negative"));
        }
        if !self.ball_radius.is_finite() {
            return Err(invalid("ball_radius", "must be finite"));
        }
        if !self.nominal_depth.is_finite() {
            return Err(invalid("nominal_depth", "must be finite"));
        }
        if !(self.tee_margin.is_finite() && self.hole_margin.is_finite()) {
            return Err(invalid("tee_margin", "margins must be finite"));
        }
        let jitters = [("tee_jitter", &self.tee_jitter), ("hole_jitter", &self.hole_jitter)];
        for (field, jitter) in jitters {
            if !jitter.is_sampleable() {
                return Err(invalid(field, "ranges must be finite and non-empty"));
            }
        }
        Ok(())
    }

    /// Validated settings, or defaults when validation fails
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }
}
