//! Detection snapshots from the object detector
//!
//! The detector itself lives outside this crate. It hands over one fully
//! materialized [`Snapshot`] per frame; the course builder consumes it once.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::PERSON_LABEL;

/// Errors raised while ingesting detector output
#[derive(Debug, Error)]
pub enum PerceptionError {
    #[error("invalid snapshot json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Axis-aligned box in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    /// Build a box, normalizing swapped corners
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Mean of width and height, used as the apparent size for depth
    pub fn apparent_size(&self) -> f32 {
        (self.width() + self.height()) / 2.0
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from([x1, y1, x2, y2]: [f32; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// A single detected object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class label, e.g. "person", "cup", "chair"
    #[serde(rename = "class")]
    pub label: String,
    #[serde(rename = "box")]
    pub bbox: BoundingBox,
    /// Detector confidence; not filtered here
    #[serde(rename = "conf", default)]
    pub confidence: f32,
}

impl Detection {
    pub fn new(label: impl Into<String>, bbox: BoundingBox, confidence: f32) -> Self {
        Self {
            label: label.into(),
            bbox,
            confidence,
        }
    }

    pub fn is_person(&self) -> bool {
        self.label == PERSON_LABEL
    }
}

/// One immutable set of detections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub detections: Vec<Detection>,
}

/// Accepted JSON shapes: a bare array or `{ "detections": [...] }`
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotJson {
    Bare(Vec<Detection>),
    Wrapped { detections: Vec<Detection> },
}

impl Snapshot {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }

    /// Parse detector output
    pub fn from_json(json: &str) -> Result<Self, PerceptionError> {
        let detections = match serde_json::from_str::<SnapshotJson>(json)? {
            SnapshotJson::Bare(d) => d,
            SnapshotJson::Wrapped { detections } => detections,
        };
        Ok(Self { detections })
    }

    /// Read and parse a snapshot file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, PerceptionError> {
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        log::info!("Loaded snapshot with {} detections", snapshot.detections.len());
        Ok(snapshot)
    }

    pub fn persons(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter().filter(|d| d.is_person())
    }

    pub fn objects(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter().filter(|d| !d.is_person())
    }
}

/// Frame size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameBounds {
    pub width: f32,
    pub height: f32,
}

impl FrameBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
