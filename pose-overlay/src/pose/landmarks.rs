//! Landmark data model
//!
//! One analysis produces a `LandmarkSequence`: one `LandmarkFrame` per
//! sampled instant, each frame holding the MediaPipe pose landmarks for that
//! instant. The sequence is immutable once received and shared cheaply
//! between the analysis session and the overlay controller.

use serde::Deserialize;
use std::rc::Rc;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const POSE_LANDMARK_COUNT: usize = 33;

pub const NOSE: usize = 0;
pub const LEFT_EYE_INNER: usize = 1;
pub const LEFT_EYE: usize = 2;
pub const LEFT_EYE_OUTER: usize = 3;
pub const RIGHT_EYE_INNER: usize = 4;
pub const RIGHT_EYE: usize = 5;
pub const RIGHT_EYE_OUTER: usize = 6;
pub const LEFT_EAR: usize = 7;
pub const RIGHT_EAR: usize = 8;
pub const MOUTH_LEFT: usize = 9;
pub const MOUTH_RIGHT: usize = 10;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_PINKY: usize = 17;
pub const RIGHT_PINKY: usize = 18;
pub const LEFT_INDEX: usize = 19;
pub const RIGHT_INDEX: usize = 20;
pub const LEFT_THUMB: usize = 21;
pub const RIGHT_THUMB: usize = 22;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;
pub const LEFT_HEEL: usize = 29;
pub const RIGHT_HEEL: usize = 30;
pub const LEFT_FOOT_INDEX: usize = 31;
pub const RIGHT_FOOT_INDEX: usize = 32;

// ============================================================================
// LANDMARK DATA STRUCTURES
// ============================================================================

/// A single tracked body point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized, fraction of frame width
    pub y: f32, // 0-1 normalized, fraction of frame height
    #[serde(default)]
    pub z: f32, // Relative depth
    #[serde(default)]
    pub visibility: f32, // 0-1 confidence
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, z: 0.0, visibility }
    }

    /// Position scaled to a surface of the given pixel size
    pub fn scaled(&self, width: f64, height: f64) -> (f64, f64) {
        (self.x as f64 * width, self.y as f64 * height)
    }
}

/// All landmarks for one sampled instant.
///
/// Empty when the pose detector found nobody in that frame.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct LandmarkFrame(Vec<Landmark>);

impl LandmarkFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Landmark> {
        self.0.iter()
    }

    /// (x, y) of a landmark, if present
    pub fn point(&self, index: usize) -> Option<(f32, f32)> {
        self.get(index).map(|lm| (lm.x, lm.y))
    }
}

impl From<Vec<Landmark>> for LandmarkFrame {
    fn from(landmarks: Vec<Landmark>) -> Self {
        Self(landmarks)
    }
}

/// Ordered landmark frames for a whole analyzed video.
///
/// Cloning shares the same frames; nothing can mutate them after creation.
#[derive(Clone, Debug, Deserialize)]
#[serde(from = "Vec<LandmarkFrame>")]
pub struct LandmarkSequence(Rc<[LandmarkFrame]>);

impl LandmarkSequence {
    pub fn new(frames: Vec<LandmarkFrame>) -> Self {
        Self(frames.into())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&LandmarkFrame> {
        self.0.get(index)
    }

    pub fn frames(&self) -> &[LandmarkFrame] {
        &self.0
    }

    pub fn first(&self) -> Option<&LandmarkFrame> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&LandmarkFrame> {
        self.0.last()
    }

    /// True if at least one frame contains a detected pose
    pub fn has_poses(&self) -> bool {
        self.0.iter().any(|frame| !frame.is_empty())
    }

    /// Whether two handles share the same underlying frames
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<LandmarkFrame>> for LandmarkSequence {
    fn from(frames: Vec<LandmarkFrame>) -> Self {
        Self::new(frames)
    }
}

impl PartialEq for LandmarkSequence {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
