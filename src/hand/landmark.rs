use serde::{Deserialize, Serialize};

/// Keypoints the detector reports per hand.
pub const LANDMARKS_PER_HAND: usize = 21;

/// Length of the flattened coordinate vector sent to the classifier.
pub const WIRE_VALUES: usize = LANDMARKS_PER_HAND * 3;

/// One detected 3-D hand keypoint, normalized to the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// One complete detected hand: exactly 21 keypoints in detector order.
///
/// Construction is fallible; detections with the wrong point count never
/// become a `LandmarkFrame`.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkFrame([Landmark; LANDMARKS_PER_HAND]);

impl LandmarkFrame {
    /// Build a frame from one raw detected hand. Returns `None` unless the
    /// hand has exactly 21 points.
    pub fn from_hand(hand: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARKS_PER_HAND] = hand.try_into().ok()?;
        Some(Self(points))
    }

    pub fn points(&self) -> &[Landmark; LANDMARKS_PER_HAND] {
        &self.0
    }

    /// Flatten into the 63-value wire vector: x, y, z per point, in point
    /// order.
    pub fn flatten(&self) -> Vec<f32> {
        self.0.iter().flat_map(|lm| [lm.x, lm.y, lm.z]).collect()
    }
}
