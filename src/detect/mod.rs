//! External hand-landmark detector interface.
//!
//! The detection model itself lives outside this crate; the session engine
//! depends only on the output shape.

use crate::capture::CameraFrame;
use crate::hand::Landmark;

/// Black-box hand-landmark detector.
///
/// Implementations wrap whatever model backend the integrator provides and
/// yield zero or more hands per frame, each a fixed-order sequence of
/// normalized keypoints. Detections with the wrong point count are allowed
/// here; they are filtered downstream.
pub trait LandmarkDetector: Send {
    fn detect(&mut self, frame: &CameraFrame) -> Vec<Vec<Landmark>>;
}

impl<F> LandmarkDetector for F
where
    F: FnMut(&CameraFrame) -> Vec<Vec<Landmark>> + Send,
{
    fn detect(&mut self, frame: &CameraFrame) -> Vec<Vec<Landmark>> {
        self(frame)
    }
}

/// Creates a fresh detector instance for each mode activation.
pub type DetectorFactory = Box<dyn Fn() -> crate::Result<Box<dyn LandmarkDetector>> + Send>;
