use crate::capture::{CameraFrame, FrameSource};
use crate::{CoachError, Result};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::info;

/// Webcam input backed by nokhwa.
pub struct CameraInput {
    camera: Camera,
}

impl CameraInput {
    /// Open the camera at the given index and start its stream.
    pub fn new(index: u32) -> Result<Self> {
        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(|e| {
            CoachError::CameraError(format!("Failed to open camera {}: {}", index, e))
        })?;

        camera
            .open_stream()
            .map_err(|e| CoachError::CameraError(format!("Failed to start camera stream: {}", e)))?;

        info!("Using camera: {}", camera.info().human_name());

        Ok(Self { camera })
    }
}

impl FrameSource for CameraInput {
    fn capture(&mut self) -> Result<CameraFrame> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CoachError::CameraError(format!("Frame capture failed: {}", e)))?;

        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CoachError::CameraError(format!("Frame decode failed: {}", e)))?;

        Ok(CameraFrame::new(
            decoded.width(),
            decoded.height(),
            decoded.into_raw(),
        ))
    }
}

impl Drop for CameraInput {
    fn drop(&mut self) {
        let _ = self.camera.stop_stream();
    }
}
