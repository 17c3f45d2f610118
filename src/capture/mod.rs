#[cfg(feature = "camera-io")]
pub mod camera;
pub mod frame;
pub mod scheduler;

#[cfg(feature = "camera-io")]
pub use camera::CameraInput;
pub use frame::{CameraFrame, FrameSource};
pub use scheduler::{start_capture, CaptureHandle, DetectorEvent};
