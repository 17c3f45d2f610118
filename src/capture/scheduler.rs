//! Frame loop driving capture and detection.
//!
//! A scheduler worker pumps camera frames at a fixed cadence and hands them
//! to a detector worker over a bounded channel; detection latency never
//! stalls the capture cadence because a busy detector simply drops frames.

use crate::capture::{CameraFrame, FrameSource};
use crate::detect::LandmarkDetector;
use crate::hand::Landmark;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, info};

/// Events emitted by the capture/detect loop.
#[derive(Debug, Clone)]
pub enum DetectorEvent {
    /// Detector output for one processed frame: zero or more raw hands.
    Hands { hands: Vec<Vec<Landmark>> },
}

/// Owner of one mode activation's camera stream and worker threads.
///
/// Exactly one handle is live per activation; dropping it tears everything
/// down.
pub struct CaptureHandle {
    cancelled: Arc<AtomicBool>,
    scheduler: Option<JoinHandle<()>>,
    detector: Option<JoinHandle<()>>,
    preview: Arc<Mutex<Option<CameraFrame>>>,
}

impl CaptureHandle {
    /// Stop the frame loop and release the camera. Idempotent; the second
    /// and later calls are no-ops.
    pub fn shutdown(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(handle) = self.scheduler.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.detector.take() {
            let _ = handle.join();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Shared slot holding the most recently captured frame, for the UI
    /// preview.
    pub fn preview(&self) -> Arc<Mutex<Option<CameraFrame>>> {
        Arc::clone(&self.preview)
    }
}

impl Drop for CaptureHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start the capture loop.
///
/// Frames are captured at `frame_interval` cadence as long as the handle is
/// live. While the shared pause flag is set, or when no detector was
/// provided, frames still reach the preview slot but are not submitted for
/// detection. Frames without a decoded resolution are never submitted.
pub fn start_capture(
    mut source: Box<dyn FrameSource>,
    detector: Option<Box<dyn LandmarkDetector>>,
    paused: Arc<AtomicBool>,
    event_tx: Sender<DetectorEvent>,
    frame_interval: Duration,
) -> CaptureHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let preview = Arc::new(Mutex::new(None));

    // Capacity 1: a detector still chewing on the previous frame drops the
    // next one instead of building a queue of stale frames.
    let (frame_tx, frame_rx) = bounded::<CameraFrame>(1);
    let has_detector = detector.is_some();

    let detector_handle = detector.map(|mut detector| {
        std::thread::spawn(move || {
            while let Ok(frame) = frame_rx.recv() {
                let hands = detector.detect(&frame);
                // Lossy on purpose: a receiver that stopped draining must
                // never block this thread, or teardown could not join it.
                match event_tx.try_send(DetectorEvent::Hands { hands }) {
                    Ok(()) | Err(TrySendError::Full(_)) => {}
                    Err(TrySendError::Disconnected(_)) => break,
                }
            }
            debug!("Detector worker stopped");
        })
    });

    let scheduler_handle = {
        let cancelled = Arc::clone(&cancelled);
        let preview = Arc::clone(&preview);
        std::thread::spawn(move || {
            info!("Frame loop started");
            while !cancelled.load(Ordering::SeqCst) {
                match source.capture() {
                    Ok(frame) if frame.has_resolution() => {
                        if has_detector && !paused.load(Ordering::SeqCst) {
                            let _ = frame_tx.try_send(frame.clone());
                        }
                        *preview.lock() = Some(frame);
                    }
                    Ok(_) => {}
                    Err(e) => debug!("Frame capture failed: {}", e),
                }
                std::thread::sleep(frame_interval);
            }
            info!("Frame loop stopped");
        })
    };

    CaptureHandle {
        cancelled,
        scheduler: Some(scheduler_handle),
        detector: detector_handle,
        preview,
    }
}
