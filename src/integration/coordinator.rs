//! Coordinator wiring the session engine to its live resources.
//!
//! Owns the engine, the capture handle and the classifier pipeline; drains
//! worker events into engine calls once per UI frame. The engine itself
//! stays single-threaded — this is the only place its methods are invoked.

use crate::capture::{start_capture, CameraFrame, CaptureHandle, DetectorEvent, FrameSource};
use crate::classify::{ClassifierPipeline, ClassifyCommand, ClassifyEvent};
use crate::detect::DetectorFactory;
use crate::integration::config::CoachConfig;
use crate::session::SessionEngine;
use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Creates a frame source per mode activation.
pub type SourceFactory = Box<dyn Fn() -> crate::Result<Box<dyn FrameSource>> + Send>;

pub struct SessionCoordinator {
    config: CoachConfig,
    engine: SessionEngine,
    capture: Option<CaptureHandle>,
    source_factory: SourceFactory,
    detector_factory: Option<DetectorFactory>,
    detector_event_tx: Sender<DetectorEvent>,
    detector_event_rx: Receiver<DetectorEvent>,
    classify_tx: Sender<ClassifyCommand>,
    classify_rx: Receiver<ClassifyEvent>,
    camera_error: Option<String>,
}

impl SessionCoordinator {
    /// Build the coordinator and start the long-lived classifier worker.
    pub fn new(
        config: CoachConfig,
        source_factory: SourceFactory,
        detector_factory: Option<DetectorFactory>,
    ) -> Self {
        let engine = SessionEngine::new(config.session.clone());
        let (detector_event_tx, detector_event_rx) = bounded(32);

        let pipeline = ClassifierPipeline::new(config.classify.clone());
        let classify_tx = pipeline.command_sender();
        let classify_rx = pipeline.event_receiver();
        pipeline.start_worker();

        Self {
            config,
            engine,
            capture: None,
            source_factory,
            detector_factory,
            detector_event_tx,
            detector_event_rx,
            classify_tx,
            classify_rx,
            camera_error: None,
        }
    }

    pub fn engine(&self) -> &SessionEngine {
        &self.engine
    }

    /// User-facing description of a failed camera acquisition, if any.
    pub fn camera_error(&self) -> Option<&str> {
        self.camera_error.as_deref()
    }

    /// Preview slot of the active capture, if one is running.
    pub fn preview(&self) -> Option<Arc<Mutex<Option<CameraFrame>>>> {
        self.capture.as_ref().map(|capture| capture.preview())
    }

    pub fn enter_practice(&mut self, now: Instant) {
        self.engine.enter_practice(now);
        self.restart_capture();
    }

    pub fn enter_test(&mut self, now: Instant) {
        self.engine.enter_test(now);
        self.restart_capture();
    }

    pub fn next_letter(&mut self) {
        self.engine.next_letter();
    }

    pub fn go_home(&mut self) {
        self.engine.go_home();
        self.release_capture();
    }

    /// Drain pending detector and classifier events into the engine and
    /// advance the countdown clock. Called once per UI frame.
    pub fn poll(&mut self, now: Instant) {
        while let Ok(DetectorEvent::Hands { hands }) = self.detector_event_rx.try_recv() {
            if let Some(request) = self.engine.admit_hands(&hands, now) {
                let command = ClassifyCommand::Request {
                    frame: request.frame,
                    generation: request.generation,
                };
                if self.classify_tx.try_send(command).is_err() {
                    warn!("Classifier worker unavailable; dropping request");
                    self.engine.cancel_dispatch();
                }
            }
        }

        while let Ok(event) = self.classify_rx.try_recv() {
            match event {
                ClassifyEvent::Prediction { letter, generation } => {
                    self.engine.apply_prediction(letter, generation);
                }
                ClassifyEvent::Shutdown => warn!("Classifier pipeline shut down"),
            }
        }

        self.engine.tick(now);
    }

    /// Each mode activation gets a fresh camera stream and detector
    /// instance; any previous activation is torn down first.
    fn restart_capture(&mut self) {
        self.release_capture();
        self.camera_error = None;

        let source = match (self.source_factory)() {
            Ok(source) => source,
            Err(e) => {
                warn!("Camera unavailable: {}", e);
                self.camera_error = Some(e.user_message());
                return;
            }
        };

        let detector = match &self.detector_factory {
            Some(factory) => match factory() {
                Ok(detector) => Some(detector),
                Err(e) => {
                    warn!("Detector initialization failed: {}", e);
                    None
                }
            },
            None => {
                info!("No landmark detector configured; detection disabled");
                None
            }
        };

        self.capture = Some(start_capture(
            source,
            detector,
            self.engine.pause_flag(),
            self.detector_event_tx.clone(),
            self.config.capture.frame_interval(),
        ));
    }

    fn release_capture(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            capture.shutdown();
        }
        // Detections from the torn-down activation must not leak into the
        // next one.
        while self.detector_event_rx.try_recv().is_ok() {}
    }
}

impl Drop for SessionCoordinator {
    fn drop(&mut self) {
        self.release_capture();
        let _ = self.classify_tx.try_send(ClassifyCommand::Shutdown);
    }
}
