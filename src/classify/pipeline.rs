//! Channel-based worker around the classification client.
//!
//! The HTTP round trip blocks, so it runs on its own thread; the session
//! side talks to it through bounded command/event channels. The worker is
//! long-lived across mode changes — the service is stateless, and staleness
//! is handled by the generation token at the session engine.

use crate::classify::client::ClassifyClient;
use crate::hand::{LandmarkFrame, Letter};
use crate::integration::config::ClassifyConfig;
use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, info};
use uuid::Uuid;

/// Commands accepted by the classifier worker.
#[derive(Debug, Clone)]
pub enum ClassifyCommand {
    /// Classify one admitted hand frame.
    Request {
        frame: LandmarkFrame,
        /// Session activation this request belongs to.
        generation: Uuid,
    },

    /// Shut the worker down.
    Shutdown,
}

/// Events emitted by the classifier worker.
#[derive(Debug, Clone)]
pub enum ClassifyEvent {
    /// Outcome of one classification round trip. `None` means no usable
    /// prediction.
    Prediction {
        letter: Option<Letter>,
        generation: Uuid,
    },

    /// Worker has shut down.
    Shutdown,
}

/// Classifier pipeline with channel-based communication.
pub struct ClassifierPipeline {
    config: ClassifyConfig,
    command_tx: Sender<ClassifyCommand>,
    command_rx: Receiver<ClassifyCommand>,
    event_tx: Sender<ClassifyEvent>,
    event_rx: Receiver<ClassifyEvent>,
}

impl ClassifierPipeline {
    pub fn new(config: ClassifyConfig) -> Self {
        let (command_tx, command_rx) = bounded(16);
        let (event_tx, event_rx) = bounded(16);

        Self {
            config,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    pub fn command_sender(&self) -> Sender<ClassifyCommand> {
        self.command_tx.clone()
    }

    pub fn event_receiver(&self) -> Receiver<ClassifyEvent> {
        self.event_rx.clone()
    }

    /// Start the worker thread, consuming the pipeline.
    ///
    /// The worker also exits when every command sender is dropped.
    pub fn start_worker(self) {
        let config = self.config.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Classifier worker starting");
            let client = ClassifyClient::new(&config);

            loop {
                match command_rx.recv() {
                    Ok(ClassifyCommand::Request { frame, generation }) => {
                        let letter = client.classify(&frame);
                        debug!("Classification result: {:?}", letter);
                        if event_tx
                            .send(ClassifyEvent::Prediction { letter, generation })
                            .is_err()
                        {
                            break;
                        }
                    }
                    Ok(ClassifyCommand::Shutdown) | Err(_) => break,
                }
            }

            let _ = event_tx.send(ClassifyEvent::Shutdown);
            info!("Classifier worker stopped");
        });
    }
}
