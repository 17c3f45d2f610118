pub mod client;
pub mod gate;
pub mod pipeline;

pub use client::ClassifyClient;
pub use gate::PredictionGate;
pub use pipeline::{ClassifierPipeline, ClassifyCommand, ClassifyEvent};
