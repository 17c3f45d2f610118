pub mod capture;
pub mod classify;
pub mod detect;
pub mod hand;
pub mod integration;
pub mod session;
pub mod ui;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CoachError {
    #[error("Camera error: {0}")]
    CameraError(String),

    #[error("Detector error: {0}")]
    DetectorError(String),

    #[error("Classification error: {0}")]
    ClassifyError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl CoachError {
    /// Get a user-friendly description for display in the UI.
    pub fn user_message(&self) -> String {
        match self {
            CoachError::CameraError(_) => {
                "Camera unavailable. Check permissions, then leave and re-enter the mode.".to_string()
            }
            CoachError::DetectorError(_) => {
                "Hand detector failed to start. Detection is disabled.".to_string()
            }
            CoachError::ClassifyError(_) => {
                "Classification service unreachable. Predictions are disabled.".to_string()
            }
            CoachError::ConfigError(_) => "Configuration error. Please check settings.".to_string(),
            CoachError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
