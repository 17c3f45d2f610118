//! Configuration for the coaching session.
//!
//! Provides centralized configuration for all components.

use std::time::Duration;

/// Classification service settings.
#[derive(Clone, Debug)]
pub struct ClassifyConfig {
    /// Base URL of the service exposing `POST /predict`.
    pub base_url: String,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Camera and frame-loop settings.
#[derive(Clone, Debug)]
pub struct CaptureConfig {
    /// Index of the camera device to open.
    pub camera_index: u32,

    /// Target capture cadence in frames per second.
    pub frame_rate: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            frame_rate: 30,
        }
    }
}

impl CaptureConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate.max(1)))
    }
}

/// Session pacing settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Minimum interval between successive classification dispatches.
    pub cooldown: Duration,

    /// Seconds per test round.
    pub round_seconds: u8,

    /// Rounds per test.
    pub rounds: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(2000),
            round_seconds: 10,
            rounds: 10,
        }
    }
}

/// Configuration for the complete application.
#[derive(Clone, Debug, Default)]
pub struct CoachConfig {
    pub classify: ClassifyConfig,
    pub capture: CaptureConfig,
    pub session: SessionConfig,
}

impl CoachConfig {
    /// Default configuration with environment overrides applied.
    /// `SIGNCOACH_SERVICE_URL` replaces the classification service URL.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("SIGNCOACH_SERVICE_URL") {
            config.classify.base_url = url;
        }
        config
    }

    /// Set the classification service base URL.
    pub fn with_service_url(mut self, url: impl Into<String>) -> Self {
        self.classify.base_url = url.into();
        self
    }

    /// Set the camera device index.
    pub fn with_camera_index(mut self, index: u32) -> Self {
        self.capture.camera_index = index;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.classify.base_url.is_empty() {
            return Err("Classification service URL is required".to_string());
        }
        if !self.classify.base_url.starts_with("http") {
            return Err(format!(
                "Classification service URL must be http(s): {}",
                self.classify.base_url
            ));
        }
        if self.session.rounds == 0 {
            return Err("A test needs at least one round".to_string());
        }
        if self.session.round_seconds == 0 {
            return Err("Rounds need a nonzero duration".to_string());
        }
        if self.capture.frame_rate == 0 {
            return Err("Frame rate must be nonzero".to_string());
        }
        Ok(())
    }
}
