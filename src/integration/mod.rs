pub mod config;
pub mod coordinator;

pub use config::CoachConfig;
pub use coordinator::{SessionCoordinator, SourceFactory};
