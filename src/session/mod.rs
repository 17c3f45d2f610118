pub mod engine;
pub mod feedback;
pub mod timer;

pub use engine::{ClassifyRequest, Mode, SessionEngine, TestProgress};
pub use feedback::{derive_feedback, Feedback};
pub use timer::RoundTimer;
