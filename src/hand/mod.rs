pub mod landmark;
pub mod letter;

pub use landmark::{Landmark, LandmarkFrame, LANDMARKS_PER_HAND, WIRE_VALUES};
pub use letter::Letter;
