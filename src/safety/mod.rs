//! Safety screening for incoming messages
//!
//! Currently a single recall-oriented distress detector.

pub mod distress;

pub use distress::{detect_distress, DISTRESS_PHRASES};
