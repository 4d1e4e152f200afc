//! CLI module for Mindbridge
//!
//! Handles command-line argument parsing and log setup.

pub mod args;
pub mod logging;

pub use args::{Args, Commands, Verbosity};
pub use logging::init_logging;
