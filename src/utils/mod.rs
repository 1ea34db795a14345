//! Utility functions
//!
//! Logging setup shared by applications and tests.

pub mod logging;

pub use logging::setup_logging;
