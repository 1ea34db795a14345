//! Logging utilities
//!
//! Provides logging setup for applications embedding the client.

use env_logger::Env;

/// Setup logging from `RUST_LOG`, defaulting to `info`.
///
/// Does nothing if a logger is already installed.
pub fn setup_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info")).try_init();
}
