//! FTP client
//!
//! Session state, connection management, and file transfers.

pub mod core;
pub mod operations;
pub mod state;

pub use self::core::FtpClient;
pub use state::SessionState;
