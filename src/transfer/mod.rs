//! Transfer module for the FTP client
//!
//! Handles data channel negotiation, the per-transfer data connection, and
//! streaming text over it.

pub mod data_channel;
pub mod modes;
pub mod operations;
pub mod text;

// Re-export key types and functions
pub use data_channel::{ActiveChannel, DataTransferChannel, PassiveChannel};
pub use modes::TransferMode;
pub use operations::{parse_passive_address, setup_active_mode, setup_passive_mode};
pub use text::copy_text;
