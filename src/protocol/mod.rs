//! FTP Protocol implementation
//!
//! Client side of the control connection: typed commands, parsed replies,
//! reply codes, and the line codec that moves them over TCP.

pub mod channel;
pub mod commands;
pub mod reply;
pub mod responses;

pub use channel::ControlChannel;
pub use commands::Command;
pub use reply::Reply;
