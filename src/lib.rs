//! RAX FTP Client
//!
//! A minimal blocking FTP client for moving whole text documents to and
//! from a server. A session is a control connection plus one short-lived
//! data connection per transfer, negotiated in active (PORT) or passive
//! (PASV) mode.
//!
//! ```no_run
//! use rax_ftp_client::{ClientConfig, FtpClient};
//!
//! fn main() -> rax_ftp_client::Result<()> {
//!     let mut client = FtpClient::new(ClientConfig::default());
//!     client.connect("127.0.0.1", 21)?;
//!     client.login("alice", "secret")?;
//!
//!     let document = client.download_text("students.json")?;
//!     client.upload_text("students.json", &document)?;
//!
//!     client.disconnect()
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod transfer;
pub mod utils;

pub use client::FtpClient;
pub use crate::config::ClientConfig;
pub use error::{FtpClientError, Result};
