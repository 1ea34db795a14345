//! Module `commands`
//!
//! Defines the FTP commands this client sends and how each one is rendered
//! on the control connection.

use std::fmt;
use std::net::SocketAddrV4;

/// An FTP command sent by the client.
///
/// Commands that take arguments carry them in the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    USER(String),      // Username for login
    PASS(String),      // Password for login
    TYPE(char),        // Representation type, 'A' for text
    PORT(SocketAddrV4), // Address the client listens on for active mode
    PASV,              // Ask the server to listen for passive mode
    RETR(String),      // Retrieve/download file
    STOR(String),      // Store/upload file
    QUIT,
}

impl Command {
    /// Text safe for logs. Passwords are masked.
    pub fn log_text(&self) -> String {
        match self {
            Command::PASS(_) => "PASS ****".to_string(),
            other => other.to_string(),
        }
    }
}

/// Renders `h1,h2,h3,h4,p1,p2` for a PORT argument.
pub fn format_host_port(addr: &SocketAddrV4) -> String {
    let [h1, h2, h3, h4] = addr.ip().octets();
    let port = addr.port();
    format!("{},{},{},{},{},{}", h1, h2, h3, h4, port >> 8, port & 0xFF)
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(username) => write!(f, "USER {}", username),
            Command::PASS(password) => write!(f, "PASS {}", password),
            Command::TYPE(kind) => write!(f, "TYPE {}", kind),
            Command::PORT(addr) => write!(f, "PORT {}", format_host_port(addr)),
            Command::PASV => write!(f, "PASV"),
            Command::RETR(path) => write!(f, "RETR {}", path),
            Command::STOR(path) => write!(f, "STOR {}", path),
            Command::QUIT => write!(f, "QUIT"),
        }
    }
}
