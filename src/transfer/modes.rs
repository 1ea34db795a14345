//! FTP Transfer modes
//!
//! Names which side of the data connection listens.

use std::fmt;

/// FTP transfer modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// Client listens, server connects (PORT)
    Active,
    /// Server listens, client connects (PASV)
    Passive,
}

impl fmt::Display for TransferMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMode::Active => write!(f, "active"),
            TransferMode::Passive => write!(f, "passive"),
        }
    }
}
