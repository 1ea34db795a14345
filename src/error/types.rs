//! Error types
//!
//! Defines the error categories surfaced by the FTP client: misuse of the
//! session state machine, control-connection transport failures, replies
//! that cannot be parsed, replies the server used to refuse a request, and
//! failures on the per-transfer data connection.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use crate::protocol::Reply;

/// Operation invoked in the wrong session state.
///
/// These indicate caller misuse and are never produced by server behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    AlreadyConnected { host: String, port: u16 },
    NotConnected,
    NotAuthenticated,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::AlreadyConnected { host, port } => {
                write!(f, "Client already connected to {} on port {}", host, port)
            }
            StateError::NotConnected => write!(f, "Client not connected"),
            StateError::NotAuthenticated => write!(f, "Client not authenticated"),
        }
    }
}

impl std::error::Error for StateError {}

/// A control-channel line that could not be interpreted as a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    TooShort(String),
    InvalidCode(String),
    MissingPassiveAddress(String),
    InvalidPassiveAddress(String),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::TooShort(line) => write!(f, "Reply too short: {:?}", line),
            ReplyError::InvalidCode(line) => write!(f, "Reply code is not numeric: {:?}", line),
            ReplyError::MissingPassiveAddress(msg) => {
                write!(f, "No passive address in reply: {}", msg)
            }
            ReplyError::InvalidPassiveAddress(addr) => {
                write!(f, "Invalid passive address: {}", addr)
            }
        }
    }
}

impl std::error::Error for ReplyError {}

/// Failures on the data connection, as opposed to the control connection.
#[derive(Debug)]
pub enum DataTransferError {
    ConnectFailed(SocketAddr, io::Error),
    AcceptFailed(io::Error),
    Io(io::Error),
    InvalidText { offset: u64 },
}

impl fmt::Display for DataTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataTransferError::ConnectFailed(addr, e) => {
                write!(f, "Cannot connect to data endpoint {}: {}", addr, e)
            }
            DataTransferError::AcceptFailed(e) => {
                write!(f, "Failed to accept data connection: {}", e)
            }
            DataTransferError::Io(e) => write!(f, "I/O error in data transfer: {}", e),
            DataTransferError::InvalidText { offset } => {
                write!(f, "Data is not valid UTF-8 text at byte {}", offset)
            }
        }
    }
}

impl std::error::Error for DataTransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataTransferError::ConnectFailed(_, e)
            | DataTransferError::AcceptFailed(e)
            | DataTransferError::Io(e) => Some(e),
            DataTransferError::InvalidText { .. } => None,
        }
    }
}

impl From<io::Error> for DataTransferError {
    fn from(error: io::Error) -> Self {
        DataTransferError::Io(error)
    }
}

/// General FTP client error that encompasses all error categories
#[derive(Debug)]
pub enum FtpClientError {
    State(StateError),
    Transport(io::Error),
    IllegalReply(ReplyError),
    Protocol(Reply),
    DataTransfer(DataTransferError),
}

impl FtpClientError {
    /// Reply code of a protocol error, if this is one.
    pub fn code(&self) -> Option<u16> {
        match self {
            FtpClientError::Protocol(reply) => Some(reply.code()),
            _ => None,
        }
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::State(e) => write!(f, "Invalid state: {}", e),
            FtpClientError::Transport(e) => write!(f, "Control connection error: {}", e),
            FtpClientError::IllegalReply(e) => write!(f, "Illegal reply: {}", e),
            FtpClientError::Protocol(reply) => write!(f, "Server refused request: {}", reply),
            FtpClientError::DataTransfer(e) => write!(f, "Data transfer error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtpClientError::State(e) => Some(e),
            FtpClientError::Transport(e) => Some(e),
            FtpClientError::IllegalReply(e) => Some(e),
            FtpClientError::Protocol(_) => None,
            FtpClientError::DataTransfer(e) => Some(e),
        }
    }
}

impl From<StateError> for FtpClientError {
    fn from(error: StateError) -> Self {
        FtpClientError::State(error)
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::Transport(error)
    }
}

impl From<ReplyError> for FtpClientError {
    fn from(error: ReplyError) -> Self {
        FtpClientError::IllegalReply(error)
    }
}

impl From<Reply> for FtpClientError {
    fn from(reply: Reply) -> Self {
        FtpClientError::Protocol(reply)
    }
}

impl From<DataTransferError> for FtpClientError {
    fn from(error: DataTransferError) -> Self {
        FtpClientError::DataTransfer(error)
    }
}

/// Result alias used throughout the client
pub type Result<T> = std::result::Result<T, FtpClientError>;
