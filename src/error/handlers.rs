//! Error handlers
//!
//! Helpers for callers deciding what to do with a failed operation.

use crate::error::types::FtpClientError;
use log::error;

/// Log an FTP client error
pub fn log_error(err: &FtpClientError) {
    error!("FTP Client Error: {}", err);
}

/// Whether the control channel can no longer be trusted after this error.
///
/// Transport failures leave no usable connection and illegal replies leave
/// the command/reply pairing misaligned, so the caller should reconnect.
pub fn is_session_fatal(err: &FtpClientError) -> bool {
    match err {
        FtpClientError::Transport(_) => true,
        FtpClientError::IllegalReply(_) => true,
        FtpClientError::State(_) => false,
        FtpClientError::Protocol(_) => false,
        FtpClientError::DataTransfer(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DataTransferError, ReplyError, StateError};
    use crate::protocol::Reply;
    use std::io;

    #[test]
    fn test_session_fatal_categories() {
        let transport = FtpClientError::Transport(io::Error::from(io::ErrorKind::UnexpectedEof));
        assert!(is_session_fatal(&transport));

        let illegal = FtpClientError::IllegalReply(ReplyError::TooShort("2".into()));
        assert!(is_session_fatal(&illegal));

        let refused = FtpClientError::Protocol(Reply::new(550, "No such file"));
        assert!(!is_session_fatal(&refused));
        assert_eq!(refused.code(), Some(550));

        let misuse = FtpClientError::State(StateError::NotAuthenticated);
        assert!(!is_session_fatal(&misuse));
        assert_eq!(misuse.code(), None);
    }

    #[test]
    fn test_log_error_accepts_every_category() {
        log_error(&FtpClientError::from(StateError::NotConnected));
        log_error(&FtpClientError::from(Reply::new(451, "Local error")));
        log_error(&FtpClientError::from(DataTransferError::InvalidText { offset: 3 }));
    }

    #[test]
    fn test_error_messages() {
        let err = FtpClientError::from(StateError::AlreadyConnected {
            host: "ftp.local".into(),
            port: 21,
        });
        assert_eq!(
            err.to_string(),
            "Invalid state: Client already connected to ftp.local on port 21"
        );

        let err = FtpClientError::from(Reply::new(530, "Login incorrect"));
        assert_eq!(err.to_string(), "Server refused request: 530 Login incorrect");
    }
}
