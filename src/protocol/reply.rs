//! Module `reply`
//!
//! Parsed single-line server replies. A reply line is a three digit status
//! code, one separator character, and free text up to the line end.
//! Continuation lines of multi-line replies are not recognised and parse as
//! ordinary replies.

use std::fmt;

use crate::error::ReplyError;

/// An immutable server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    code: u16,
    message: String,
}

impl Reply {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Parses one reply line with any trailing CR/LF already removed or not.
    ///
    /// The first three characters must be decimal digits. The fourth
    /// character is the separator and is discarded.
    pub fn parse(line: &str) -> Result<Self, ReplyError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.chars().count() < 3 {
            return Err(ReplyError::TooShort(line.to_string()));
        }

        let digits = &line.as_bytes()[..3];
        if !digits.iter().all(u8::is_ascii_digit) {
            return Err(ReplyError::InvalidCode(line.to_string()));
        }
        let code = digits
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));

        let mut rest = line[3..].chars();
        rest.next();

        Ok(Self::new(code, rest.as_str()))
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// 2xx replies.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_line() {
        let reply = Reply::parse("220 Welcome to RAX FTP Server\r\n").unwrap();
        assert_eq!(reply.code(), 220);
        assert_eq!(reply.message(), "Welcome to RAX FTP Server");
        assert!(reply.is_success());
    }

    #[test]
    fn test_parse_bare_code() {
        let reply = Reply::parse("226").unwrap();
        assert_eq!(reply.code(), 226);
        assert_eq!(reply.message(), "");
    }

    #[test]
    fn test_separator_is_discarded_whatever_it_is() {
        let reply = Reply::parse("230-User logged in").unwrap();
        assert_eq!(reply.code(), 230);
        assert_eq!(reply.message(), "User logged in");
    }

    #[test]
    fn test_success_range() {
        assert!(!Reply::new(199, "").is_success());
        assert!(Reply::new(200, "").is_success());
        assert!(Reply::new(299, "").is_success());
        assert!(!Reply::new(300, "").is_success());
        assert!(!Reply::new(150, "").is_success());
    }

    #[test]
    fn test_short_line_is_rejected() {
        assert_eq!(
            Reply::parse("22\r\n"),
            Err(ReplyError::TooShort("22".to_string()))
        );
        assert!(matches!(Reply::parse(""), Err(ReplyError::TooShort(_))));
    }

    #[test]
    fn test_non_numeric_code_is_rejected() {
        assert!(matches!(
            Reply::parse("OK whatever"),
            Err(ReplyError::InvalidCode(_))
        ));
        assert!(matches!(Reply::parse("2é0 x"), Err(ReplyError::InvalidCode(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Reply::new(550, "File not found").to_string(), "550 File not found");
    }
}
