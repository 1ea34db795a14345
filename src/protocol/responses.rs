//! FTP Response codes
//!
//! Reply codes the client inspects by exact value. Everything else is judged
//! by `Reply::is_success`.

pub const DATA_CONNECTION_ALREADY_OPEN: u16 = 125;
pub const FILE_STATUS_OK: u16 = 150;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;

/// Whether a RETR/STOR reply announces that the data transfer is starting.
pub fn is_transfer_starting(code: u16) -> bool {
    code == FILE_STATUS_OK || code == DATA_CONNECTION_ALREADY_OPEN
}
