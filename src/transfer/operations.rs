//! Transfer operations
//!
//! Negotiates a data channel over the control connection for active (PORT)
//! and passive (PASV) modes.

use log::{debug, info};
use regex::Regex;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::sync::LazyLock;

use crate::error::{ReplyError, Result};
use crate::protocol::{Command, ControlChannel};
use crate::transfer::{ActiveChannel, DataTransferChannel, PassiveChannel};

static PASV_ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,3}(?:,[0-9]{1,3}){5}").expect("valid PASV pattern"));

/// Extracts `h1,h2,h3,h4,p1,p2` from a PASV reply message.
///
/// The address may appear anywhere in the message; the first match wins.
pub fn parse_passive_address(message: &str) -> std::result::Result<SocketAddrV4, ReplyError> {
    let found = PASV_ADDRESS_RE
        .find(message)
        .ok_or_else(|| ReplyError::MissingPassiveAddress(message.to_string()))?
        .as_str();

    let mut parts = [0u8; 6];
    for (slot, part) in parts.iter_mut().zip(found.split(',')) {
        *slot = part
            .parse()
            .map_err(|_| ReplyError::InvalidPassiveAddress(found.to_string()))?;
    }

    let [h1, h2, h3, h4, p1, p2] = parts;
    let port = (u16::from(p1) << 8) | u16::from(p2);
    Ok(SocketAddrV4::new(Ipv4Addr::new(h1, h2, h3, h4), port))
}

/// Sets up active mode: listen locally, then advertise with PORT.
///
/// The listener is released before any error is returned.
pub fn setup_active_mode(
    control: &mut ControlChannel,
    advertised_ip: Ipv4Addr,
) -> Result<DataTransferChannel> {
    let mut channel = ActiveChannel::bind()?;
    let data_socket = SocketAddrV4::new(advertised_ip, channel.local_port());

    match control.exchange(&Command::PORT(data_socket)) {
        Ok(reply) if reply.is_success() => {
            info!("Client listening on data socket {} in PORT mode", data_socket);
            Ok(DataTransferChannel::Active(channel))
        }
        Ok(reply) => {
            channel.dispose();
            Err(reply.into())
        }
        Err(e) => {
            channel.dispose();
            Err(e)
        }
    }
}

/// Sets up passive mode: ask the server for an address with PASV.
pub fn setup_passive_mode(control: &mut ControlChannel) -> Result<DataTransferChannel> {
    let reply = control.exchange(&Command::PASV)?;
    if !reply.is_success() {
        return Err(reply.into());
    }

    let data_socket = parse_passive_address(reply.message())?;
    debug!("Server advertised data socket {} in PASV mode", data_socket);
    Ok(DataTransferChannel::Passive(PassiveChannel::new(data_socket)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entering_passive_mode() {
        let addr = parse_passive_address("Entering Passive Mode (127,0,0,1,200,50).").unwrap();
        assert_eq!(*addr.ip(), Ipv4Addr::LOCALHOST);
        assert_eq!(addr.port(), 200 * 256 + 50);
    }

    #[test]
    fn test_parse_address_without_parentheses() {
        let addr = parse_passive_address("=10,0,0,5,4,1").unwrap();
        assert_eq!(addr, SocketAddrV4::new(Ipv4Addr::new(10, 0, 0, 5), 1025));
    }

    #[test]
    fn test_missing_address() {
        assert_eq!(
            parse_passive_address("Entering Passive Mode"),
            Err(ReplyError::MissingPassiveAddress(
                "Entering Passive Mode".to_string()
            ))
        );
        assert!(matches!(
            parse_passive_address("(127,0,0,1,200)"),
            Err(ReplyError::MissingPassiveAddress(_))
        ));
    }

    #[test]
    fn test_out_of_range_octet() {
        assert_eq!(
            parse_passive_address("(127,0,0,1,300,50)"),
            Err(ReplyError::InvalidPassiveAddress("127,0,0,1,300,50".to_string()))
        );
    }

    #[test]
    fn test_only_ascii_digits_form_an_address() {
        let addr = parse_passive_address("Entering \u{0661},0,0,1,4,1 mode (127,0,0,1,4,1)").unwrap();
        assert_eq!(addr, SocketAddrV4::new(Ipv4Addr::LOCALHOST, 1025));
    }
}
