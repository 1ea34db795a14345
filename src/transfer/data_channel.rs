//! Module `data_channel`
//!
//! The source of exactly one data connection for one file transfer.
//! In active mode the client owns a listener and waits for the server to
//! connect; in passive mode the client dials the address the server
//! advertised. Opening the connection consumes the channel, so a channel
//! can never serve a second transfer, and any listener is released as soon
//! as the connection is obtained or the attempt fails.

use log::{debug, info};
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, TcpListener, TcpStream};

use crate::error::DataTransferError;
use crate::transfer::TransferMode;

/// Client-side listener for an active mode transfer.
#[derive(Debug)]
pub struct ActiveChannel {
    listener: Option<TcpListener>,
    local_port: u16,
}

impl ActiveChannel {
    /// Binds a listener to an ephemeral port on all IPv4 interfaces.
    pub fn bind() -> io::Result<Self> {
        let listener = TcpListener::bind(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 0))?;
        let local_port = listener.local_addr()?.port();
        debug!("Active data listener bound to port {}", local_port);
        Ok(Self {
            listener: Some(listener),
            local_port,
        })
    }

    pub fn local_port(&self) -> u16 {
        self.local_port
    }

    /// Blocks until the server connects.
    fn accept(&mut self) -> Result<TcpStream, DataTransferError> {
        let listener = self.listener.as_ref().ok_or_else(|| {
            DataTransferError::AcceptFailed(io::Error::new(
                io::ErrorKind::NotConnected,
                "data listener already disposed",
            ))
        })?;

        let (stream, peer) = listener.accept().map_err(DataTransferError::AcceptFailed)?;
        info!("Data connection accepted from {}", peer);
        Ok(stream)
    }

    /// Closes the listener. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.listener.take().is_some() {
            debug!("Active data listener on port {} closed", self.local_port);
        }
    }
}

/// Server-advertised endpoint for a passive mode transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveChannel {
    addr: SocketAddrV4,
}

impl PassiveChannel {
    pub fn new(addr: SocketAddrV4) -> Self {
        Self { addr }
    }

    pub fn addr(&self) -> SocketAddrV4 {
        self.addr
    }

    fn connect(&self) -> Result<TcpStream, DataTransferError> {
        let stream = TcpStream::connect(self.addr)
            .map_err(|e| DataTransferError::ConnectFailed(SocketAddr::V4(self.addr), e))?;
        info!("Data connection established to {}", self.addr);
        Ok(stream)
    }
}

/// A negotiated data channel, good for one connection.
#[derive(Debug)]
pub enum DataTransferChannel {
    Active(ActiveChannel),
    Passive(PassiveChannel),
}

impl DataTransferChannel {
    pub fn mode(&self) -> TransferMode {
        match self {
            DataTransferChannel::Active(_) => TransferMode::Active,
            DataTransferChannel::Passive(_) => TransferMode::Passive,
        }
    }

    /// Obtains the data connection, then disposes the channel whatever the
    /// outcome.
    pub fn open_connection(mut self) -> Result<TcpStream, DataTransferError> {
        let result = match &mut self {
            DataTransferChannel::Active(channel) => channel.accept(),
            DataTransferChannel::Passive(channel) => channel.connect(),
        };
        self.dispose();
        result
    }

    /// Releases any local listening socket. Never fails.
    pub fn dispose(self) {
        match self {
            DataTransferChannel::Active(mut channel) => channel.dispose(),
            DataTransferChannel::Passive(_) => {}
        }
    }
}
