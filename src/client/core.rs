//! Client core functionality
//!
//! `FtpClient` owns the control connection and the session state, and
//! sequences every exchange on the control channel. Connection, login,
//! logout and data channel negotiation live here; file transfers are in
//! `client::operations`.

use log::{debug, info, warn};
use std::net::TcpStream;

use crate::client::SessionState;
use crate::config::ClientConfig;
use crate::error::{Result, StateError};
use crate::protocol::responses::{LOGIN_SUCCESS, PASSWORD_REQUIRED};
use crate::protocol::{Command, ControlChannel};
use crate::transfer::{DataTransferChannel, setup_active_mode, setup_passive_mode};

/// A blocking FTP client for a single caller.
///
/// `control` is present exactly while the session is connected.
pub struct FtpClient {
    config: ClientConfig,
    state: SessionState,
    control: Option<ControlChannel>,
}

impl FtpClient {
    pub fn new(config: ClientConfig) -> Self {
        let state = SessionState::new(config.active_mode);
        Self {
            config,
            state,
            control: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn host(&self) -> Option<&str> {
        self.state.host()
    }

    pub fn port(&self) -> Option<u16> {
        self.state.port()
    }

    pub fn username(&self) -> Option<&str> {
        self.state.username()
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    /// Whether the next transfer will try active mode first.
    pub fn is_active_mode(&self) -> bool {
        self.state.prefer_active_mode()
    }

    /// Connects to `host` on the configured default port.
    pub fn connect_default_port(&mut self, host: &str) -> Result<()> {
        self.connect(host, self.config.default_port)
    }

    /// Opens the control connection and reads the welcome replies.
    ///
    /// Fails without touching the network if already connected. If any
    /// welcome reply is not a success the connection is closed and the
    /// session stays disconnected.
    pub fn connect(&mut self, host: &str, port: u16) -> Result<()> {
        self.state.require_disconnected()?;

        info!("Connecting to {}:{}", host, port);
        let stream = TcpStream::connect((host, port))?;
        let mut control = ControlChannel::new(stream)?;

        if let Err(e) = read_welcome(&mut control, self.config.welcome_messages_count) {
            control.close();
            return Err(e);
        }

        self.control = Some(control);
        self.state.mark_connected(host, port);
        info!("Connected to {}:{}", host, port);
        Ok(())
    }

    /// Logs in, sending PASS only when the server asks for it.
    ///
    /// Any previous login is dropped first, so a failed attempt leaves the
    /// session connected but unauthenticated.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.state.require_connected()?;
        self.state.reset_authentication();

        let control = self.control_mut()?;
        let reply = control.exchange(&Command::USER(username.to_string()))?;
        let password_required = match reply.code() {
            LOGIN_SUCCESS => false,
            PASSWORD_REQUIRED => true,
            _ => return Err(reply.into()),
        };

        if password_required {
            let reply = control.exchange(&Command::PASS(password.to_string()))?;
            if !reply.is_success() {
                return Err(reply.into());
            }
        }

        self.state.mark_authenticated(username, password);
        info!("Logged in as {}", username);
        Ok(())
    }

    /// Sends QUIT if possible and closes the control connection.
    ///
    /// Always ends disconnected once the precondition holds; failure to send
    /// QUIT is only logged.
    pub fn disconnect(&mut self) -> Result<()> {
        self.state.require_connected()?;

        if let Some(mut control) = self.control.take() {
            if let Err(e) = control.send_command(&Command::QUIT) {
                warn!("Failed to send QUIT: {}", e);
            }
            control.close();
        }

        self.state.mark_disconnected();
        info!("Disconnected");
        Ok(())
    }

    pub(crate) fn control_mut(&mut self) -> Result<&mut ControlChannel> {
        Ok(self.control.as_mut().ok_or(StateError::NotConnected)?)
    }

    /// Negotiates a fresh data channel for one transfer.
    ///
    /// Active mode is tried while preferred; the first failure switches the
    /// session to passive mode for good and is not reported to the caller.
    pub(crate) fn open_data_transfer_channel(&mut self) -> Result<DataTransferChannel> {
        let control = self.control.as_mut().ok_or(StateError::NotConnected)?;

        if self.state.prefer_active_mode() {
            match setup_active_mode(control, self.config.active_mode_address) {
                Ok(channel) => return Ok(channel),
                Err(e) => {
                    warn!(
                        "Active mode failed ({}), using passive mode for the rest of the session",
                        e
                    );
                    self.state.disable_active_mode();
                }
            }
        }

        debug!("Requesting passive data channel");
        setup_passive_mode(control)
    }
}

fn read_welcome(control: &mut ControlChannel, count: usize) -> Result<()> {
    for _ in 0..count {
        let reply = control.read_reply()?;
        if !reply.is_success() {
            return Err(reply.into());
        }
    }
    Ok(())
}
