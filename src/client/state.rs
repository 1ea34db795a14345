//! Module `state`
//!
//! Defines `SessionState`, the single value holding everything the client
//! knows about its session: where it is connected, who it is logged in as,
//! and whether active mode is still worth trying. Transitions happen only
//! through the methods below, so the state machine can be exercised without
//! any sockets.

use std::fmt;

use crate::error::StateError;

/// Session state: Disconnected → Connected → Authenticated.
///
/// `authenticated` implies `connected`. Host, port and username are only
/// present while connected.
#[derive(Clone)]
pub struct SessionState {
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    connected: bool,
    authenticated: bool,
    prefer_active_mode: bool,
}

impl SessionState {
    pub fn new(prefer_active_mode: bool) -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            connected: false,
            authenticated: false,
            prefer_active_mode,
        }
    }

    // --------------------
    // Getter methods
    // --------------------

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn prefer_active_mode(&self) -> bool {
        self.prefer_active_mode
    }

    // --------------------
    // Preconditions
    // --------------------

    pub fn require_disconnected(&self) -> Result<(), StateError> {
        if self.connected {
            return Err(StateError::AlreadyConnected {
                host: self.host.clone().unwrap_or_default(),
                port: self.port.unwrap_or_default(),
            });
        }
        Ok(())
    }

    pub fn require_connected(&self) -> Result<(), StateError> {
        if !self.connected {
            return Err(StateError::NotConnected);
        }
        Ok(())
    }

    pub fn require_authenticated(&self) -> Result<(), StateError> {
        self.require_connected()?;
        if !self.authenticated {
            return Err(StateError::NotAuthenticated);
        }
        Ok(())
    }

    // --------------------
    // Transitions
    // --------------------

    /// Disconnected → Connected
    pub fn mark_connected(&mut self, host: &str, port: u16) {
        self.connected = true;
        self.authenticated = false;
        self.host = Some(host.to_string());
        self.port = Some(port);
        self.username = None;
        self.password = None;
    }

    /// Drops any previous login; done before each login attempt.
    pub fn reset_authentication(&mut self) {
        self.authenticated = false;
    }

    /// Connected → Authenticated
    pub fn mark_authenticated(&mut self, username: &str, password: &str) {
        debug_assert!(self.connected, "cannot authenticate a disconnected session");
        self.authenticated = true;
        self.username = Some(username.to_string());
        self.password = Some(password.to_string());
    }

    /// Any state → Disconnected. The active mode latch is kept.
    pub fn mark_disconnected(&mut self) {
        self.connected = false;
        self.authenticated = false;
        self.host = None;
        self.port = None;
        self.username = None;
        self.password = None;
    }

    /// Stops trying active mode for the rest of the session. One-way.
    pub fn disable_active_mode(&mut self) {
        self.prefer_active_mode = false;
    }
}

impl fmt::Debug for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "****"))
            .field("connected", &self.connected)
            .field("authenticated", &self.authenticated)
            .field("prefer_active_mode", &self.prefer_active_mode)
            .finish()
    }
}
