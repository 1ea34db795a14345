//! Configuration management for the RAX FTP client
//!
//! Tunables are read once when a client is created. Sources are layered:
//! built-in defaults, then an optional `rax-ftp-client` config file, then
//! `RAX_FTP_CLIENT_*` environment variables.

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;

const CONFIG_FILE: &str = "rax-ftp-client";
const ENV_PREFIX: &str = "RAX_FTP_CLIENT";

/// Client tunables
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Control port used by `connect_default_port`
    pub default_port: u16,

    /// Number of greeting replies read after connecting.
    /// Standard servers send one; some send several separate lines.
    pub welcome_messages_count: usize,

    /// Chunk size for data connection reads and writes
    pub data_transfer_buffer_size: usize,

    /// Try active mode (PORT) before passive mode
    pub active_mode: bool,

    /// IPv4 address sent in PORT commands. The server must be able to reach
    /// the client at this address, so the loopback default only works when
    /// both run on the same host.
    pub active_mode_address: Ipv4Addr,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_port: 21,
            welcome_messages_count: 1,
            data_transfer_buffer_size: 8 * 1024,
            active_mode: false,
            active_mode_address: Ipv4Addr::LOCALHOST,
        }
    }
}

impl ClientConfig {
    /// Load configuration from an optional `rax-ftp-client.*` file in the
    /// working directory with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Self>()
            .and_then(Self::validated)
    }

    /// Load configuration from a specific file with environment overrides.
    /// The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?
            .try_deserialize::<Self>()
            .and_then(Self::validated)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("default_port", i64::from(defaults.default_port))?
            .set_default(
                "welcome_messages_count",
                defaults.welcome_messages_count as i64,
            )?
            .set_default(
                "data_transfer_buffer_size",
                defaults.data_transfer_buffer_size as i64,
            )?
            .set_default("active_mode", defaults.active_mode)?
            .set_default("active_mode_address", defaults.active_mode_address.to_string())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_port == 0 {
            return Err(ConfigError::Message("default_port cannot be 0".into()));
        }

        if self.data_transfer_buffer_size == 0 {
            return Err(ConfigError::Message(
                "data_transfer_buffer_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
