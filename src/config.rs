//! Configuration for gridlink
//!
//! Centralized client configuration with sensible defaults.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::{Error, Result};
use crate::protocol::ProtocolVersion;

/// Main configuration for a gridlink client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Server addresses (host:port), tried in rotation when opening sessions
    pub servers: Vec<String>,

    /// Protocol version advertised in the handshake
    pub protocol_version: ProtocolVersion,

    // -------------------------------------------------------------------------
    // Security Configuration
    // -------------------------------------------------------------------------
    /// Credentials sent once per session, if the server requires them
    pub credentials: Option<Credentials>,

    // -------------------------------------------------------------------------
    // Pool Configuration
    // -------------------------------------------------------------------------
    /// Max physical connections the pool will open
    pub max_sessions: usize,

    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Connection read timeout (milliseconds, 0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Connection write timeout (milliseconds, 0 = block indefinitely)
    pub write_timeout_ms: u64,

    /// Disable Nagle's algorithm on new connections
    pub nodelay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: vec!["127.0.0.1:40404".to_string()],
            protocol_version: ProtocolVersion::CURRENT,
            credentials: None,
            max_sessions: 4,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            nodelay: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the configuration before opening any connection
    pub fn validate(&self) -> Result<()> {
        if self.servers.is_empty() {
            return Err(Error::Config("at least one server address is required".to_string()));
        }
        if self.max_sessions == 0 {
            return Err(Error::Config("max_sessions must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
    servers_set: bool,
}

impl ConfigBuilder {
    /// Add a server address; the first call replaces the default server
    pub fn server(mut self, addr: impl Into<String>) -> Self {
        if !self.servers_set {
            self.config.servers.clear();
            self.servers_set = true;
        }
        self.config.servers.push(addr.into());
        self
    }

    /// Set the protocol version advertised in the handshake
    pub fn protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.config.protocol_version = version;
        self
    }

    /// Set the credentials used to authenticate every session
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    /// Set the maximum number of physical connections
    pub fn max_sessions(mut self, count: usize) -> Self {
        self.config.max_sessions = count;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    /// Enable or disable TCP_NODELAY
    pub fn nodelay(mut self, nodelay: bool) -> Self {
        self.config.nodelay = nodelay;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// Opaque key/value pairs presented during authentication
///
/// `Debug` prints keys only.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    entries: BTreeMap<String, String>,
}

impl Credentials {
    pub const USERNAME_KEY: &'static str = "security-username";
    pub const PASSWORD_KEY: &'static str = "security-password";

    pub fn new() -> Self {
        Self::default()
    }

    /// The conventional username/password pair
    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new()
            .with(Self::USERNAME_KEY, username)
            .with(Self::PASSWORD_KEY, password)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy into the map carried by an authentication request
    pub(crate) fn to_wire(&self) -> HashMap<String, String> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
