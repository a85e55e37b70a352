//! Error types for gridlink
//!
//! Provides a unified error type for all client operations.

use std::fmt;

use thiserror::Error;

/// Result type alias using gridlink's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for gridlink operations
#[derive(Debug, Error)]
pub enum Error {
    // -------------------------------------------------------------------------
    // Session-fatal Errors
    // -------------------------------------------------------------------------
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Framing error: {0}")]
    Framing(String),

    #[error("Handshake failed: {0}")]
    Handshake(String),

    /// Credentials were rejected. Carries only the server's message.
    #[error("{0}")]
    Authentication(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Session has failed and cannot be reused")]
    SessionFailed,

    // -------------------------------------------------------------------------
    // Value Codec Errors
    // -------------------------------------------------------------------------
    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Decode error: {0}")]
    Decode(String),

    // -------------------------------------------------------------------------
    // Server-reported Errors
    // -------------------------------------------------------------------------
    #[error(transparent)]
    Remote(#[from] RemoteError),

    // -------------------------------------------------------------------------
    // Pool / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("No connection available in pool")]
    NoConnection,

    #[error("Pool has been closed")]
    PoolClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error leaves the session that produced it unusable.
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::Framing(_)
                | Error::Handshake(_)
                | Error::Authentication(_)
                | Error::Protocol(_)
                | Error::SessionFailed
        )
    }

    /// Whether the server rejected the pool's credentials
    pub fn is_authentication(&self) -> bool {
        matches!(self, Error::Authentication(_))
    }

    /// The server-reported error, if this is one
    pub fn as_remote(&self) -> Option<&RemoteError> {
        match self {
            Error::Remote(remote) => Some(remote),
            _ => None,
        }
    }
}

/// An operation failure reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    pub code: i32,
    pub message: String,
}

impl RemoteError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for RemoteError {}
