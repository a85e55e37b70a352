//! Session
//!
//! One physical connection and its handshake/authentication state machine.

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::protocol::{
    map_error_response, read_envelope, write_envelope, AuthenticationRequest,
    DisconnectClientRequest, HandshakeRequest, Message, MessageType, ProtocolVersion,
};

use super::Transport;

/// Lifecycle of a session. Transitions only move forward.
///
/// ```text
/// Unconnected ─► Handshaking ─► Handshaken ─┬─────────────────────► Ready
///      │                                    └─► Authenticating ─► Ready
///      └──────────────(first operation)─────────┘
///
/// any state ─(transport / framing / protocol error)─► Failed
/// ```
///
/// The handshake is an explicit step. A session that skips it goes straight
/// to authentication (or `Ready`) on first use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unconnected,
    Handshaking,
    Handshaken,
    Authenticating,
    Ready,
    Failed,
}

/// A single connection carrying one request at a time
///
/// The session owns its stream exclusively. Requests and responses are
/// correlated by position: the frame read after a write answers that write.
/// Exclusive access comes from `&mut self`.
pub struct Session<S> {
    /// Underlying duplex stream
    stream: S,

    state: SessionState,

    /// Version advertised during the handshake
    version: ProtocolVersion,

    /// Identifier for logging
    id: u64,
}

impl<S: Transport> Session<S> {
    /// Wrap a stream; no bytes are exchanged until first use
    pub fn new(stream: S) -> Self {
        Self::with_version(stream, ProtocolVersion::CURRENT)
    }

    pub fn with_version(stream: S, version: ProtocolVersion) -> Self {
        Self {
            stream,
            state: SessionState::Unconnected,
            version,
            id: 0,
        }
    }

    pub(crate) fn with_id(mut self, id: u64) -> Self {
        self.id = id;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    pub fn is_failed(&self) -> bool {
        self.state == SessionState::Failed
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Advertise the protocol version and wait for the server's verdict
    ///
    /// Only an `Unconnected` session sends a handshake; later states return
    /// immediately. A rejection fails the session.
    pub fn handshake(&mut self) -> Result<()> {
        match self.state {
            SessionState::Unconnected => {}
            SessionState::Failed => return Err(Error::SessionFailed),
            _ => return Ok(()),
        }

        let result = self.send_handshake();
        if let Err(ref e) = result {
            self.fail(e);
        }
        result
    }

    /// Bring the session to `Ready`, authenticating if credentials are given
    ///
    /// A ready session returns immediately; a failed one is refused.
    pub fn ensure_ready(&mut self, credentials: Option<&Credentials>) -> Result<()> {
        match self.state {
            SessionState::Ready => return Ok(()),
            SessionState::Failed => return Err(Error::SessionFailed),
            _ => {}
        }

        let result = match credentials {
            Some(credentials) => self.authenticate(credentials),
            None => {
                self.state = SessionState::Ready;
                Ok(())
            }
        };

        match result {
            Ok(()) => tracing::debug!("Session {} ready", self.id),
            Err(ref e) => self.fail(e),
        }
        result
    }

    fn send_handshake(&mut self) -> Result<()> {
        self.state = SessionState::Handshaking;
        tracing::debug!("Session {} handshaking as version {}", self.id, self.version);

        let request = MessageType::HandshakeRequest(HandshakeRequest {
            major_version: self.version.major,
            minor_version: self.version.minor,
        });

        match self.round_trip(request)? {
            MessageType::HandshakeResponse(ack) if ack.handshake_passed => {
                tracing::debug!(
                    "Session {} handshake accepted by server {}.{}",
                    self.id,
                    ack.server_major_version,
                    ack.server_minor_version
                );
                self.state = SessionState::Handshaken;
                Ok(())
            }
            MessageType::HandshakeResponse(ack) => Err(Error::Handshake(format!(
                "server {}.{} rejected client version {}",
                ack.server_major_version, ack.server_minor_version, self.version
            ))),
            MessageType::ErrorResponse(response) => {
                Err(Error::Handshake(map_error_response(response).to_string()))
            }
            other => Err(Error::Protocol(format!(
                "Expected HandshakeResponse, got {}",
                other.name()
            ))),
        }
    }

    fn authenticate(&mut self, credentials: &Credentials) -> Result<()> {
        self.state = SessionState::Authenticating;
        tracing::debug!("Session {} authenticating with {:?}", self.id, credentials);

        let request = MessageType::AuthenticationRequest(AuthenticationRequest {
            credentials: credentials.to_wire(),
        });

        match self.round_trip(request)? {
            MessageType::AuthenticationResponse(response) if response.authenticated => {
                self.state = SessionState::Ready;
                Ok(())
            }
            MessageType::AuthenticationResponse(_) => Err(Error::Authentication(
                "credentials rejected by server".to_string(),
            )),
            MessageType::ErrorResponse(response) => Err(Error::Authentication(
                map_error_response(response).to_string(),
            )),
            other => Err(Error::Protocol(format!(
                "Expected AuthenticationResponse, got {}",
                other.name()
            ))),
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Send one request and block for its response
    ///
    /// The session must be `Ready`. Any transport or framing error leaves it
    /// `Failed`.
    pub fn exchange(&mut self, request: MessageType) -> Result<MessageType> {
        match self.state {
            SessionState::Ready => {}
            SessionState::Failed => return Err(Error::SessionFailed),
            state => {
                return Err(Error::Protocol(format!(
                    "Session {} is {:?}, not ready for requests",
                    self.id, state
                )))
            }
        }

        let result = self.round_trip(request);
        if let Err(ref e) = result {
            self.fail(e);
        }
        result
    }

    /// Mark the session unusable after a protocol violation seen by the caller
    pub fn fail(&mut self, reason: &Error) {
        if self.state != SessionState::Failed {
            tracing::warn!("Session {} failed in state {:?}: {}", self.id, self.state, reason);
            self.state = SessionState::Failed;
        }
    }

    /// Tell the server this client is going away and drop the connection
    ///
    /// Best effort: nothing is read back, and sessions that never became
    /// ready are dropped silently.
    pub fn disconnect(mut self) -> Result<()> {
        if !self.is_ready() {
            return Ok(());
        }

        tracing::debug!("Session {} disconnecting", self.id);
        let request = Message::from(MessageType::DisconnectClientRequest(DisconnectClientRequest {
            reason: "client closed".to_string(),
        }));
        write_envelope(&mut self.stream, &request)
    }

    fn round_trip(&mut self, request: MessageType) -> Result<MessageType> {
        tracing::trace!("Session {} sending {}", self.id, request.name());
        write_envelope(&mut self.stream, &Message::from(request))?;

        let response: Message = read_envelope(&mut self.stream)?;
        let response = response
            .message_type
            .ok_or_else(|| Error::Protocol("Received an empty envelope".to_string()))?;

        tracing::trace!("Session {} received {}", self.id, response.name());
        Ok(response)
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("version", &self.version)
            .finish()
    }
}
