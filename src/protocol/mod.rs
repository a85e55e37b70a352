//! Protocol Module
//!
//! Defines the wire protocol spoken with the data-grid server.
//!
//! ## Frame Format
//! ```text
//! ┌──────────────────┬──────────────────────────────────────┐
//! │ Len (varint)     │   Message (protobuf envelope)        │
//! └──────────────────┴──────────────────────────────────────┘
//! ```
//!
//! ### Envelope
//! Every frame carries one `Message` with exactly one variant set: a
//! handshake, an authentication exchange, a region operation, a function
//! execution, or an error response.
//!
//! ### Correlation
//! There are no request identifiers. The frame read after a write is the
//! response to that write, so a connection carries one request at a time.

mod framer;
mod messages;
mod errors;

pub use framer::{
    decode_envelope, encode_envelope, read_envelope, write_envelope, MAX_FRAME_SIZE,
    MAX_PREFIX_LEN,
};
pub use messages::*;
pub use errors::{map_error, map_error_response, map_keyed_errors};

/// Protocol version advertised during the handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    /// The version this client speaks
    pub const CURRENT: ProtocolVersion = ProtocolVersion { major: 1, minor: 1 };

    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
