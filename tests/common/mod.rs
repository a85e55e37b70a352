//! Shared test helpers
//!
//! A scripted in-memory transport plus builders for server responses.

#![allow(dead_code)]

use std::io::{self, Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

use gridlink::protocol::{
    decode_envelope, encode_envelope, read_envelope, AuthenticationResponse, EncodedValue,
    ErrorInfo, ErrorResponse, HandshakeResponse, Message, MessageType,
};
use gridlink::value::codec;
use gridlink::Value;

// =============================================================================
// Fake Transport
// =============================================================================

/// Everything the client wrote to a `FakeStream`
#[derive(Default)]
pub struct WriteLog {
    /// Number of `write` calls
    pub writes: usize,

    /// Concatenated bytes written
    pub bytes: Vec<u8>,
}

/// A stream that replays pre-encoded response frames and records writes
///
/// Once the script is exhausted, reads report end of stream.
pub struct FakeStream {
    input: Cursor<Vec<u8>>,
    log: Arc<Mutex<WriteLog>>,
}

/// Handle for inspecting a `FakeStream` after it moved into a pool
#[derive(Clone)]
pub struct FakeHandle {
    log: Arc<Mutex<WriteLog>>,
}

impl FakeStream {
    pub fn new(responses: Vec<MessageType>) -> (Self, FakeHandle) {
        let mut input = Vec::new();
        for response in responses {
            input.extend_from_slice(&encode_envelope(&Message::from(response)).unwrap());
        }
        Self::from_bytes(input)
    }

    /// Replay raw bytes, for malformed-frame tests
    pub fn from_bytes(input: Vec<u8>) -> (Self, FakeHandle) {
        let log = Arc::new(Mutex::new(WriteLog::default()));
        let stream = Self {
            input: Cursor::new(input),
            log: Arc::clone(&log),
        };
        (stream, FakeHandle { log })
    }
}

impl Read for FakeStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for FakeStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut log = self.log.lock();
        log.writes += 1;
        log.bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl FakeHandle {
    pub fn write_count(&self) -> usize {
        self.log.lock().writes
    }

    /// Every envelope the client sent, in order
    pub fn sent(&self) -> Vec<MessageType> {
        let bytes = self.log.lock().bytes.clone();
        let mut reader = bytes.as_slice();
        let mut messages = Vec::new();
        while !reader.is_empty() {
            let message: Message = read_envelope(&mut reader).unwrap();
            messages.push(message.message_type.unwrap());
        }
        messages
    }

    /// Names of the envelopes the client sent, in order
    pub fn sent_names(&self) -> Vec<&'static str> {
        self.sent().iter().map(MessageType::name).collect()
    }
}

// =============================================================================
// Response Builders
// =============================================================================

pub fn handshake_ok() -> MessageType {
    MessageType::HandshakeResponse(HandshakeResponse {
        server_major_version: 1,
        server_minor_version: 1,
        handshake_passed: true,
    })
}

pub fn handshake_rejected() -> MessageType {
    MessageType::HandshakeResponse(HandshakeResponse {
        server_major_version: 2,
        server_minor_version: 0,
        handshake_passed: false,
    })
}

pub fn authenticated(accepted: bool) -> MessageType {
    MessageType::AuthenticationResponse(AuthenticationResponse {
        authenticated: accepted,
    })
}

pub fn error_response(code: i32, message: &str) -> MessageType {
    MessageType::ErrorResponse(ErrorResponse {
        error: Some(ErrorInfo {
            error_code: code,
            message: message.to_string(),
        }),
    })
}

/// Encode a value the way the server would
pub fn encoded(value: impl Into<Value>) -> EncodedValue {
    codec::encode(&value.into()).unwrap()
}

/// Frame a message and decode it again, as a sanity check for builders
pub fn reframe(message: MessageType) -> MessageType {
    let bytes = encode_envelope(&Message::from(message)).unwrap();
    decode_envelope::<Message>(&bytes).unwrap().message_type.unwrap()
}
