//! Envelope framer
//!
//! Reads and writes one protocol envelope as a length-delimited block.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────────┐
//! │ Len (varint 1-10)│   Payload (protobuf message bytes)   │
//! └──────────────────┴──────────────────────────────────────┘
//! ```
//!
//! The length prefix is an unsigned LEB128 varint counting payload bytes.
//! The framer knows nothing about what the payload means.

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};
use prost::Message;

use crate::error::{Error, Result};

/// Maximum payload size accepted from the wire (64 MB)
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Longest legal varint encoding of a 64-bit length
pub const MAX_PREFIX_LEN: usize = 10;

// =============================================================================
// In-memory Encoding/Decoding
// =============================================================================

/// Encode a message into a complete frame (prefix + payload)
pub fn encode_envelope<M: Message>(message: &M) -> Result<Bytes> {
    let payload_len = message.encoded_len();
    if payload_len > MAX_FRAME_SIZE {
        return Err(Error::Framing(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_FRAME_SIZE
        )));
    }

    let mut frame = BytesMut::with_capacity(prost::length_delimiter_len(payload_len) + payload_len);
    message
        .encode_length_delimited(&mut frame)
        .map_err(|e| Error::Framing(format!("Failed to encode envelope: {}", e)))?;

    Ok(frame.freeze())
}

/// Decode a complete frame held in memory
///
/// Trailing bytes after the frame are rejected.
pub fn decode_envelope<M: Message + Default>(bytes: &[u8]) -> Result<M> {
    let mut reader = bytes;
    let message = read_envelope(&mut reader).map_err(|e| match e {
        Error::Transport(io) => Error::Framing(format!("Truncated frame: {}", io)),
        other => other,
    })?;

    if !reader.is_empty() {
        return Err(Error::Framing(format!(
            "Unexpected {} trailing bytes after frame",
            reader.len()
        )));
    }

    Ok(message)
}

// =============================================================================
// Stream-based I/O
// =============================================================================

/// Write one envelope to a stream
///
/// The whole frame goes out in a single `write_all`, so a writer that is
/// used by one caller at a time never interleaves partial frames.
pub fn write_envelope<W: Write, M: Message>(writer: &mut W, message: &M) -> Result<()> {
    let frame = encode_envelope(message)?;
    writer.write_all(&frame)?;
    writer.flush()?;

    tracing::trace!("Wrote envelope frame of {} bytes", frame.len());
    Ok(())
}

/// Read one envelope from a stream
///
/// Blocks until a complete frame is received. A stream that closes mid-frame
/// surfaces as a transport error; a malformed prefix or payload as a framing
/// error.
pub fn read_envelope<R: Read, M: Message + Default>(reader: &mut R) -> Result<M> {
    let payload_len = read_length_prefix(reader)?;

    if payload_len > MAX_FRAME_SIZE {
        return Err(Error::Framing(format!(
            "Payload too large: {} bytes (max {})",
            payload_len, MAX_FRAME_SIZE
        )));
    }

    let mut payload = vec![0u8; payload_len];
    if payload_len > 0 {
        reader.read_exact(&mut payload)?;
    }

    tracing::trace!("Read envelope frame with {} byte payload", payload_len);

    M::decode(payload.as_slice())
        .map_err(|e| Error::Framing(format!("Malformed envelope payload: {}", e)))
}

/// Read the varint length prefix one byte at a time
fn read_length_prefix<R: Read>(reader: &mut R) -> Result<usize> {
    let mut value: u64 = 0;

    for index in 0..MAX_PREFIX_LEN {
        let mut byte = [0u8; 1];
        reader.read_exact(&mut byte)?;

        // The tenth byte holds only the top bit of a 64-bit length
        if index == MAX_PREFIX_LEN - 1 && byte[0] & 0x7f > 1 {
            return Err(Error::Framing("Length prefix overflows 64 bits".to_string()));
        }

        value |= u64::from(byte[0] & 0x7f) << (7 * index);
        if byte[0] & 0x80 == 0 {
            return usize::try_from(value).map_err(|_| {
                Error::Framing(format!("Length prefix {} does not fit in memory", value))
            });
        }
    }

    Err(Error::Framing(format!(
        "Length prefix longer than {} bytes",
        MAX_PREFIX_LEN
    )))
}
