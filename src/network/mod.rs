//! Network Module
//!
//! Connections to the data-grid server.
//!
//! ## Architecture
//! - `Session`: one stream, handshake/authentication, one request in flight
//! - `Pool`: hands ready sessions to callers, shares credentials

mod session;
mod pool;

use std::io::{Read, Write};

pub use session::{Session, SessionState};
pub use pool::{ConnectFn, Pool, PoolBuilder, PooledSession};

/// A reliable, ordered duplex byte stream
///
/// The client never opens or configures a transport itself, except for the
/// TCP streams `Pool::connect` creates from a `Config`.
pub trait Transport: Read + Write {}

impl<T: Read + Write> Transport for T {}
