//! # gridlink
//!
//! A blocking client for a length-delimited, envelope-based key/value
//! data-grid protocol:
//! - Varint length-prefixed protobuf envelopes over any duplex byte stream
//! - Handshake and optional authentication per connection
//! - Tagged value codec for integers, floats, text, bytes and records
//! - Single-key, batch (with per-key failures) and function operations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Connector                             │
//! │        (get / put / remove / size / put_all / get_all /      │
//! │                   execute_on_* functions)                    │
//! └──────────┬──────────────────────────────────┬───────────────┘
//!            │ encode / decode                  │ acquire / release
//!            ▼                                  ▼
//!   ┌─────────────────┐                 ┌─────────────────┐
//!   │   Value Codec   │                 │      Pool       │
//!   │  Error Mapper   │                 │  (credentials)  │
//!   └─────────────────┘                 └────────┬────────┘
//!                                                │
//!                                                ▼
//!                                       ┌─────────────────┐
//!                                       │     Session     │
//!                                       │ (handshake/auth)│
//!                                       └────────┬────────┘
//!                                                │
//!                                                ▼
//!                                       ┌─────────────────┐
//!                                       │     Framer      │
//!                                       │ (varint frames) │
//!                                       └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use gridlink::{Config, Connector, Pool, Value};
//!
//! let config = Config::builder().server("127.0.0.1:40404").build();
//! let connector = Connector::new(Pool::connect(&config)?);
//!
//! connector.put("region", "A", 1)?;
//! assert_eq!(connector.get("region", "A")?, Some(Value::Int(1)));
//! # Ok::<(), gridlink::Error>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod value;
pub mod network;
pub mod connector;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Error, RemoteError, Result};
pub use config::{Config, Credentials};
pub use connector::{Connector, GetAllResult};
pub use network::{Pool, Session, SessionState};
pub use value::{Decoded, Fetched, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gridlink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
