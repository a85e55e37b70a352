//! Error mapping
//!
//! Turns wire error payloads into client-visible errors.

use std::collections::HashMap;

use super::messages::{ErrorInfo, ErrorResponse, KeyedError};
use crate::error::{Error, RemoteError, Result};
use crate::value::{codec, Value};

/// Map a wire error payload to a remote error
pub fn map_error(error: &ErrorInfo) -> RemoteError {
    RemoteError::new(error.error_code, error.message.clone())
}

/// Map an error response envelope, tolerating a missing payload
pub fn map_error_response(response: ErrorResponse) -> RemoteError {
    response
        .error
        .as_ref()
        .map(map_error)
        .unwrap_or_else(unknown_error)
}

/// Map the per-key failures of a batch response
///
/// Every key is decoded through the value codec. A key that cannot be
/// decoded fails the whole call, since the failure could not be addressed.
pub fn map_keyed_errors(failures: Vec<KeyedError>) -> Result<HashMap<Value, RemoteError>> {
    failures
        .into_iter()
        .map(|failure| {
            let encoded = failure
                .key
                .ok_or_else(|| Error::Decode("Keyed error carries no key".to_string()))?;
            let key = codec::decode(encoded)?
                .ok_or_else(|| Error::Decode("Keyed error carries a null key".to_string()))?;
            let error = failure
                .error
                .as_ref()
                .map(map_error)
                .unwrap_or_else(unknown_error);
            Ok((key, error))
        })
        .collect()
}

fn unknown_error() -> RemoteError {
    RemoteError::new(0, "unknown error")
}
