//! Connector Module
//!
//! The public operation surface of the client.
//!
//! ## Responsibilities
//! - Encode operands through the value codec before any I/O
//! - Build the request envelope for each operation
//! - Borrow a ready session from the pool for exactly one exchange
//! - Decode responses and map server errors

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{Error, RemoteError, Result};
use crate::network::{Pool, Transport};
use crate::protocol::{
    map_error_response, map_keyed_errors, ClearRequest, EncodedValue, Entry,
    ExecuteFunctionOnGroupRequest, ExecuteFunctionOnMemberRequest,
    ExecuteFunctionOnRegionRequest, GetAllRequest, GetRegionNamesRequest, GetRequest,
    GetSizeRequest, KeySetRequest, MessageType, PutAllRequest, PutIfAbsentRequest, PutRequest,
    RemoveRequest,
};
use crate::value::{codec, Decoded, Fetched, Value};

/// Successful entries and per-key failures of a `get_all`
pub type GetAllResult = (HashMap<Value, Value>, HashMap<Value, RemoteError>);

/// Client handle for region operations and function execution
///
/// ## Operation Shape
///
/// Every call follows the same steps:
/// 1. Encode operands (a codec failure aborts before a session is touched)
/// 2. Build the request envelope
/// 3. Acquire a ready session from the pool
/// 4. Send the request and block for the response
/// 5. Release the session
/// 6. Decode the response
///
/// Cloning is cheap; clones share the pool.
pub struct Connector<S> {
    pool: Arc<Pool<S>>,
}

impl<S> Clone for Connector<S> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<S: Transport> Connector<S> {
    pub fn new(pool: Pool<S>) -> Self {
        Self::with_pool(Arc::new(pool))
    }

    pub fn with_pool(pool: Arc<Pool<S>>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<Pool<S>> {
        &self.pool
    }

    /// Advertise the protocol version on a pooled session
    ///
    /// Optional: operations work on sessions that never handshook.
    pub fn handshake(&self) -> Result<()> {
        self.pool.handshake()
    }

    // =========================================================================
    // Single-key Operations
    // =========================================================================

    /// Get the value stored under `key`, or `None` if there is no entry
    ///
    /// Structured values need a destination; use [`Connector::get_into`].
    pub fn get(&self, region: &str, key: impl Into<Value>) -> Result<Option<Value>> {
        match self.get_encoded(region, key.into())? {
            Some(encoded) => codec::decode(encoded),
            None => Ok(None),
        }
    }

    /// Get the value stored under `key`, decoding a structured value into
    /// `destination`
    pub fn get_into<'a, T>(
        &self,
        region: &str,
        key: impl Into<Value>,
        destination: &'a mut T,
    ) -> Result<Option<Decoded<'a, T>>>
    where
        T: DeserializeOwned,
    {
        match self.get_encoded(region, key.into())? {
            Some(encoded) => codec::decode_into(encoded, destination),
            None => Ok(None),
        }
    }

    fn get_encoded(&self, region: &str, key: Value) -> Result<Option<EncodedValue>> {
        let request = MessageType::GetRequest(GetRequest {
            region_name: region.to_string(),
            key: Some(codec::encode(&key)?),
        });

        self.call(request, |response| match response {
            MessageType::GetResponse(response) => Some(response.result),
            _ => None,
        })
    }

    /// Store `value` under `key`
    pub fn put(&self, region: &str, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
        let request = MessageType::PutRequest(PutRequest {
            region_name: region.to_string(),
            entry: Some(encode_entry(&key.into(), &value.into())?),
        });

        self.call(request, |response| match response {
            MessageType::PutResponse(_) => Some(()),
            _ => None,
        })
    }

    /// Store `value` only if `key` has no entry; returns the existing value
    /// otherwise
    pub fn put_if_absent(
        &self,
        region: &str,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>> {
        let request = MessageType::PutIfAbsentRequest(PutIfAbsentRequest {
            region_name: region.to_string(),
            entry: Some(encode_entry(&key.into(), &value.into())?),
        });

        let old_value = self.call(request, |response| match response {
            MessageType::PutIfAbsentResponse(response) => Some(response.old_value),
            _ => None,
        })?;

        match old_value {
            Some(encoded) => codec::decode(encoded),
            None => Ok(None),
        }
    }

    /// Remove the entry under `key`; a missing key is not an error
    pub fn remove(&self, region: &str, key: impl Into<Value>) -> Result<()> {
        let request = MessageType::RemoveRequest(RemoveRequest {
            region_name: region.to_string(),
            key: Some(codec::encode(&key.into())?),
        });

        self.call(request, |response| match response {
            MessageType::RemoveResponse(_) => Some(()),
            _ => None,
        })
    }

    // =========================================================================
    // Region Operations
    // =========================================================================

    /// Number of entries in the region
    pub fn size(&self, region: &str) -> Result<i32> {
        let request = MessageType::GetSizeRequest(GetSizeRequest {
            region_name: region.to_string(),
        });

        self.call(request, |response| match response {
            MessageType::GetSizeResponse(response) => Some(response.size),
            _ => None,
        })
    }

    /// All keys in the region, in server order
    pub fn key_set(&self, region: &str) -> Result<Vec<Value>> {
        let request = MessageType::KeySetRequest(KeySetRequest {
            region_name: region.to_string(),
        });

        let keys = self.call(request, |response| match response {
            MessageType::KeySetResponse(response) => Some(response.keys),
            _ => None,
        })?;

        decode_sequence(keys, "key set")
    }

    /// Remove every entry in the region
    pub fn clear(&self, region: &str) -> Result<()> {
        let request = MessageType::ClearRequest(ClearRequest {
            region_name: region.to_string(),
        });

        self.call(request, |response| match response {
            MessageType::ClearResponse(_) => Some(()),
            _ => None,
        })
    }

    /// Names of the regions the server hosts
    pub fn region_names(&self) -> Result<Vec<String>> {
        let request = MessageType::GetRegionNamesRequest(GetRegionNamesRequest {});

        self.call(request, |response| match response {
            MessageType::GetRegionNamesResponse(response) => Some(response.regions),
            _ => None,
        })
    }

    // =========================================================================
    // Batch Operations
    // =========================================================================

    /// Store many entries in one request
    ///
    /// Every entry is encoded before anything is sent. Returns `None` when
    /// every entry was stored, otherwise the keys that failed with their
    /// errors; keys absent from the map succeeded.
    pub fn put_all<I, K, V>(
        &self,
        region: &str,
        entries: I,
    ) -> Result<Option<HashMap<Value, RemoteError>>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| encode_entry(&key.into(), &value.into()))
            .collect::<Result<Vec<_>>>()?;

        if entries.is_empty() {
            return Ok(None);
        }

        let request = MessageType::PutAllRequest(PutAllRequest {
            region_name: region.to_string(),
            entry: entries,
        });

        let failed_keys = self.call(request, |response| match response {
            MessageType::PutAllResponse(response) => Some(response.failed_keys),
            _ => None,
        })?;

        if failed_keys.is_empty() {
            return Ok(None);
        }

        let failures = map_keyed_errors(failed_keys)?;
        tracing::debug!("put_all on '{}': {} keys failed", region, failures.len());
        Ok(Some(failures))
    }

    /// Fetch many keys in one request
    ///
    /// Returns the entries found and the keys that failed. A key appears in
    /// at most one of the two maps; keys with no entry appear in neither.
    /// A structured value fails the whole call with `Decode`; use
    /// [`Connector::get_all_into`] when the region holds records.
    pub fn get_all<I, K>(&self, region: &str, keys: I) -> Result<GetAllResult>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        self.fetch_all(region, keys, codec::decode)
    }

    /// Fetch many keys in one request, deserializing structured values into
    /// `T`
    ///
    /// Scalar values come back as `Fetched::Value`.
    pub fn get_all_into<T, I, K>(
        &self,
        region: &str,
        keys: I,
    ) -> Result<(HashMap<Value, Fetched<T>>, HashMap<Value, RemoteError>)>
    where
        T: DeserializeOwned,
        I: IntoIterator<Item = K>,
        K: Into<Value>,
    {
        self.fetch_all(region, keys, codec::decode_owned::<T>)
    }

    fn fetch_all<I, K, R, F>(
        &self,
        region: &str,
        keys: I,
        decode: F,
    ) -> Result<(HashMap<Value, R>, HashMap<Value, RemoteError>)>
    where
        I: IntoIterator<Item = K>,
        K: Into<Value>,
        F: Fn(EncodedValue) -> Result<Option<R>>,
    {
        let keys = keys
            .into_iter()
            .map(|key| codec::encode(&key.into()))
            .collect::<Result<Vec<_>>>()?;

        if keys.is_empty() {
            return Ok((HashMap::new(), HashMap::new()));
        }

        let request = MessageType::GetAllRequest(GetAllRequest {
            region_name: region.to_string(),
            key: keys,
        });

        let (entries, failures) = self.call(request, |response| match response {
            MessageType::GetAllResponse(response) => Some((response.entries, response.failures)),
            _ => None,
        })?;

        let failures = map_keyed_errors(failures)?;

        let mut found = HashMap::with_capacity(entries.len());
        for entry in entries {
            let key = decode_required(entry.key, "get_all entry key")?;
            if failures.contains_key(&key) {
                continue;
            }
            if let Some(value) = entry.value.map(&decode).transpose()?.flatten() {
                found.insert(key, value);
            }
        }

        Ok((found, failures))
    }

    // =========================================================================
    // Function Execution
    // =========================================================================

    /// Execute a function on the members hosting `region`
    ///
    /// `filter_keys` restricts execution to the members owning those keys.
    pub fn execute_on_region(
        &self,
        region: &str,
        function_id: &str,
        arguments: &[Value],
        filter_keys: &[Value],
    ) -> Result<Vec<Value>> {
        let request = MessageType::ExecuteFunctionOnRegionRequest(ExecuteFunctionOnRegionRequest {
            function_id: function_id.to_string(),
            region: region.to_string(),
            arguments: codec::encode_all(arguments)?,
            key_filter: codec::encode_all(filter_keys)?,
        });

        let results = self.call(request, |response| match response {
            MessageType::ExecuteFunctionOnRegionResponse(response) => Some(response.results),
            _ => None,
        })?;

        decode_sequence(results, "function result")
    }

    /// Execute a function on the named members
    pub fn execute_on_members<M>(
        &self,
        function_id: &str,
        member_ids: &[M],
        arguments: &[Value],
    ) -> Result<Vec<Value>>
    where
        M: AsRef<str>,
    {
        let request = MessageType::ExecuteFunctionOnMemberRequest(ExecuteFunctionOnMemberRequest {
            function_id: function_id.to_string(),
            member_name: member_ids.iter().map(|m| m.as_ref().to_string()).collect(),
            arguments: codec::encode_all(arguments)?,
        });

        let results = self.call(request, |response| match response {
            MessageType::ExecuteFunctionOnMemberResponse(response) => Some(response.results),
            _ => None,
        })?;

        decode_sequence(results, "function result")
    }

    /// Execute a function on every member of the named groups
    pub fn execute_on_groups<G>(
        &self,
        function_id: &str,
        group_names: &[G],
        arguments: &[Value],
    ) -> Result<Vec<Value>>
    where
        G: AsRef<str>,
    {
        let request = MessageType::ExecuteFunctionOnGroupRequest(ExecuteFunctionOnGroupRequest {
            function_id: function_id.to_string(),
            group_name: group_names.iter().map(|g| g.as_ref().to_string()).collect(),
            arguments: codec::encode_all(arguments)?,
        });

        let results = self.call(request, |response| match response {
            MessageType::ExecuteFunctionOnGroupResponse(response) => Some(response.results),
            _ => None,
        })?;

        decode_sequence(results, "function result")
    }

    // =========================================================================
    // Exchange
    // =========================================================================

    /// Run one request/response exchange on a pooled session
    ///
    /// `expect` picks the payload out of the response variant the request
    /// calls for. An error response becomes `Error::Remote`; any other
    /// variant is a protocol violation and fails the session.
    fn call<T, F>(&self, request: MessageType, expect: F) -> Result<T>
    where
        F: FnOnce(MessageType) -> Option<T>,
    {
        let request_name = request.name();
        let mut session = self.pool.acquire()?;
        let response = session.exchange(request)?;

        match response {
            MessageType::ErrorResponse(response) => {
                let error = map_error_response(response);
                tracing::debug!("{} rejected by server: {}", request_name, error);
                Err(Error::Remote(error))
            }
            response => {
                let response_name = response.name();
                expect(response).ok_or_else(|| {
                    let error = Error::Protocol(format!(
                        "Unexpected {} in reply to {}",
                        response_name, request_name
                    ));
                    session.fail(&error);
                    error
                })
            }
        }
    }
}

fn encode_entry(key: &Value, value: &Value) -> Result<Entry> {
    Ok(Entry {
        key: Some(codec::encode(key)?),
        value: Some(codec::encode(value)?),
    })
}

fn decode_required(encoded: Option<EncodedValue>, what: &str) -> Result<Value> {
    let encoded = encoded.ok_or_else(|| Error::Decode(format!("Missing {}", what)))?;
    codec::decode(encoded)?.ok_or_else(|| Error::Decode(format!("Null {}", what)))
}

fn decode_sequence(values: Vec<EncodedValue>, what: &str) -> Result<Vec<Value>> {
    values
        .into_iter()
        .map(|encoded| decode_required(Some(encoded), what))
        .collect()
}
