//! Message schema
//!
//! Protobuf layouts for every envelope the client sends or receives. These
//! are written out by hand with `prost` derives instead of being generated
//! at build time; field tags are part of the wire contract and must not be
//! renumbered.

use std::collections::HashMap;

// =============================================================================
// Values
// =============================================================================

/// A single tagged value on the wire
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EncodedValue {
    #[prost(oneof = "encoded_value::Kind", tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11")]
    pub kind: Option<encoded_value::Kind>,
}

pub mod encoded_value {
    /// Wire type tag together with its payload
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(int32, tag = "1")]
        IntResult(i32),
        #[prost(int64, tag = "2")]
        LongResult(i64),
        /// Legacy 16-bit tag. Never produced by the client, accepted on read.
        #[prost(int32, tag = "3")]
        ShortResult(i32),
        #[prost(int32, tag = "4")]
        ByteResult(i32),
        #[prost(bool, tag = "5")]
        BooleanResult(bool),
        #[prost(double, tag = "6")]
        DoubleResult(f64),
        #[prost(float, tag = "7")]
        FloatResult(f32),
        #[prost(bytes = "vec", tag = "8")]
        BinaryResult(Vec<u8>),
        #[prost(string, tag = "9")]
        StringResult(String),
        #[prost(string, tag = "10")]
        JsonObjectResult(String),
        #[prost(message, tag = "11")]
        NullResult(super::NullValue),
    }
}

/// Marker for "no value"
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NullValue {}

/// A key/value pair
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entry {
    #[prost(message, optional, tag = "1")]
    pub key: Option<EncodedValue>,
    #[prost(message, optional, tag = "2")]
    pub value: Option<EncodedValue>,
}

// =============================================================================
// Errors
// =============================================================================

/// Server-side error payload
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorInfo {
    #[prost(int32, tag = "1")]
    pub error_code: i32,
    #[prost(string, tag = "2")]
    pub message: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorResponse {
    #[prost(message, optional, tag = "1")]
    pub error: Option<ErrorInfo>,
}

/// Per-key failure inside a batch response
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyedError {
    #[prost(message, optional, tag = "1")]
    pub key: Option<EncodedValue>,
    #[prost(message, optional, tag = "2")]
    pub error: Option<ErrorInfo>,
}

// =============================================================================
// Connection Setup
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HandshakeRequest {
    #[prost(uint32, tag = "1")]
    pub major_version: u32,
    #[prost(uint32, tag = "2")]
    pub minor_version: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HandshakeResponse {
    #[prost(uint32, tag = "1")]
    pub server_major_version: u32,
    #[prost(uint32, tag = "2")]
    pub server_minor_version: u32,
    #[prost(bool, tag = "3")]
    pub handshake_passed: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticationRequest {
    #[prost(map = "string, string", tag = "1")]
    pub credentials: HashMap<String, String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthenticationResponse {
    #[prost(bool, tag = "1")]
    pub authenticated: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DisconnectClientRequest {
    #[prost(string, tag = "1")]
    pub reason: String,
}

// =============================================================================
// Region Operations
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<Entry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutIfAbsentRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<Entry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutIfAbsentResponse {
    #[prost(message, optional, tag = "1")]
    pub old_value: Option<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, optional, tag = "2")]
    pub key: Option<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResponse {
    #[prost(message, optional, tag = "1")]
    pub result: Option<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutAllRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, repeated, tag = "2")]
    pub entry: Vec<Entry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PutAllResponse {
    #[prost(message, repeated, tag = "1")]
    pub failed_keys: Vec<KeyedError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, repeated, tag = "2")]
    pub key: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetAllResponse {
    #[prost(message, repeated, tag = "1")]
    pub entries: Vec<Entry>,
    #[prost(message, repeated, tag = "2")]
    pub failures: Vec<KeyedError>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
    #[prost(message, optional, tag = "2")]
    pub key: Option<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RemoveResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSizeRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetSizeResponse {
    #[prost(int32, tag = "1")]
    pub size: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeySetRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeySetResponse {
    #[prost(message, repeated, tag = "1")]
    pub keys: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClearRequest {
    #[prost(string, tag = "1")]
    pub region_name: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ClearResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRegionNamesRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetRegionNamesResponse {
    #[prost(string, repeated, tag = "1")]
    pub regions: Vec<String>,
}

// =============================================================================
// Function Execution
// =============================================================================

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnRegionRequest {
    #[prost(string, tag = "1")]
    pub function_id: String,
    #[prost(string, tag = "2")]
    pub region: String,
    #[prost(message, repeated, tag = "3")]
    pub arguments: Vec<EncodedValue>,
    #[prost(message, repeated, tag = "4")]
    pub key_filter: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnRegionResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnMemberRequest {
    #[prost(string, tag = "1")]
    pub function_id: String,
    #[prost(string, repeated, tag = "2")]
    pub member_name: Vec<String>,
    #[prost(message, repeated, tag = "3")]
    pub arguments: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnMemberResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnGroupRequest {
    #[prost(string, tag = "1")]
    pub function_id: String,
    #[prost(string, repeated, tag = "2")]
    pub group_name: Vec<String>,
    #[prost(message, repeated, tag = "3")]
    pub arguments: Vec<EncodedValue>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ExecuteFunctionOnGroupResponse {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<EncodedValue>,
}

// =============================================================================
// Envelope
// =============================================================================

/// One protocol frame. Exactly one variant of `message_type` is populated.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Message {
    #[prost(
        oneof = "MessageType",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32"
    )]
    pub message_type: Option<MessageType>,
}

#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum MessageType {
    #[prost(message, tag = "1")]
    HandshakeRequest(HandshakeRequest),
    #[prost(message, tag = "2")]
    HandshakeResponse(HandshakeResponse),
    #[prost(message, tag = "3")]
    AuthenticationRequest(AuthenticationRequest),
    #[prost(message, tag = "4")]
    AuthenticationResponse(AuthenticationResponse),
    #[prost(message, tag = "5")]
    ErrorResponse(ErrorResponse),
    #[prost(message, tag = "6")]
    PutRequest(PutRequest),
    #[prost(message, tag = "7")]
    PutResponse(PutResponse),
    #[prost(message, tag = "8")]
    GetRequest(GetRequest),
    #[prost(message, tag = "9")]
    GetResponse(GetResponse),
    #[prost(message, tag = "10")]
    PutAllRequest(PutAllRequest),
    #[prost(message, tag = "11")]
    PutAllResponse(PutAllResponse),
    #[prost(message, tag = "12")]
    GetAllRequest(GetAllRequest),
    #[prost(message, tag = "13")]
    GetAllResponse(GetAllResponse),
    #[prost(message, tag = "14")]
    RemoveRequest(RemoveRequest),
    #[prost(message, tag = "15")]
    RemoveResponse(RemoveResponse),
    #[prost(message, tag = "16")]
    GetSizeRequest(GetSizeRequest),
    #[prost(message, tag = "17")]
    GetSizeResponse(GetSizeResponse),
    #[prost(message, tag = "18")]
    ExecuteFunctionOnRegionRequest(ExecuteFunctionOnRegionRequest),
    #[prost(message, tag = "19")]
    ExecuteFunctionOnRegionResponse(ExecuteFunctionOnRegionResponse),
    #[prost(message, tag = "20")]
    ExecuteFunctionOnMemberRequest(ExecuteFunctionOnMemberRequest),
    #[prost(message, tag = "21")]
    ExecuteFunctionOnMemberResponse(ExecuteFunctionOnMemberResponse),
    #[prost(message, tag = "22")]
    ExecuteFunctionOnGroupRequest(ExecuteFunctionOnGroupRequest),
    #[prost(message, tag = "23")]
    ExecuteFunctionOnGroupResponse(ExecuteFunctionOnGroupResponse),
    #[prost(message, tag = "24")]
    PutIfAbsentRequest(PutIfAbsentRequest),
    #[prost(message, tag = "25")]
    PutIfAbsentResponse(PutIfAbsentResponse),
    #[prost(message, tag = "26")]
    KeySetRequest(KeySetRequest),
    #[prost(message, tag = "27")]
    KeySetResponse(KeySetResponse),
    #[prost(message, tag = "28")]
    ClearRequest(ClearRequest),
    #[prost(message, tag = "29")]
    ClearResponse(ClearResponse),
    #[prost(message, tag = "30")]
    GetRegionNamesRequest(GetRegionNamesRequest),
    #[prost(message, tag = "31")]
    GetRegionNamesResponse(GetRegionNamesResponse),
    #[prost(message, tag = "32")]
    DisconnectClientRequest(DisconnectClientRequest),
}

impl MessageType {
    /// Variant name, for logs and protocol errors
    pub fn name(&self) -> &'static str {
        match self {
            MessageType::HandshakeRequest(_) => "HandshakeRequest",
            MessageType::HandshakeResponse(_) => "HandshakeResponse",
            MessageType::AuthenticationRequest(_) => "AuthenticationRequest",
            MessageType::AuthenticationResponse(_) => "AuthenticationResponse",
            MessageType::ErrorResponse(_) => "ErrorResponse",
            MessageType::PutRequest(_) => "PutRequest",
            MessageType::PutResponse(_) => "PutResponse",
            MessageType::GetRequest(_) => "GetRequest",
            MessageType::GetResponse(_) => "GetResponse",
            MessageType::PutAllRequest(_) => "PutAllRequest",
            MessageType::PutAllResponse(_) => "PutAllResponse",
            MessageType::GetAllRequest(_) => "GetAllRequest",
            MessageType::GetAllResponse(_) => "GetAllResponse",
            MessageType::RemoveRequest(_) => "RemoveRequest",
            MessageType::RemoveResponse(_) => "RemoveResponse",
            MessageType::GetSizeRequest(_) => "GetSizeRequest",
            MessageType::GetSizeResponse(_) => "GetSizeResponse",
            MessageType::ExecuteFunctionOnRegionRequest(_) => "ExecuteFunctionOnRegionRequest",
            MessageType::ExecuteFunctionOnRegionResponse(_) => "ExecuteFunctionOnRegionResponse",
            MessageType::ExecuteFunctionOnMemberRequest(_) => "ExecuteFunctionOnMemberRequest",
            MessageType::ExecuteFunctionOnMemberResponse(_) => "ExecuteFunctionOnMemberResponse",
            MessageType::ExecuteFunctionOnGroupRequest(_) => "ExecuteFunctionOnGroupRequest",
            MessageType::ExecuteFunctionOnGroupResponse(_) => "ExecuteFunctionOnGroupResponse",
            MessageType::PutIfAbsentRequest(_) => "PutIfAbsentRequest",
            MessageType::PutIfAbsentResponse(_) => "PutIfAbsentResponse",
            MessageType::KeySetRequest(_) => "KeySetRequest",
            MessageType::KeySetResponse(_) => "KeySetResponse",
            MessageType::ClearRequest(_) => "ClearRequest",
            MessageType::ClearResponse(_) => "ClearResponse",
            MessageType::GetRegionNamesRequest(_) => "GetRegionNamesRequest",
            MessageType::GetRegionNamesResponse(_) => "GetRegionNamesResponse",
            MessageType::DisconnectClientRequest(_) => "DisconnectClientRequest",
        }
    }
}

impl From<MessageType> for Message {
    fn from(message_type: MessageType) -> Self {
        Self {
            message_type: Some(message_type),
        }
    }
}
