//! Value codec
//!
//! Converts between `Value` and the wire's tagged `EncodedValue`.

use serde::de::DeserializeOwned;

use super::{record, Value};
use crate::error::{Error, Result};
use crate::protocol::encoded_value::Kind;
use crate::protocol::EncodedValue;

/// Result of decoding with a destination record supplied
///
/// A structured value is written into the destination and handed back as
/// `Record`, borrowing that same destination. Every other tag yields
/// `Value`.
#[derive(Debug)]
pub enum Decoded<'a, T> {
    Value(Value),
    Record(&'a mut T),
}

impl<'a, T> Decoded<'a, T> {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Decoded::Value(value) => Some(value),
            Decoded::Record(_) => None,
        }
    }

    pub fn into_record(self) -> Option<&'a mut T> {
        match self {
            Decoded::Record(record) => Some(record),
            Decoded::Value(_) => None,
        }
    }
}

/// An owned decoded value, for calls that return many of them
///
/// A structured value is deserialized into a fresh `T`.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Value(Value),
    Record(T),
}

impl<T> Fetched<T> {
    pub fn into_value(self) -> Option<Value> {
        match self {
            Fetched::Value(value) => Some(value),
            Fetched::Record(_) => None,
        }
    }

    pub fn into_record(self) -> Option<T> {
        match self {
            Fetched::Record(record) => Some(record),
            Fetched::Value(_) => None,
        }
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a value under its wire tag
pub fn encode(value: &Value) -> Result<EncodedValue> {
    let kind = match value {
        Value::Int(v) => Kind::IntResult(*v),
        Value::Long(v) => Kind::LongResult(*v),
        Value::Byte(v) => Kind::ByteResult(i32::from(*v)),
        Value::Bool(v) => Kind::BooleanResult(*v),
        Value::Double(v) => Kind::DoubleResult(*v),
        Value::Float(v) => Kind::FloatResult(*v),
        Value::Bytes(v) => Kind::BinaryResult(v.clone()),
        Value::String(v) => Kind::StringResult(v.clone()),
        Value::Object(fields) => Kind::JsonObjectResult(record::object_to_json(fields)?),
    };

    Ok(EncodedValue { kind: Some(kind) })
}

/// Encode a sequence of values, failing on the first one that cannot be
/// represented
pub fn encode_all<'a, I>(values: I) -> Result<Vec<EncodedValue>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().map(encode).collect()
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a wire value
///
/// Returns `None` for the null marker. A structured value cannot be decoded
/// without a destination; use [`decode_into`].
pub fn decode(encoded: EncodedValue) -> Result<Option<Value>> {
    let kind = encoded.kind.ok_or_else(|| {
        Error::Decode("Encoded value carries no recognized type tag".to_string())
    })?;

    let value = match kind {
        Kind::IntResult(v) | Kind::ShortResult(v) => Value::Int(v),
        Kind::LongResult(v) => Value::Long(v),
        Kind::ByteResult(v) => Value::Byte(u8::try_from(v).map_err(|_| {
            Error::Decode(format!("Byte value out of range: {}", v))
        })?),
        Kind::BooleanResult(v) => Value::Bool(v),
        Kind::DoubleResult(v) => Value::Double(v),
        Kind::FloatResult(v) => Value::Float(v),
        Kind::BinaryResult(v) => Value::Bytes(v),
        Kind::StringResult(v) => Value::String(v),
        Kind::NullResult(_) => return Ok(None),
        Kind::JsonObjectResult(_) => {
            return Err(Error::Decode(
                "Structured value requires a destination record".to_string(),
            ))
        }
    };

    Ok(Some(value))
}

/// Decode a wire value, filling `destination` if it is a structured value
pub fn decode_into<'a, T>(
    encoded: EncodedValue,
    destination: &'a mut T,
) -> Result<Option<Decoded<'a, T>>>
where
    T: DeserializeOwned,
{
    match encoded.kind {
        Some(Kind::JsonObjectResult(json)) => {
            *destination = record::record_from_json(&json)?;
            Ok(Some(Decoded::Record(destination)))
        }
        kind => Ok(decode(EncodedValue { kind })?.map(Decoded::Value)),
    }
}

/// Decode a wire value, deserializing a structured value into a new `T`
pub fn decode_owned<T>(encoded: EncodedValue) -> Result<Option<Fetched<T>>>
where
    T: DeserializeOwned,
{
    match encoded.kind {
        Some(Kind::JsonObjectResult(json)) => {
            Ok(Some(Fetched::Record(record::record_from_json(&json)?)))
        }
        kind => Ok(decode(EncodedValue { kind })?.map(Fetched::Value)),
    }
}
