//! Structured records
//!
//! Records travel as JSON documents. On the way in, any `Serialize` type
//! with named fields becomes a `Value::Object`; on the way out, the document
//! is deserialized straight into the caller's record type.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

use super::Value;
use crate::error::{Error, Result};

impl Value {
    /// Convert a record with named fields into an `Object`
    ///
    /// Field values must themselves be supported types. Byte sequences
    /// become `Bytes`; other sequences, maps that are not records, `None`,
    /// and unsigned integers beyond `i64` are rejected.
    pub fn record<T: Serialize + ?Sized>(record: &T) -> Result<Value> {
        let json = serde_json::to_value(record)
            .map_err(|e| Error::Encode(format!("Failed to serialize record: {}", e)))?;

        match json {
            Json::Object(fields) => Ok(Value::Object(object_from_json(fields)?)),
            other => Err(Error::Encode(format!(
                "Unsupported type: expected a record with named fields, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// Render an object's fields as a JSON document
pub(crate) fn object_to_json(fields: &BTreeMap<String, Value>) -> Result<String> {
    let document = Json::Object(fields_to_json(fields)?);
    serde_json::to_string(&document)
        .map_err(|e| Error::Encode(format!("Failed to serialize object: {}", e)))
}

/// Deserialize a JSON document into a record type
pub(crate) fn record_from_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|e| Error::Decode(format!("Structured value does not fit destination: {}", e)))
}

fn fields_to_json(fields: &BTreeMap<String, Value>) -> Result<Map<String, Json>> {
    fields
        .iter()
        .map(|(name, value)| Ok((name.clone(), value_to_json(name, value)?)))
        .collect()
}

fn value_to_json(name: &str, value: &Value) -> Result<Json> {
    let json = match value {
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Byte(v) => Json::from(*v),
        Value::Bool(v) => Json::Bool(*v),
        Value::Double(v) => Json::Number(finite(name, *v)?),
        Value::Float(v) => Json::Number(finite(name, f64::from(*v))?),
        Value::Bytes(v) => Json::Array(v.iter().map(|b| Json::from(*b)).collect()),
        Value::String(v) => Json::String(v.clone()),
        Value::Object(fields) => Json::Object(fields_to_json(fields)?),
    };
    Ok(json)
}

fn finite(name: &str, v: f64) -> Result<Number> {
    Number::from_f64(v).ok_or_else(|| {
        Error::Encode(format!("Field '{}' holds a non-finite float: {}", name, v))
    })
}

fn object_from_json(fields: Map<String, Json>) -> Result<BTreeMap<String, Value>> {
    fields
        .into_iter()
        .map(|(name, json)| {
            let value = value_from_json(&name, json)?;
            Ok((name, value))
        })
        .collect()
}

fn value_from_json(name: &str, json: Json) -> Result<Value> {
    match json {
        Json::Bool(v) => Ok(Value::Bool(v)),
        Json::String(v) => Ok(Value::String(v)),
        Json::Number(n) => number_from_json(name, &n),
        Json::Object(fields) => Ok(Value::Object(object_from_json(fields)?)),
        Json::Array(items) => bytes_from_json(name, &items).map(Value::Bytes),
        other => Err(Error::Encode(format!(
            "Unsupported type: field '{}' is {}",
            name,
            json_kind(&other)
        ))),
    }
}

/// Byte sequences serialize as arrays of small integers
fn bytes_from_json(name: &str, items: &[Json]) -> Result<Vec<u8>> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .ok_or_else(|| {
                    Error::Encode(format!(
                        "Unsupported type: field '{}' is a sequence of {}",
                        name,
                        json_kind(item)
                    ))
                })
        })
        .collect()
}

fn number_from_json(name: &str, n: &Number) -> Result<Value> {
    if let Some(v) = n.as_i64() {
        return Ok(i32::try_from(v).map(Value::Int).unwrap_or(Value::Long(v)));
    }
    if n.is_u64() {
        return Err(Error::Encode(format!(
            "Unsupported type: field '{}' exceeds the long integer range",
            name
        )));
    }
    n.as_f64()
        .map(Value::Double)
        .ok_or_else(|| Error::Encode(format!("Unsupported number in field '{}'", name)))
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "a sequence",
        Json::Object(_) => "an object",
    }
}
