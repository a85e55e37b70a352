//! Value Module
//!
//! Native values exchanged with the server and their wire codec.
//!
//! ## Supported Types
//! | Native                 | `Value`   | Wire tag          |
//! |------------------------|-----------|-------------------|
//! | `i8`, `i16`, `i32`     | `Int`     | standard integer  |
//! | `i64`                  | `Long`    | long integer      |
//! | `u8`                   | `Byte`    | byte              |
//! | `bool`                 | `Bool`    | boolean           |
//! | `f64`                  | `Double`  | double            |
//! | `f32`                  | `Float`   | float             |
//! | `Vec<u8>`, `&[u8]`     | `Bytes`   | binary            |
//! | `String`, `&str`       | `String`  | string            |
//! | records (`Serialize`)  | `Object`  | JSON object       |
//!
//! Integers narrower than 32 bits are widened to `Int` and come back as
//! `Int`. The original width is not recorded on the wire.

pub mod codec;
mod record;

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

pub use codec::{decode, decode_into, decode_owned, encode, Decoded, Fetched};

/// A native value that can travel over the wire
///
/// Equality and hashing compare floats by bit pattern, so values can be
/// used as map keys.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i32),
    Long(i64),
    Byte(u8),
    Bool(bool),
    Double(f64),
    Float(f32),
    Bytes(Vec<u8>),
    String(String),
    /// Named fields of a record, each one itself a `Value`
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Short type name, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Byte(_) => "byte",
            Value::Bool(_) => "bool",
            Value::Double(_) => "double",
            Value::Float(_) => "float",
            Value::Bytes(_) => "bytes",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Byte(a), Value::Byte(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int(v) => v.hash(state),
            Value::Long(v) => v.hash(state),
            Value::Byte(v) => v.hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Bytes(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Object(fields) => fields.hash(state),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(i32::from(v))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(i32::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Byte(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Value::Object(fields)
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Self {
        v.clone()
    }
}
