//! Value Codec Tests
//!
//! Tests for encoding native values under wire tags and decoding them back.

use std::collections::BTreeMap;

use gridlink::protocol::encoded_value::Kind;
use gridlink::protocol::{EncodedValue, NullValue};
use gridlink::value::{decode, encode};
use gridlink::{Error, Value};

fn round_trip(value: impl Into<Value>) -> Value {
    decode(encode(&value.into()).unwrap()).unwrap().unwrap()
}

fn kind_of(value: impl Into<Value>) -> Kind {
    encode(&value.into()).unwrap().kind.unwrap()
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_round_trip_exact_types() {
    assert_eq!(round_trip(3i32), Value::Int(3));
    assert_eq!(round_trip(i32::MIN), Value::Int(i32::MIN));
    assert_eq!(round_trip(4i64), Value::Long(4));
    assert_eq!(round_trip(i64::MAX), Value::Long(i64::MAX));
    assert_eq!(round_trip(5u8), Value::Byte(5));
    assert_eq!(round_trip(255u8), Value::Byte(255));
    assert_eq!(round_trip(true), Value::Bool(true));
    assert_eq!(round_trip(6.5f64), Value::Double(6.5));
    assert_eq!(round_trip(7.25f32), Value::Float(7.25));
    assert_eq!(round_trip(vec![8u8, 0, 255]), Value::Bytes(vec![8, 0, 255]));
    assert_eq!(round_trip("9"), Value::String("9".to_string()));
    assert_eq!(round_trip(String::new()), Value::String(String::new()));
}

#[test]
fn test_narrow_integers_widen_to_int() {
    assert_eq!(round_trip(2i16), Value::Int(2));
    assert_eq!(round_trip(-2i8), Value::Int(-2));
    assert_eq!(round_trip(i16::MIN), Value::Int(i32::from(i16::MIN)));

    // Default integer literal
    assert_eq!(round_trip(1), Value::Int(1));
}

#[test]
fn test_empty_bytes() {
    assert_eq!(round_trip(Vec::<u8>::new()), Value::Bytes(Vec::new()));
}

// =============================================================================
// Tag Tests
// =============================================================================

#[test]
fn test_byte_tag_differs_from_int_tag() {
    assert_eq!(kind_of(5u8), Kind::ByteResult(5));
    assert_eq!(kind_of(5i32), Kind::IntResult(5));
    assert_ne!(kind_of(5u8), kind_of(5i32));
}

#[test]
fn test_each_type_has_its_own_tag() {
    assert!(matches!(kind_of(1i16), Kind::IntResult(1)));
    assert!(matches!(kind_of(1i64), Kind::LongResult(1)));
    assert!(matches!(kind_of(false), Kind::BooleanResult(false)));
    assert!(matches!(kind_of(1.0f64), Kind::DoubleResult(_)));
    assert!(matches!(kind_of(1.0f32), Kind::FloatResult(_)));
    assert!(matches!(kind_of(vec![1u8]), Kind::BinaryResult(_)));
    assert!(matches!(kind_of("x"), Kind::StringResult(_)));

    let mut fields = BTreeMap::new();
    fields.insert("a".to_string(), Value::Int(1));
    assert!(matches!(kind_of(fields), Kind::JsonObjectResult(_)));
}

// =============================================================================
// Decode Edge Cases
// =============================================================================

#[test]
fn test_legacy_short_tag_decodes_as_int() {
    let encoded = EncodedValue {
        kind: Some(Kind::ShortResult(12)),
    };
    assert_eq!(decode(encoded).unwrap(), Some(Value::Int(12)));
}

#[test]
fn test_null_decodes_to_none() {
    let encoded = EncodedValue {
        kind: Some(Kind::NullResult(NullValue {})),
    };
    assert_eq!(decode(encoded).unwrap(), None);
}

#[test]
fn test_missing_tag_is_decode_error() {
    let result = decode(EncodedValue { kind: None });
    assert!(matches!(result, Err(Error::Decode(_))));
}

#[test]
fn test_unknown_tag_from_wire_is_decode_error() {
    // Field 15 is not part of the value schema; prost leaves the oneof empty
    let bytes = vec![0x78, 0x01];
    let encoded = <EncodedValue as prost::Message>::decode(bytes.as_slice()).unwrap();

    assert!(matches!(decode(encoded), Err(Error::Decode(_))));
}

#[test]
fn test_byte_out_of_range_is_decode_error() {
    let encoded = EncodedValue {
        kind: Some(Kind::ByteResult(300)),
    };
    assert!(matches!(decode(encoded), Err(Error::Decode(_))));
}

#[test]
fn test_structured_without_destination_is_decode_error() {
    let encoded = EncodedValue {
        kind: Some(Kind::JsonObjectResult("{\"A\":1}".to_string())),
    };
    assert!(matches!(decode(encoded), Err(Error::Decode(_))));
}

// =============================================================================
// Value Semantics
// =============================================================================

#[test]
fn test_values_usable_as_map_keys() {
    use std::collections::HashMap;

    let mut map = HashMap::new();
    map.insert(Value::Int(77), "int");
    map.insert(Value::Long(77), "long");
    map.insert(Value::Double(0.5), "double");

    assert_eq!(map[&Value::Int(77)], "int");
    assert_eq!(map[&Value::Long(77)], "long");
    assert_eq!(map[&Value::Double(0.5)], "double");
    assert!(!map.contains_key(&Value::Byte(77)));
}

#[test]
fn test_nan_equals_itself_by_bits() {
    assert_eq!(Value::Double(f64::NAN), Value::Double(f64::NAN));
    assert_ne!(Value::Double(0.0), Value::Double(-0.0));
}
