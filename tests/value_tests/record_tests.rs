//! Record Tests
//!
//! Tests for structured values: records in, records out.

use serde::{Deserialize, Serialize};

use gridlink::protocol::encoded_value::Kind;
use gridlink::value::{decode_into, encode, Decoded};
use gridlink::{Error, Value};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct TestStruct {
    #[serde(rename = "A")]
    a: i32,
    #[serde(rename = "B")]
    b: String,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Nested {
    id: i64,
    ratio: f32,
    score: f64,
    flag: bool,
    tag: u8,
    inner: TestStruct,
}

// =============================================================================
// Record Conversion
// =============================================================================

#[test]
fn test_record_becomes_object() {
    let value = Value::record(&TestStruct {
        a: 7,
        b: "Hello World".to_string(),
    })
    .unwrap();

    let fields = value.as_object().unwrap();
    assert_eq!(fields["A"], Value::Int(7));
    assert_eq!(fields["B"], Value::String("Hello World".to_string()));
}

#[test]
fn test_large_integer_field_becomes_long() {
    #[derive(Serialize)]
    struct Wide {
        big: i64,
    }

    let value = Value::record(&Wide { big: 1 << 40 }).unwrap();
    assert_eq!(value.as_object().unwrap()["big"], Value::Long(1 << 40));
}

#[test]
fn test_non_record_rejected() {
    assert!(matches!(Value::record(&42), Err(Error::Encode(_))));
    assert!(matches!(Value::record(&vec![1, 2]), Err(Error::Encode(_))));
}

#[test]
fn test_unsupported_field_types_rejected() {
    #[derive(Serialize)]
    struct WithList {
        items: Vec<String>,
    }
    #[derive(Serialize)]
    struct WithOption {
        maybe: Option<i32>,
    }
    #[derive(Serialize)]
    struct WithHuge {
        huge: u64,
    }

    let list = WithList {
        items: vec!["a".to_string()],
    };
    assert!(matches!(Value::record(&list), Err(Error::Encode(_))));
    assert!(matches!(Value::record(&WithOption { maybe: None }), Err(Error::Encode(_))));
    assert!(matches!(Value::record(&WithHuge { huge: u64::MAX }), Err(Error::Encode(_))));
}

#[test]
fn test_empty_record() {
    #[derive(Serialize)]
    struct Empty {}

    let value = Value::record(&Empty {}).unwrap();
    assert!(value.as_object().unwrap().is_empty());
    assert!(matches!(encode(&value).unwrap().kind, Some(Kind::JsonObjectResult(_))));
}

#[test]
fn test_non_finite_float_in_object_fails_encode() {
    let mut fields = std::collections::BTreeMap::new();
    fields.insert("x".to_string(), Value::Double(f64::INFINITY));

    assert!(matches!(encode(&Value::Object(fields)), Err(Error::Encode(_))));
}

// =============================================================================
// Structured Round-trip
// =============================================================================

#[test]
fn test_structured_round_trip_into_destination() {
    let original = TestStruct {
        a: 7,
        b: "Hello World".to_string(),
    };
    let encoded = encode(&Value::record(&original).unwrap()).unwrap();

    let mut destination = TestStruct::default();
    let decoded = decode_into(encoded, &mut destination).unwrap().unwrap();

    match decoded {
        Decoded::Record(record) => assert_eq!(*record, original),
        Decoded::Value(other) => panic!("Expected record, got {:?}", other),
    }
    assert_eq!(destination, original);
}

#[test]
fn test_returned_record_is_the_destination() {
    let original = TestStruct {
        a: 1,
        b: "x".to_string(),
    };
    let encoded = encode(&Value::record(&original).unwrap()).unwrap();

    let mut destination = TestStruct::default();
    let destination_ptr: *const TestStruct = &destination;

    let record = decode_into(encoded, &mut destination)
        .unwrap()
        .and_then(Decoded::into_record)
        .unwrap();

    assert!(std::ptr::eq(record as *const TestStruct, destination_ptr));
    record.a = 2;
    assert_eq!(destination.a, 2);
}

#[test]
fn test_nested_record_round_trip() {
    let original = Nested {
        id: 1 << 40,
        ratio: 7.1,
        score: -0.25,
        flag: true,
        tag: 200,
        inner: TestStruct {
            a: -3,
            b: "inner".to_string(),
        },
    };
    let encoded = encode(&Value::record(&original).unwrap()).unwrap();

    let mut destination = Nested::default();
    decode_into(encoded, &mut destination).unwrap();

    assert_eq!(destination, original);
}

#[test]
fn test_record_with_byte_field_round_trip() {
    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Blob {
        name: String,
        data: Vec<u8>,
    }

    let original = Blob {
        name: "x".to_string(),
        data: vec![1, 2, 255],
    };
    let value = Value::record(&original).unwrap();

    let fields = value.as_object().unwrap();
    assert_eq!(fields["data"], Value::Bytes(vec![1, 2, 255]));

    let mut destination = Blob::default();
    decode_into(encode(&value).unwrap(), &mut destination).unwrap();

    assert_eq!(destination, original);
}

#[test]
fn test_integer_sequence_outside_byte_range_is_rejected() {
    #[derive(Serialize)]
    struct Wide {
        data: Vec<i32>,
    }

    let result = Value::record(&Wide { data: vec![1, 256] });
    assert!(matches!(result, Err(Error::Encode(_))));
}

#[test]
fn test_scalar_with_destination_returns_value() {
    let mut destination = TestStruct::default();
    let decoded = decode_into(encode(&Value::Int(3)).unwrap(), &mut destination)
        .unwrap()
        .unwrap();

    assert_eq!(decoded.into_value(), Some(Value::Int(3)));
    assert_eq!(destination, TestStruct::default());
}

#[test]
fn test_mismatched_destination_is_decode_error() {
    #[derive(Debug, Default, Deserialize)]
    struct Other {
        #[allow(dead_code)]
        missing: String,
    }

    let encoded = encode(
        &Value::record(&TestStruct {
            a: 1,
            b: "x".to_string(),
        })
        .unwrap(),
    )
    .unwrap();

    let mut destination = Other::default();
    assert!(matches!(
        decode_into(encoded, &mut destination),
        Err(Error::Decode(_))
    ));
}
