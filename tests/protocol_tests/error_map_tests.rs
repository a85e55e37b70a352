//! Error Mapper Tests

use gridlink::protocol::{
    map_error, map_error_response, map_keyed_errors, EncodedValue, ErrorInfo, ErrorResponse,
    KeyedError,
};
use gridlink::value::codec;
use gridlink::{Error, RemoteError, Value};

fn keyed(key: Option<EncodedValue>, code: i32, message: &str) -> KeyedError {
    KeyedError {
        key,
        error: Some(ErrorInfo {
            error_code: code,
            message: message.to_string(),
        }),
    }
}

#[test]
fn test_display_form() {
    let error = map_error(&ErrorInfo {
        error_code: 1,
        message: "error from fake".to_string(),
    });

    assert_eq!(error, RemoteError::new(1, "error from fake"));
    assert_eq!(error.to_string(), "error from fake (1)");
    assert_eq!(Error::Remote(error).to_string(), "error from fake (1)");
}

#[test]
fn test_missing_error_payload() {
    let error = map_error_response(ErrorResponse { error: None });
    assert_eq!(error.to_string(), "unknown error (0)");
}

#[test]
fn test_keyed_errors_decode_keys() {
    let failures = vec![
        keyed(Some(codec::encode(&Value::Int(77)).unwrap()), 1, "test error"),
        keyed(Some(codec::encode(&Value::from("B")).unwrap()), 2, "other"),
    ];

    let mapped = map_keyed_errors(failures).unwrap();

    assert_eq!(mapped.len(), 2);
    assert_eq!(mapped[&Value::Int(77)].to_string(), "test error (1)");
    assert_eq!(mapped[&Value::from("B")].to_string(), "other (2)");
}

#[test]
fn test_keyed_errors_empty() {
    assert!(map_keyed_errors(Vec::new()).unwrap().is_empty());
}

#[test]
fn test_undecodable_key_fails_whole_batch() {
    let failures = vec![
        keyed(Some(codec::encode(&Value::Int(1)).unwrap()), 1, "fine"),
        keyed(Some(EncodedValue { kind: None }), 1, "lost"),
    ];

    assert!(matches!(map_keyed_errors(failures), Err(Error::Decode(_))));
}

#[test]
fn test_missing_key_fails_whole_batch() {
    let failures = vec![keyed(None, 1, "lost")];
    assert!(matches!(map_keyed_errors(failures), Err(Error::Decode(_))));
}
