//! Config Tests
//!
//! Tests for configuration defaults, the builder, validation and credentials.

use gridlink::protocol::ProtocolVersion;
use gridlink::{Config, Credentials, Error};

#[test]
fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.servers, vec!["127.0.0.1:40404"]);
    assert_eq!(config.protocol_version, ProtocolVersion::CURRENT);
    assert!(config.credentials.is_none());
    assert_eq!(config.max_sessions, 4);
    assert_eq!(config.read_timeout_ms, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_first_server_replaces_default() {
    let config = Config::builder()
        .server("10.0.0.1:40404")
        .server("10.0.0.2:40404")
        .build();

    assert_eq!(config.servers, vec!["10.0.0.1:40404", "10.0.0.2:40404"]);
}

#[test]
fn test_builder_sets_every_field() {
    let config = Config::builder()
        .protocol_version(ProtocolVersion::new(1, 3))
        .credentials(Credentials::username_password("cluster", "cluster"))
        .max_sessions(8)
        .read_timeout_ms(250)
        .write_timeout_ms(500)
        .nodelay(false)
        .build();

    assert_eq!(config.protocol_version.to_string(), "1.3");
    assert_eq!(config.credentials.unwrap().len(), 2);
    assert_eq!(config.max_sessions, 8);
    assert_eq!(config.read_timeout_ms, 250);
    assert_eq!(config.write_timeout_ms, 500);
    assert!(!config.nodelay);
}

#[test]
fn test_validate_rejects_zero_sessions() {
    let config = Config::builder().max_sessions(0).build();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_validate_rejects_no_servers() {
    let mut config = Config::default();
    config.servers.clear();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_credentials_lookup() {
    let credentials = Credentials::username_password("user", "secret").with("token", "abc");

    assert_eq!(credentials.get(Credentials::USERNAME_KEY), Some("user"));
    assert_eq!(credentials.get(Credentials::PASSWORD_KEY), Some("secret"));
    assert_eq!(credentials.get("token"), Some("abc"));
    assert_eq!(credentials.get("missing"), None);
    assert!(Credentials::new().is_empty());
}

#[test]
fn test_credentials_debug_hides_values() {
    let credentials: Credentials = vec![("security-password", "hunter2")].into_iter().collect();
    let rendered = format!("{:?}", credentials);

    assert!(rendered.contains("security-password"));
    assert!(!rendered.contains("hunter2"));
}
