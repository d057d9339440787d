//! Tests for AppError type

use super::*;

#[test]
fn test_config_error_display() {
    let error = AppError::Config {
        path: "/tmp/config.toml".to_string(),
        message: "expected `=`".to_string(),
    };
    let msg = error.to_string();
    assert!(msg.contains("Invalid config /tmp/config.toml"));
    assert!(msg.contains("expected `=`"));
}

#[test]
fn test_schema_error_display() {
    let error = AppError::Schema {
        path: "schema.txt".to_string(),
        message: "not found".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Schema file schema.txt could not be read: not found"
    );
}

#[test]
fn test_ai_error_is_transparent() {
    let error = AppError::from(AiError::NotConfigured {
        provider: "Groq".to_string(),
        message: "missing api_key".to_string(),
    });
    assert_eq!(error.to_string(), "[Groq] AI not configured: missing api_key");
}

#[test]
fn test_io_error_from_std_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
    let err = AppError::from(io_err);
    assert!(matches!(err, AppError::Io(_)));
    assert!(err.to_string().contains("port taken"));
}

#[test]
fn test_error_debug() {
    let error = AppError::Relay("bind failed".to_string());
    let debug_str = format!("{:?}", error);
    assert!(debug_str.contains("Relay"));
}
