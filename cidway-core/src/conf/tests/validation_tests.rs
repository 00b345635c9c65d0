use crate::conf::{ConfigError, parse_config};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse(src: &str) -> Result<crate::conf::RuntimeConfig, ConfigError> {
    parse_config(src, Path::new("test.hcl"), |_| None)
}

fn config_with(server: &str, listener: &str, extra: &str) -> String {
    format!("server {{\n{server}\n}}\n\nlistener {{\n{listener}\n}}\n\n{extra}\n")
}

#[test]
fn unsupported_version_is_rejected() {
    // Act
    let err = parse(&config_with("version = 2", r#"addr = "127.0.0.1:3000""#, "")).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::InvalidVersion { version: 2 }), "{err:?}");
}

#[test]
fn zero_threads_is_rejected() {
    // Act
    let err = parse(&config_with(
        "version = 1\nthreads = 0",
        r#"addr = "127.0.0.1:3000""#,
        "",
    ))
    .unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::InvalidThreads { threads: 0 }), "{err:?}");
}

#[test]
fn invalid_listener_address_is_rejected() {
    // Act
    let err = parse(&config_with("version = 1", r#"addr = "localhost""#, "")).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::InvalidListenAddr { .. }), "{err:?}");
}

#[test]
fn missing_tls_files_are_rejected() {
    // Act
    let err = parse(&config_with(
        "version = 1",
        "addr = \"127.0.0.1:3443\"\ntls {\n  cert = \"/nonexistent/cert.pem\"\n  key = \"/nonexistent/key.pem\"\n}",
        "",
    ))
    .unwrap_err();

    // Assert
    assert!(
        matches!(err, ConfigError::MissingTlsFile { kind: "cert", .. }),
        "{err:?}"
    );
}

#[test]
fn existing_tls_files_are_accepted() {
    // Arrange
    let dir = tempdir().unwrap();
    let cert = dir.path().join("cert.pem");
    let key = dir.path().join("key.pem");
    fs::write(&cert, "cert").unwrap();
    fs::write(&key, "key").unwrap();

    // Act
    let cfg = parse(&config_with(
        "version = 1",
        &format!(
            "addr = \"127.0.0.1:3443\"\ntls {{\n  cert = \"{}\"\n  key = \"{}\"\n}}",
            cert.display(),
            key.display()
        ),
        "",
    ))
    .unwrap();

    // Assert
    assert!(cfg.listener.tls.is_some());
}

#[test]
fn gateway_with_unsupported_scheme_is_rejected() {
    // Act
    let err = parse(&config_with(
        "version = 1",
        r#"addr = "127.0.0.1:3000""#,
        "gateways {\n  ipfs = \"ftp://ipfs.example.test\"\n}",
    ))
    .unwrap_err();

    // Assert
    assert!(
        matches!(err, ConfigError::InvalidGateway { name: "ipfs", .. }),
        "{err:?}"
    );
}

#[test]
fn gateway_with_path_is_rejected() {
    // Act
    let err = parse(&config_with(
        "version = 1",
        r#"addr = "127.0.0.1:3000""#,
        "gateways {\n  grove = \"https://grove.example.test/api\"\n}",
    ))
    .unwrap_err();

    // Assert
    assert!(
        matches!(err, ConfigError::InvalidGateway { name: "grove", .. }),
        "{err:?}"
    );
}
