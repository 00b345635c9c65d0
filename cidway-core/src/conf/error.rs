use crate::resolve::InvalidGateway;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Parsing
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    //-------------------------------------------------------------------------
    // Server
    //-------------------------------------------------------------------------
    #[error("invalid version '{version}'")]
    InvalidVersion { version: u32 },

    #[error("invalid thread count '{threads}': must be at least 1")]
    InvalidThreads { threads: usize },

    //-------------------------------------------------------------------------
    // Listener
    //-------------------------------------------------------------------------
    #[error("invalid listener address '{addr}': {source}")]
    InvalidListenAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("tls {kind} file does not exist: {path}")]
    MissingTlsFile { kind: &'static str, path: PathBuf },

    //-------------------------------------------------------------------------
    // Gateways
    //-------------------------------------------------------------------------
    #[error("invalid {name} gateway '{value}': {source}")]
    InvalidGateway {
        name: &'static str,
        value: String,
        #[source]
        source: InvalidGateway,
    },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
