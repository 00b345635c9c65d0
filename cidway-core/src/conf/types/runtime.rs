use crate::conf::types::{
    GatewaysConfig, GatewaysSpec, ListenerConfig, ServerConfig, UpstreamConfig,
};
use serde::Deserialize;

/// Top-level shape of `cidway.hcl`.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub server: ServerConfig,
    pub listener: ListenerConfig,

    #[serde(default)]
    pub gateways: GatewaysSpec,

    #[serde(default)]
    pub upstream: UpstreamConfig,
}

/// Fully validated configuration the server is built from.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub server: ServerConfig,
    pub listener: ListenerConfig,
    pub gateways: GatewaysConfig,
    pub upstream: UpstreamConfig,
}
