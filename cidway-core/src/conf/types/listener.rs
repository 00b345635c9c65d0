use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenerConfig {
    /// Socket address to bind, e.g. `0.0.0.0:3000`.
    pub addr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
}

/// Paths are validated during config loading.
/// Runtime code assumes these files exist.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TlsConfig {
    pub cert: String,
    pub key: String,
}
