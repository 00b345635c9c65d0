use crate::resolve::GatewayOrigin;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IPFS_GATEWAY: &str = "https://cloudflare-ipfs.com";
pub const DEFAULT_GROVE_GATEWAY: &str = "https://api.grove.storage";

/// `gateways` block as written in the file. Both entries are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GatewaysSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grove: Option<String>,
}

/// Validated default gateway origins, injected into the resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaysConfig {
    pub ipfs: GatewayOrigin,
    pub grove: GatewayOrigin,
}
