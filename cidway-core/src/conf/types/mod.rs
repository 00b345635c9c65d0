mod gateways;
mod listener;
mod runtime;
mod server;
mod upstream;

pub use gateways::{DEFAULT_GROVE_GATEWAY, DEFAULT_IPFS_GATEWAY, GatewaysConfig, GatewaysSpec};
pub use listener::{ListenerConfig, TlsConfig};
pub use runtime::{ConfigFile, RuntimeConfig};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
