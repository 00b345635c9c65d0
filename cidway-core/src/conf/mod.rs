mod error;
mod loader;
#[cfg(test)]
mod tests;
pub mod types;
mod validation;

pub use error::ConfigError;
pub use loader::{
    CONFIG_ENV_GROVE_GATEWAY, CONFIG_ENV_IPFS_GATEWAY, load_config, load_config_with_env,
    parse_config,
};
pub use types::RuntimeConfig;
