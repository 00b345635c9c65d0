use crate::conf::types::{ConfigFile, RuntimeConfig};
use crate::conf::validation::{resolve_gateways, validate_listener, validate_server};
use crate::conf::ConfigError;
use std::fs;
use std::path::Path;

/// Overrides the default IPFS gateway origin.
pub const CONFIG_ENV_IPFS_GATEWAY: &str = "DEFAULT_GATEWAY";
/// Overrides the default Grove gateway origin.
pub const CONFIG_ENV_GROVE_GATEWAY: &str = "DEFAULT_GROVE_GATEWAY";

/// Loads and validates `path`, applying gateway overrides from the process environment.
pub fn load_config(path: &Path) -> Result<RuntimeConfig, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// Like [`load_config`], with an explicit environment lookup.
pub fn load_config_with_env<F>(path: &Path, env: F) -> Result<RuntimeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    //--------------------------------------------------------------------------
    // Hard fail: IO
    //--------------------------------------------------------------------------
    let src = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    parse_config(&src, path, env)
}

/// Parses and validates config source text. `path` is only used for error reporting.
pub fn parse_config<F>(src: &str, path: &Path, env: F) -> Result<RuntimeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    //--------------------------------------------------------------------------
    // Hard fail: parsing
    //--------------------------------------------------------------------------
    let file: ConfigFile = hcl::from_str(src).map_err(|e| ConfigError::parse(path, e))?;

    //--------------------------------------------------------------------------
    // Semantic validation
    //--------------------------------------------------------------------------
    validate_server(&file.server)?;
    validate_listener(&file.listener)?;

    let gateways = resolve_gateways(
        &file.gateways,
        env(CONFIG_ENV_IPFS_GATEWAY).as_deref(),
        env(CONFIG_ENV_GROVE_GATEWAY).as_deref(),
    )?;

    Ok(RuntimeConfig {
        server: file.server,
        listener: file.listener,
        gateways,
        upstream: file.upstream,
    })
}
