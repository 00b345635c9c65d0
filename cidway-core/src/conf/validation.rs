use crate::conf::ConfigError;
use crate::conf::types::{
    DEFAULT_GROVE_GATEWAY, DEFAULT_IPFS_GATEWAY, GatewaysConfig, GatewaysSpec, ListenerConfig,
    ServerConfig,
};
use crate::resolve::GatewayOrigin;
use std::net::SocketAddr;
use std::path::Path;

const SUPPORTED_VERSION: u32 = 1;

pub(crate) fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.version != SUPPORTED_VERSION {
        return Err(ConfigError::InvalidVersion {
            version: server.version,
        });
    }

    if let Some(threads) = server.threads {
        if threads == 0 {
            return Err(ConfigError::InvalidThreads { threads });
        }
    }

    Ok(())
}

pub(crate) fn validate_listener(listener: &ListenerConfig) -> Result<(), ConfigError> {
    listener
        .addr
        .parse::<SocketAddr>()
        .map_err(|source| ConfigError::InvalidListenAddr {
            addr: listener.addr.clone(),
            source,
        })?;

    if let Some(tls) = &listener.tls {
        for (kind, file) in [("cert", &tls.cert), ("key", &tls.key)] {
            let path = Path::new(file);
            if !path.is_file() {
                return Err(ConfigError::MissingTlsFile {
                    kind,
                    path: path.to_path_buf(),
                });
            }
        }
    }

    Ok(())
}

/// Environment override, then the file value, then the built-in default.
/// Empty values at any level are skipped.
pub(crate) fn resolve_gateways(
    spec: &GatewaysSpec,
    ipfs_env: Option<&str>,
    grove_env: Option<&str>,
) -> Result<GatewaysConfig, ConfigError> {
    Ok(GatewaysConfig {
        ipfs: resolve_gateway("ipfs", ipfs_env, spec.ipfs.as_deref(), DEFAULT_IPFS_GATEWAY)?,
        grove: resolve_gateway(
            "grove",
            grove_env,
            spec.grove.as_deref(),
            DEFAULT_GROVE_GATEWAY,
        )?,
    })
}

fn resolve_gateway(
    name: &'static str,
    env: Option<&str>,
    configured: Option<&str>,
    default: &str,
) -> Result<GatewayOrigin, ConfigError> {
    let value = [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(default);

    GatewayOrigin::parse_exact(value).map_err(|source| ConfigError::InvalidGateway {
        name,
        value: value.to_string(),
        source,
    })
}
