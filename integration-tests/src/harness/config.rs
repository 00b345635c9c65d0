use cidway_core::conf::RuntimeConfig;
use cidway_core::resolve::GatewayOrigin;

/// Points the listener at `listen_port` and both default gateways at the given origins.
pub fn patch_runtime(
    mut cfg: RuntimeConfig,
    listen_port: u16,
    ipfs_gateway: &str,
    grove_gateway: &str,
) -> RuntimeConfig {
    cfg.listener.addr = format!("127.0.0.1:{listen_port}");
    cfg.gateways.ipfs = GatewayOrigin::parse_exact(ipfs_gateway).expect("invalid ipfs gateway");
    cfg.gateways.grove =
        GatewayOrigin::parse_exact(grove_gateway).expect("invalid grove gateway");
    cfg
}
