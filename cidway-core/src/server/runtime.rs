use crate::conf::RuntimeConfig;
use crate::resolve::{HttpFetcher, Resolver, UpstreamFetch};
use crate::route::{RouteKind, Router};
use anyhow::Result;
use std::sync::Arc;

/// Everything a request needs, built once from config and shared by all workers.
pub struct RuntimeState {
    pub router: Router,
    pub grove: Resolver,
    pub ipfs: Resolver,
    pub fetcher: Arc<dyn UpstreamFetch>,
}

impl RuntimeState {
    pub fn resolver(&self, kind: RouteKind) -> &Resolver {
        match kind {
            RouteKind::Grove => &self.grove,
            RouteKind::Ipfs => &self.ipfs,
        }
    }
}

pub fn build_runtime_state(cfg: &RuntimeConfig) -> Result<RuntimeState> {
    let fetcher = HttpFetcher::new(cfg.upstream.connect_timeout(), cfg.upstream.timeout())?;
    build_runtime_state_with_fetcher(cfg, Arc::new(fetcher))
}

/// Builds runtime state around an explicit upstream transport.
pub fn build_runtime_state_with_fetcher(
    cfg: &RuntimeConfig,
    fetcher: Arc<dyn UpstreamFetch>,
) -> Result<RuntimeState> {
    let router = Router::with_defaults()?;

    let state = RuntimeState {
        router,
        grove: Resolver::grove(cfg.gateways.grove.clone()),
        ipfs: Resolver::ipfs(cfg.gateways.ipfs.clone()),
        fetcher,
    };

    tracing::debug!(
        routes = state.router.route_count(),
        ipfs_gateway = %state.ipfs.default_gateway(),
        grove_gateway = %state.grove.default_gateway(),
        "runtime state built"
    );

    Ok(state)
}
