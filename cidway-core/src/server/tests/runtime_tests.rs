use crate::conf::parse_config;
use crate::resolve::{FetchError, Scheme, UpstreamFetch, UpstreamOutcome, UpstreamRequest};
use crate::route::RouteKind;
use crate::server::build_runtime_state_with_fetcher;
use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::path::Path;
use std::sync::Arc;

struct NoFetch;

#[async_trait]
impl UpstreamFetch for NoFetch {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamOutcome, FetchError> {
        Err(FetchError::Transport {
            url: request.url.to_string(),
            reason: "not available in tests".to_string(),
        })
    }
}

#[test]
fn runtime_state_wires_configured_gateways_into_resolvers() {
    // Arrange
    let cfg = parse_config(
        r#"
server {
  version = 1
}

listener {
  addr = "127.0.0.1:3000"
}

gateways {
  ipfs  = "https://ipfs.example.test"
  grove = "https://grove.example.test"
}
"#,
        Path::new("test.hcl"),
        |_| None,
    )
    .unwrap();

    // Act
    let state = build_runtime_state_with_fetcher(&cfg, Arc::new(NoFetch)).unwrap();

    // Assert
    assert_eq!(state.router.route_count(), 2);

    let ipfs = state.resolver(RouteKind::Ipfs);
    assert_eq!(ipfs.scheme(), Scheme::Ipfs);
    assert_eq!(ipfs.default_gateway().as_str(), "https://ipfs.example.test");

    let grove = state.resolver(RouteKind::Grove);
    assert_eq!(grove.scheme(), Scheme::Grove);
    assert_eq!(grove.default_gateway().as_str(), "https://grove.example.test");
}
