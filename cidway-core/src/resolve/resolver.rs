use crate::ctx::RequestContext;
use crate::resolve::{
    FetchPlan, GatewayOrigin, ProxiedResponse, ResolveError, ResourceIdentifier, Scheme,
    UpstreamFetch, candidates, fetch_with_fallback, forward_request_headers, normalize_cid,
    normalize_grove, resolve_filename, select_gateway,
};
use http::Method;
use tracing::debug;

/// Resolves requests for one identifier scheme against its default gateway.
///
/// The default gateway is injected at construction; a request may still override it through the
/// `gateway` query parameter.
#[derive(Debug, Clone)]
pub struct Resolver {
    scheme: Scheme,
    default_gateway: GatewayOrigin,
}

impl Resolver {
    pub fn new(scheme: Scheme, default_gateway: GatewayOrigin) -> Self {
        Self {
            scheme,
            default_gateway,
        }
    }

    pub fn ipfs(default_gateway: GatewayOrigin) -> Self {
        Self::new(Scheme::Ipfs, default_gateway)
    }

    pub fn grove(default_gateway: GatewayOrigin) -> Self {
        Self::new(Scheme::Grove, default_gateway)
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn default_gateway(&self) -> &GatewayOrigin {
        &self.default_gateway
    }

    /// Validates the request and works out what to fetch, without touching the network.
    pub fn plan(&self, request: &RequestContext) -> Result<FetchPlan, ResolveError> {
        let (id, name_segments) = match self.scheme {
            Scheme::Ipfs => {
                let segments = ipfs_segments(request);
                (normalize_cid(&segments)?, segments)
            }
            Scheme::Grove => (grove_identifier(request)?, request.segments().to_vec()),
        };

        Ok(FetchPlan {
            scheme: self.scheme,
            gateway: select_gateway(request.query("gateway"), &self.default_gateway),
            candidates: candidates(self.scheme, &id),
            method: request.method().clone(),
            request_headers: forward_request_headers(request.headers()),
            filename: resolve_filename(request.query("filename"), &name_segments),
        })
    }

    /// Runs the whole resolution and always produces a response.
    pub async fn resolve(
        &self,
        request: &RequestContext,
        fetcher: &dyn UpstreamFetch,
    ) -> ProxiedResponse {
        let result = match self.plan(request) {
            Ok(plan) => fetch_with_fallback(fetcher, plan).await,
            Err(err) => {
                debug!(scheme = %self.scheme, error = %err, "rejected resource request");
                Err(err)
            }
        };

        let response = result.unwrap_or_else(ProxiedResponse::from_error);

        if *request.method() == Method::HEAD {
            response.without_body()
        } else {
            response
        }
    }
}

/// Path segments, or the `cid` query value split on `/` when the path is empty.
fn ipfs_segments(request: &RequestContext) -> Vec<String> {
    if !request.segments().is_empty() {
        return request.segments().to_vec();
    }

    request
        .query("cid")
        .map(|cid| {
            cid.split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// An explicit `uri` query (even an empty one) takes precedence over the path.
fn grove_identifier(request: &RequestContext) -> Result<ResourceIdentifier, ResolveError> {
    let raw = match request.query("uri") {
        Some(uri) => uri.to_string(),
        None => request.segments().join("/"),
    };

    if raw.is_empty() {
        return Err(ResolveError::MissingIdentifier(Scheme::Grove));
    }

    normalize_grove(&raw)
}
