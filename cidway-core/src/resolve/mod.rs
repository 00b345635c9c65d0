//! Resource resolution: turns a [`RequestContext`](crate::ctx::RequestContext) into an upstream
//! fetch plan, drives it against a gateway, and produces the client response.
//!
//! ```text
//! identifier --> candidates --> gateway --> request headers
//!                                              |
//!                  response headers <-- orchestrator (fetch, fall back on 404)
//! ```

mod candidates;
mod error;
mod gateway;
mod headers;
mod identifier;
mod orchestrator;
mod resolver;
mod response;
mod upstream;

#[cfg(test)]
mod tests;

pub use candidates::{CandidateList, candidates};
pub use error::ResolveError;
pub use gateway::{GatewayOrigin, InvalidGateway, select_gateway};
pub use headers::{
    FORWARDED_REQUEST_HEADERS, forward_request_headers, resolve_content_type, resolve_filename,
};
pub use identifier::{ResourceIdentifier, is_cid_like, normalize_cid, normalize_grove};
pub use orchestrator::{AttemptOutcome, FetchPlan, classify_attempt, fetch_with_fallback};
pub use resolver::Resolver;
pub use response::{ProxiedBody, ProxiedResponse};
pub use upstream::{
    BodyStream, FetchError, HttpFetcher, UpstreamFetch, UpstreamOutcome, UpstreamRequest,
};

/// Resource identifier scheme served by a resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Content-hash CIDs (`Qm...`, `bafy...`) served through an IPFS gateway.
    Ipfs,
    /// Grove/Lens resource locators served through a Grove gateway.
    Grove,
}

impl Scheme {
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Ipfs => "ipfs",
            Scheme::Grove => "grove",
        }
    }

    /// Plain-text hint returned when no identifier was supplied.
    pub fn usage(self) -> &'static str {
        match self {
            Scheme::Ipfs => "Usage: /api/ipfs/<CID>[/path/to/file]?filename=yourfile.pptx",
            Scheme::Grove => "Usage: /grove/<resourceId> or /grove?uri=lens://<resourceId>",
        }
    }

    pub fn invalid_message(self) -> &'static str {
        match self {
            Scheme::Ipfs => "Invalid or missing CID.",
            Scheme::Grove => "Invalid Grove resource.",
        }
    }

    /// Fixed body that replaces an upstream 404 once every candidate is exhausted.
    ///
    /// IPFS has a single candidate and passes the upstream's own 404 body through instead.
    pub fn not_found_message(self) -> Option<&'static str> {
        match self {
            Scheme::Ipfs => None,
            Scheme::Grove => Some("Grove resource not found."),
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
