use crate::ctx::RequestId;
use crate::ctx::request::error::RequestRejectError;
use crate::ctx::request::{QueryParams, RequestContext, normalize_path, split_segments};
use crate::route::{RouteEntry, RouteKind};
use http::{HeaderMap, Method, Uri};
use pingora::prelude::Session;

/// Per-request lifecycle context carried through the pingora hooks.
#[derive(Debug)]
pub struct RequestCtx {
    /// Lifecycle flag to determine if the context has already been hydrated from a session.
    pub hydrated: bool,

    pub request_id: RequestId,

    /// Route family the request was dispatched to, if any.
    pub route: Option<RouteKind>,

    /// Status code written back to the client.
    pub status: Option<u16>,

    method: Method,
    path: String,
    query: QueryParams,
    headers: HeaderMap,
}

impl Default for RequestCtx {
    fn default() -> Self {
        Self::empty()
    }
}

/// Hydration API
impl RequestCtx {
    pub fn empty() -> Self {
        Self {
            hydrated: false,
            request_id: RequestId::default(),
            route: None,
            status: None,
            method: Method::GET,
            path: "/".to_string(),
            query: QueryParams::default(),
            headers: HeaderMap::new(),
        }
    }

    /// Create a boundary to decouple session from logic.
    pub fn hydrate_from_session(&mut self, session: &Session) -> Result<(), RequestRejectError> {
        let request_header = session.req_header();
        self.hydrate(
            &request_header.uri,
            &request_header.method,
            &request_header.headers,
        )
    }

    pub(crate) fn hydrate(
        &mut self,
        uri: &Uri,
        method: &Method,
        headers: &HeaderMap,
    ) -> Result<(), RequestRejectError> {
        debug_assert!(!self.hydrated, "Already hydrated, cannot hydrate again");

        // Keep the raw method around for the access log even if the path is rejected.
        self.method = method.clone();
        self.path = normalize_path(uri.path())?;
        self.query = QueryParams::parse(uri.query().unwrap_or_default());
        self.headers = headers.clone();

        self.hydrated = true;
        Ok(())
    }
}

/// Request API
impl RequestCtx {
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Canonical request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn is_read_method(&self) -> bool {
        self.method == Method::GET || self.method == Method::HEAD
    }

    pub fn ensure_read_method(&self) -> Result<(), RequestRejectError> {
        if self.is_read_method() {
            Ok(())
        } else {
            Err(RequestRejectError::MethodNotAllowed)
        }
    }

    /// Builds the resolver view: route prefix stripped, tail split into decoded segments.
    pub fn request_context(&self, route: &RouteEntry) -> RequestContext {
        debug_assert!(self.hydrated);
        RequestContext::new(
            self.method.clone(),
            split_segments(route.tail(&self.path)),
            self.query.clone(),
            self.headers.clone(),
        )
    }
}
