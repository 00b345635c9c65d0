use crate::ctx::request::QueryParams;
use http::{HeaderMap, Method};

/// Immutable view of one request, as seen by a resolver after routing.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    segments: Vec<String>,
    query: QueryParams,
    headers: HeaderMap,
}

impl RequestContext {
    pub fn new(
        method: Method,
        segments: Vec<String>,
        query: QueryParams,
        headers: HeaderMap,
    ) -> Self {
        Self {
            method,
            segments,
            query,
            headers,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Decoded path segments after the route prefix.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
