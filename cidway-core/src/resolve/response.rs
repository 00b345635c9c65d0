use crate::resolve::ResolveError;
use crate::resolve::headers::{error_headers, success_headers};
use crate::resolve::upstream::{BodyStream, UpstreamOutcome};
use bytes::Bytes;
use http::{HeaderMap, StatusCode};

pub enum ProxiedBody {
    Empty,
    /// Small, fully materialized bodies (error text, usage hints).
    Bytes(Bytes),
    /// Upstream body, passed through as it arrives.
    Stream(BodyStream),
}

impl std::fmt::Debug for ProxiedBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Final response handed to the client.
#[derive(Debug)]
pub struct ProxiedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ProxiedBody,
}

impl ProxiedResponse {
    /// Wraps a 2xx/206 outcome, rewriting its metadata for `filename`.
    pub(crate) fn from_upstream(outcome: UpstreamOutcome, filename: &str) -> Self {
        let headers = success_headers(&outcome.headers, filename);
        let body = match outcome.body {
            Some(stream) => ProxiedBody::Stream(stream),
            None => ProxiedBody::Empty,
        };

        Self {
            status: outcome.status,
            headers,
            body,
        }
    }

    /// Renders a resolution failure as a plain-text response.
    pub fn from_error(err: ResolveError) -> Self {
        let status = err.status();
        let passthrough = err.is_passthrough();

        let text = match err {
            ResolveError::UpstreamError { body, .. } => body,
            ResolveError::UpstreamUnavailable(_) => "Upstream gateway unavailable.".to_string(),
            ResolveError::UpstreamTimeout(_) => "Upstream gateway timed out.".to_string(),
            other => other.to_string(),
        };

        if !status_allows_body(status) {
            return Self {
                status,
                headers: error_headers(None, false),
                body: ProxiedBody::Empty,
            };
        }

        let headers = error_headers(Some(text.len()), !passthrough);
        let body = if text.is_empty() {
            ProxiedBody::Empty
        } else {
            ProxiedBody::Bytes(Bytes::from(text))
        };

        Self {
            status,
            headers,
            body,
        }
    }

    /// Drops the body while keeping status and headers (HEAD responses).
    pub fn without_body(self) -> Self {
        Self {
            body: ProxiedBody::Empty,
            ..self
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// 1xx, 204 and 304 responses never carry a body.
fn status_allows_body(status: StatusCode) -> bool {
    !(status.is_informational()
        || status == StatusCode::NO_CONTENT
        || status == StatusCode::NOT_MODIFIED)
}
