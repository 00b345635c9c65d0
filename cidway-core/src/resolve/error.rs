use crate::resolve::Scheme;
use crate::resolve::upstream::FetchError;
use http::StatusCode;
use thiserror::Error;

/// Every way a resolution can end without a successful upstream response.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No path, `uri` or `cid` was supplied.
    #[error("{}", .0.usage())]
    MissingIdentifier(Scheme),

    /// The identifier failed scheme validation or normalized to nothing.
    #[error("{}", .0.invalid_message())]
    InvalidIdentifier(Scheme),

    /// Every candidate came back 404 and the scheme answers with a fixed message.
    #[error("{message}")]
    UpstreamNotFound { message: &'static str },

    /// The upstream answered with a non-success status; its body is passed through.
    #[error("upstream responded with {status}")]
    UpstreamError { status: StatusCode, body: String },

    /// The upstream could not be reached (DNS, refused, reset, TLS).
    #[error("upstream gateway unavailable: {0}")]
    UpstreamUnavailable(#[source] FetchError),

    #[error("upstream gateway timed out: {0}")]
    UpstreamTimeout(#[source] FetchError),
}

impl ResolveError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingIdentifier(_) | Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamNotFound { .. } => StatusCode::NOT_FOUND,
            Self::UpstreamError { status, .. } => *status,
            Self::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Whether the response body is the upstream's own text rather than a local message.
    pub(crate) fn is_passthrough(&self) -> bool {
        matches!(self, Self::UpstreamError { .. })
    }
}

impl From<FetchError> for ResolveError {
    fn from(err: FetchError) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout(err)
        } else {
            Self::UpstreamUnavailable(err)
        }
    }
}
