use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use http::{HeaderMap, Method, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Streamed upstream body, yielded chunk by chunk as it arrives.
pub type BodyStream = BoxStream<'static, Result<Bytes, FetchError>>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("timed out fetching {url}")]
    Timeout { url: String },

    #[error("failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("upstream body interrupted: {0}")]
    Body(String),

    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to build upstream client: {0}")]
    Client(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    fn from_reqwest(url: &Url, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Self::Timeout {
                url: url.to_string(),
            };
        }

        Self::Transport {
            url: url.to_string(),
            reason: error_chain(&err),
        }
    }
}

/// Joins an error and its sources, so "error sending request" shows the underlying cause.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

/// One request against an upstream gateway.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

/// Result of one fetch attempt. `body` is `None` for HEAD.
pub struct UpstreamOutcome {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Option<BodyStream>,
}

impl std::fmt::Debug for UpstreamOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamOutcome")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body", &self.body.as_ref().map(|_| "<stream>"))
            .finish()
    }
}

impl UpstreamOutcome {
    /// Drains the body into a (lossy) UTF-8 string.
    pub async fn text(self) -> Result<String, FetchError> {
        let Some(mut body) = self.body else {
            return Ok(String::new());
        };

        let mut buf = BytesMut::new();
        while let Some(chunk) = body.next().await {
            buf.extend_from_slice(&chunk?);
        }

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Transport used to reach upstream gateways.
#[async_trait]
pub trait UpstreamFetch: Send + Sync {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamOutcome, FetchError>;
}

/// [`UpstreamFetch`] over a shared `reqwest` client. Redirects are followed.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(
        connect_timeout: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder =
            reqwest::Client::builder().user_agent(concat!("cidway/", env!("CARGO_PKG_VERSION")));

        if let Some(connect_timeout) = connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::Client(error_chain(&e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamFetch for HttpFetcher {
    async fn fetch(&self, request: UpstreamRequest) -> Result<UpstreamOutcome, FetchError> {
        let UpstreamRequest {
            method,
            url,
            headers,
        } = request;
        let is_head = method == Method::HEAD;

        let response = self
            .client
            .request(method, url.clone())
            .headers(headers)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&url, e))?;

        let status = response.status();
        let headers = response.headers().clone();

        let body = if is_head {
            None
        } else {
            Some(
                response
                    .bytes_stream()
                    .map_err(|e| FetchError::Body(error_chain(&e)))
                    .boxed(),
            )
        };

        Ok(UpstreamOutcome {
            status,
            headers,
            body,
        })
    }
}
