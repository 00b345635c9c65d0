use std::fmt;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidGateway {
    #[error("not an absolute URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("missing host")]
    MissingHost,

    #[error("expected a bare origin without path, query or fragment")]
    NotAnOrigin,
}

/// Absolute `http`/`https` origin (`scheme://host[:port]`) of an upstream gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayOrigin(String);

impl GatewayOrigin {
    /// Parses any absolute HTTP(S) URL and keeps only its origin.
    pub fn parse(input: &str) -> Result<Self, InvalidGateway> {
        let url = Url::parse(input)?;
        Self::from_url(&url)
    }

    /// Like [`GatewayOrigin::parse`], but rejects inputs carrying a path, query or fragment.
    ///
    /// Used for configured defaults, where silently dropping a path would hide a mistake.
    pub fn parse_exact(input: &str) -> Result<Self, InvalidGateway> {
        let url = Url::parse(input)?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidGateway::NotAnOrigin);
        }
        Self::from_url(&url)
    }

    fn from_url(url: &Url) -> Result<Self, InvalidGateway> {
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(InvalidGateway::UnsupportedScheme(other.to_string())),
        }

        if url.host_str().is_none() {
            return Err(InvalidGateway::MissingHost);
        }

        Ok(Self(url.origin().ascii_serialization()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GatewayOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Picks the caller's `gateway` override when it is a valid HTTP(S) URL, else the default.
///
/// Never fails: malformed overrides degrade to `default`.
pub fn select_gateway(requested: Option<&str>, default: &GatewayOrigin) -> GatewayOrigin {
    let Some(requested) = requested.filter(|s| !s.is_empty()) else {
        return default.clone();
    };

    match GatewayOrigin::parse(requested) {
        Ok(origin) => origin,
        Err(err) => {
            tracing::debug!(gateway = requested, error = %err, "ignoring gateway override");
            default.clone()
        }
    }
}
