use crate::resolve::Scheme;
use std::fmt;

/// Route families served by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteKind {
    /// `/grove/...` resources on a Grove storage gateway.
    Grove,
    /// `/api/ipfs/...` content on an IPFS gateway.
    Ipfs,
}

impl RouteKind {
    pub fn scheme(self) -> Scheme {
        match self {
            RouteKind::Grove => Scheme::Grove,
            RouteKind::Ipfs => Scheme::Ipfs,
        }
    }

    /// Mount point of the route family.
    pub fn default_path(self) -> &'static str {
        match self {
            RouteKind::Grove => "/grove",
            RouteKind::Ipfs => "/api/ipfs",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteKind::Grove => "grove",
            RouteKind::Ipfs => "ipfs",
        }
    }
}

impl fmt::Display for RouteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
