use crate::route::kind::RouteKind;
use anyhow::{Result, anyhow};

#[derive(Debug)]
pub struct Router {
    routes: Vec<RouteEntry>,
}

#[derive(Debug)]
pub struct RouteEntry {
    pub path: String,
    pub kind: RouteKind,
}

impl RouteEntry {
    /// The part of `request_path` after this route's prefix (empty or starting with `/`).
    pub fn tail<'a>(&self, request_path: &'a str) -> &'a str {
        if self.path == "/" {
            return request_path;
        }
        request_path.get(self.path.len()..).unwrap_or("")
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Router with every route family mounted at its default path.
    pub fn with_defaults() -> Result<Self> {
        let mut router = Self::new();
        for kind in [RouteKind::Grove, RouteKind::Ipfs] {
            router.add_route(kind.default_path(), kind)?;
        }
        Ok(router)
    }

    pub fn add_route(&mut self, path: &str, kind: RouteKind) -> Result<()> {
        if !path.starts_with('/') {
            return Err(anyhow!("route path must start with '/': {}", path));
        }

        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        if self.routes.iter().any(|r| r.path == path) {
            return Err(anyhow!("duplicate route path: {}", path));
        }

        self.routes.push(RouteEntry {
            path: path.to_string(),
            kind,
        });

        // The longest prefix wins --> sort descending by path length.
        self.routes.sort_by(|a, b| b.path.len().cmp(&a.path.len()));

        Ok(())
    }

    pub fn match_route(&self, request_path: &str) -> Option<&RouteEntry> {
        if !request_path.starts_with('/') {
            return None;
        }

        self.routes
            .iter()
            .find(|route| path_matches(&route.path, request_path))
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }
}

fn path_matches(route_path: &str, request_path: &str) -> bool {
    if route_path == "/" {
        return true;
    }

    if request_path == route_path {
        return true;
    }

    request_path.starts_with(route_path)
        && request_path
            .as_bytes()
            .get(route_path.len())
            .map(|b| *b == b'/')
            .unwrap_or(false)
}
