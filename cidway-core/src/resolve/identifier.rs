use crate::resolve::{ResolveError, Scheme};
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

const CIDV0_PREFIX: &str = "Qm";
const CIDV0_MIN_TAIL: usize = 44;
const CIDV1_PREFIX: &str = "bafy";
const CIDV1_MIN_TAIL: usize = 20;

const SCHEME_PREFIXES: [&str; 2] = ["lens://", "grove://"];

/// Normalized, upstream-relative resource path.
///
/// Never starts with `/`, never carries a `lens://`/`grove://` prefix and is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    /// Callers guarantee the normalization invariants.
    pub(crate) fn new_unchecked(path: impl Into<String>) -> Self {
        let path = path.into();
        debug_assert!(!path.is_empty());
        debug_assert!(!path.starts_with('/'));
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Base58 alphabet: ASCII alphanumerics minus `0`, `O`, `I` and `l`.
fn is_base58(c: char) -> bool {
    c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
}

/// Accepts CIDv0 (`Qm` + at least 44 base58 chars) and CIDv1 (`bafy` + at least 20 base58 chars).
pub fn is_cid_like(s: &str) -> bool {
    let (tail, min_len) = if let Some(tail) = s.strip_prefix(CIDV0_PREFIX) {
        (tail, CIDV0_MIN_TAIL)
    } else if let Some(tail) = s.strip_prefix(CIDV1_PREFIX) {
        (tail, CIDV1_MIN_TAIL)
    } else {
        return false;
    };

    tail.chars().all(is_base58) && tail.len() >= min_len
}

/// Validates the leading CID segment and joins the rest of the path after it.
pub fn normalize_cid<S: AsRef<str>>(segments: &[S]) -> Result<ResourceIdentifier, ResolveError> {
    let Some(cid) = segments.first() else {
        return Err(ResolveError::MissingIdentifier(Scheme::Ipfs));
    };

    if !is_cid_like(cid.as_ref()) {
        return Err(ResolveError::InvalidIdentifier(Scheme::Ipfs));
    }

    let path = segments
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    Ok(ResourceIdentifier::new_unchecked(path))
}

/// Reduces a Grove/Lens locator to its gateway-relative path.
///
/// Accepts bare ids, `lens://` and `grove://` URIs, and absolute HTTP(S) URLs (only the path is
/// kept). Malformed percent-encoding is tolerated: the raw value is used as-is.
pub fn normalize_grove(raw: &str) -> Result<ResourceIdentifier, ResolveError> {
    let decoded = decode_lossless(raw);
    let trimmed = decoded.trim();

    let path = if let Some(rest) = strip_scheme_prefix(trimmed) {
        rest.to_string()
    } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        match Url::parse(trimmed) {
            Ok(url) => decode_lossless(url.path()),
            Err(_) => String::new(),
        }
    } else {
        trimmed.to_string()
    };

    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return Err(ResolveError::InvalidIdentifier(Scheme::Grove));
    }

    Ok(ResourceIdentifier::new_unchecked(path))
}

fn strip_scheme_prefix(s: &str) -> Option<&str> {
    SCHEME_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
}

/// Percent-decodes `s`, falling back to the input when the result is not UTF-8.
fn decode_lossless(s: &str) -> String {
    match percent_decode_str(s).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => s.to_string(),
    }
}
