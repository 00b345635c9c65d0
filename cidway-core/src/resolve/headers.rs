use http::{HeaderMap, HeaderName, HeaderValue, header};

/// Request headers forwarded upstream; everything else stays with the client.
pub const FORWARDED_REQUEST_HEADERS: [HeaderName; 4] = [
    header::RANGE,
    header::IF_NONE_MATCH,
    header::IF_MODIFIED_SINCE,
    header::ACCEPT,
];

const OCTET_STREAM: &str = "application/octet-stream";
const DEFAULT_FILENAME: &str = "file";
const EXPOSED_HEADERS: &str = "Content-Length, Content-Type, Accept-Ranges, ETag";
const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Copies the allow-listed request headers, verbatim, into a fresh map.
pub fn forward_request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for name in FORWARDED_REQUEST_HEADERS.iter() {
        if let Some(value) = inbound.get(name) {
            out.insert(name.clone(), value.clone());
        }
    }
    out
}

/// `filename` query wins, then a last path segment with an extension, then `file`.
pub fn resolve_filename<S: AsRef<str>>(requested: Option<&str>, segments: &[S]) -> String {
    if let Some(name) = requested.filter(|s| !s.is_empty()) {
        return name.to_string();
    }

    match segments.last().map(AsRef::as_ref) {
        Some(last) if has_extension(last) => last.to_string(),
        _ => DEFAULT_FILENAME.to_string(),
    }
}

/// Ends with `.` followed by at least one ASCII alphanumeric.
fn has_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((_, ext)) => !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()),
        None => false,
    }
}

/// Keeps a specific upstream type; otherwise guesses from the filename.
pub fn resolve_content_type(upstream: Option<&str>, filename: &str) -> String {
    let upstream = upstream.map(str::trim).filter(|s| !s.is_empty());

    if let Some(ct) = upstream.filter(|ct| !is_octet_stream(ct)) {
        return ct.to_string();
    }

    mime_guess::from_path(filename)
        .first_raw()
        .or(upstream)
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

fn is_octet_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(OCTET_STREAM))
        .unwrap_or(false)
}

/// Connection-scoped headers that the serving connection re-derives itself.
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

/// Response headers for a successful (2xx/206) upstream outcome.
pub(crate) fn success_headers(upstream: &HeaderMap, filename: &str) -> HeaderMap {
    let upstream_ct = upstream
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let content_type = resolve_content_type(upstream_ct, filename);

    let mut builder = HeaderBuilder::from_upstream(upstream);
    builder.content_type(&content_type);
    builder.content_disposition(filename);
    builder.nosniff();
    builder.cors();
    builder.expose_headers();
    builder.default_cache_control();
    builder.build()
}

/// Response headers for an error body. Only CORS is added to upstream-provided bodies.
pub(crate) fn error_headers(body_len: Option<usize>, local_message: bool) -> HeaderMap {
    let mut builder = HeaderBuilder::default();
    if local_message {
        builder.content_type("text/plain; charset=utf-8");
    }
    if let Some(len) = body_len {
        builder.content_length(len);
    }
    builder.cors();
    builder.build()
}

#[derive(Debug, Default)]
pub(crate) struct HeaderBuilder {
    headers: HeaderMap,
}

impl HeaderBuilder {
    /// Starts from the upstream headers, minus hop-by-hop ones.
    pub(crate) fn from_upstream(upstream: &HeaderMap) -> Self {
        let mut headers = HeaderMap::with_capacity(upstream.len() + 6);
        for (name, value) in upstream.iter() {
            if !is_hop_by_hop(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        Self { headers }
    }

    /// Replaces every value of `header_name` with `value`.
    ///
    /// Values that are not valid header bytes remove the header instead. Returns whether the
    /// header was set.
    pub(crate) fn insert(&mut self, header_name: HeaderName, value: &str) -> bool {
        match HeaderValue::from_bytes(value.as_bytes()) {
            Ok(v) if !v.is_empty() => {
                self.headers.insert(header_name, v);
                true
            }
            _ => {
                self.headers.remove(header_name);
                false
            }
        }
    }

    pub(crate) fn content_type(&mut self, value: &str) {
        self.insert(header::CONTENT_TYPE, value);
    }

    pub(crate) fn content_length(&mut self, len: usize) {
        self.insert(header::CONTENT_LENGTH, &len.to_string());
    }

    pub(crate) fn content_disposition(&mut self, filename: &str) {
        let escaped = filename.replace('\\', "\\\\").replace('"', "\\\"");
        if !self.insert(
            header::CONTENT_DISPOSITION,
            &format!("inline; filename=\"{escaped}\""),
        ) {
            self.insert(
                header::CONTENT_DISPOSITION,
                &format!("inline; filename=\"{DEFAULT_FILENAME}\""),
            );
        }
    }

    pub(crate) fn nosniff(&mut self) {
        self.insert(header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    }

    pub(crate) fn cors(&mut self) {
        self.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");
    }

    pub(crate) fn expose_headers(&mut self) {
        self.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS, EXPOSED_HEADERS);
    }

    /// Only fills in a policy when the upstream sent none.
    pub(crate) fn default_cache_control(&mut self) {
        if !self.headers.contains_key(header::CACHE_CONTROL) {
            self.insert(header::CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL);
        }
    }

    pub(crate) fn build(self) -> HeaderMap {
        self.headers
    }
}
