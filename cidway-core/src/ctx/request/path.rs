use crate::ctx::request::error::RequestRejectError;
use percent_encoding::percent_decode_str;

/// Canonicalizes a raw request path.
///
/// - Repeated slashes collapse into one and `.` segments are dropped.
/// - `..` pops the previous segment; popping past the root is rejected.
/// - Percent-encoded dot segments count as dot segments.
/// - NUL bytes are rejected.
/// - A trailing slash is removed, except for the root itself.
///
/// Other percent-encoded bytes are left untouched; decoding happens per segment after routing.
pub fn normalize_path(path: &str) -> Result<String, RequestRejectError> {
    if path.as_bytes().contains(&0) {
        return Err(RequestRejectError::InvalidPath);
    }

    let mut stack: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match dot_segment(segment) {
            Some(DotSegment::Current) => {}
            Some(DotSegment::Parent) => {
                if stack.pop().is_none() {
                    return Err(RequestRejectError::PathTraversal);
                }
            }
            None if segment.is_empty() => {}
            None => stack.push(segment),
        }
    }

    let mut normalized = String::with_capacity(path.len().max(1));
    normalized.push('/');
    normalized.push_str(&stack.join("/"));

    Ok(normalized)
}

enum DotSegment {
    Current,
    Parent,
}

/// `.` and `..`, including their percent-encoded spellings (`%2e`, `.%2E`, ...).
fn dot_segment(segment: &str) -> Option<DotSegment> {
    let lowered = segment.to_ascii_lowercase();
    match lowered.replace("%2e", ".").as_str() {
        "." => Some(DotSegment::Current),
        ".." => Some(DotSegment::Parent),
        _ => None,
    }
}

/// Splits a path tail into percent-decoded, non-empty segments.
pub fn split_segments(tail: &str) -> Vec<String> {
    tail.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}
