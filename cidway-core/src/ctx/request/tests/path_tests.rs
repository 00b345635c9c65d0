use crate::ctx::{RequestRejectError, normalize_path, split_segments};
use pretty_assertions::assert_eq;

fn assert_normalized(raw: &str, expected: &str) {
    // Act
    let result = normalize_path(raw);

    // Assert
    assert_eq!(result, Ok(expected.to_string()), "path {raw:?}");
}

//-----------------------------------------------------------------------------
// Canonical paths
//-----------------------------------------------------------------------------
#[test]
fn root_and_empty_map_to_root() {
    assert_normalized("/", "/");
    assert_normalized("", "/");
    assert_normalized("///", "/");
}

#[test]
fn already_canonical_paths_are_unchanged() {
    assert_normalized("/api/ipfs", "/api/ipfs");
    assert_normalized("/grove/abc123", "/grove/abc123");
}

#[test]
fn repeated_and_trailing_slashes_collapse() {
    assert_normalized("//api///ipfs/", "/api/ipfs");
    assert_normalized("/grove/file//abc/", "/grove/file/abc");
}

#[test]
fn dot_segments_are_resolved() {
    assert_normalized("/api/./ipfs", "/api/ipfs");
    assert_normalized("/api/ipfs/x/../Qm", "/api/ipfs/Qm");
}

#[test]
fn encoded_dot_segments_are_resolved() {
    assert_normalized("/api/%2e/ipfs", "/api/ipfs");
    assert_normalized("/grove/x/%2E%2e/abc", "/grove/abc");
    assert_normalized("/grove/x/.%2e/abc", "/grove/abc");
}

#[test]
fn percent_encoding_is_preserved() {
    assert_normalized("/grove/lens%3A%2F%2Fabc", "/grove/lens%3A%2F%2Fabc");
}

//-----------------------------------------------------------------------------
// Rejections
//-----------------------------------------------------------------------------
#[test]
fn traversal_above_root_is_rejected() {
    // Act
    let result = normalize_path("/../etc/passwd");

    // Assert
    assert_eq!(result, Err(RequestRejectError::PathTraversal));
}

#[test]
fn nested_traversal_above_root_is_rejected() {
    // Act
    let result = normalize_path("/grove/../../secret");

    // Assert
    assert_eq!(result, Err(RequestRejectError::PathTraversal));
}

#[test]
fn encoded_traversal_above_root_is_rejected() {
    // Act
    let result = normalize_path("/grove/%2e%2e/%2E%2E/etc/passwd");

    // Assert
    assert_eq!(result, Err(RequestRejectError::PathTraversal));
}

#[test]
fn nul_byte_is_rejected() {
    // Act
    let result = normalize_path("/grove/a\0b");

    // Assert
    assert_eq!(result, Err(RequestRejectError::InvalidPath));
}

//-----------------------------------------------------------------------------
// Segment splitting
//-----------------------------------------------------------------------------
#[test]
fn split_segments_decodes_and_drops_empty_parts() {
    // Act
    let segments = split_segments("/Qm123//docs/my%20deck.pptx");

    // Assert
    assert_eq!(segments, vec!["Qm123", "docs", "my deck.pptx"]);
}

#[test]
fn split_segments_keeps_encoded_slash_inside_one_segment() {
    // Act
    let segments = split_segments("/lens%3A%2F%2Fabc");

    // Assert
    assert_eq!(segments, vec!["lens://abc"]);
}

#[test]
fn split_segments_of_empty_tail_is_empty() {
    assert!(split_segments("").is_empty());
    assert!(split_segments("/").is_empty());
}
