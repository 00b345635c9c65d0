use crate::resolve::tests::CID_V0;
use crate::resolve::{Scheme, candidates, normalize_cid, normalize_grove};
use pretty_assertions::assert_eq;

fn grove_candidates(raw: &str) -> Vec<String> {
    let id = normalize_grove(raw).unwrap();
    candidates(Scheme::Grove, &id)
        .iter()
        .map(|c| c.as_str().to_string())
        .collect()
}

#[test]
fn ipfs_has_a_single_namespaced_candidate() {
    // Arrange
    let id = normalize_cid(&[CID_V0, "a.txt"]).unwrap();

    // Act
    let list = candidates(Scheme::Ipfs, &id);

    // Assert
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].as_str(), format!("ipfs/{CID_V0}/a.txt"));
}

#[test]
fn grove_tries_bare_id_then_file_prefix() {
    assert_eq!(grove_candidates("abc"), vec!["abc", "file/abc"]);
}

#[test]
fn grove_with_file_prefix_tries_bare_form_first() {
    assert_eq!(grove_candidates("file/abc"), vec!["abc", "file/abc"]);
}

#[test]
fn grove_file_prefix_alone_has_one_candidate() {
    assert_eq!(grove_candidates("file/"), vec!["file/"]);
}

#[test]
fn grove_candidates_are_never_empty() {
    for raw in ["a", "file/a", "file/", "lens://x/y"] {
        assert!(!grove_candidates(raw).is_empty(), "{raw}");
    }
}
