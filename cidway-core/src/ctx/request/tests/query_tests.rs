use crate::ctx::QueryParams;
use pretty_assertions::assert_eq;

#[test]
fn parses_and_decodes_pairs() {
    // Act
    let query = QueryParams::parse("uri=lens%3A%2F%2Fabc&filename=my+deck.pptx");

    // Assert
    assert_eq!(query.get("uri"), Some("lens://abc"));
    assert_eq!(query.get("filename"), Some("my deck.pptx"));
    assert_eq!(query.get("gateway"), None);
}

#[test]
fn first_occurrence_wins() {
    // Act
    let query = QueryParams::parse("cid=first&cid=second");

    // Assert
    assert_eq!(query.get("cid"), Some("first"));
    assert_eq!(query.pairs().len(), 2);
}

#[test]
fn key_without_value_is_present_and_empty() {
    // Act
    let query = QueryParams::parse("uri&gateway=");

    // Assert
    assert_eq!(query.get("uri"), Some(""));
    assert_eq!(query.get("gateway"), Some(""));
}

#[test]
fn empty_query_has_no_pairs() {
    // Act
    let query = QueryParams::parse("");

    // Assert
    assert!(query.is_empty());
}
