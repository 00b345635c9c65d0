use crate::resolve::orchestrator::upstream_url;
use crate::resolve::tests::CID_V0;
use crate::resolve::tests::fetcher::{Scripted, ScriptedFetcher, body_text};
use crate::resolve::{
    AttemptOutcome, FetchPlan, GatewayOrigin, ResolveError, ResourceIdentifier, Scheme,
    candidates, classify_attempt, fetch_with_fallback, normalize_cid, normalize_grove,
};
use http::{HeaderMap, Method, StatusCode, header};
use pretty_assertions::assert_eq;

const GATEWAY: &str = "https://gateway.example.test";

fn plan(scheme: Scheme, id: ResourceIdentifier, method: Method, filename: &str) -> FetchPlan {
    FetchPlan {
        scheme,
        gateway: GatewayOrigin::parse_exact(GATEWAY).unwrap(),
        candidates: candidates(scheme, &id),
        method,
        request_headers: HeaderMap::new(),
        filename: filename.to_string(),
    }
}

fn grove_plan(raw: &str) -> FetchPlan {
    plan(Scheme::Grove, normalize_grove(raw).unwrap(), Method::GET, "file")
}

//-----------------------------------------------------------------------------
// Classification
//-----------------------------------------------------------------------------
#[test]
fn classify_attempt_covers_every_branch() {
    assert_eq!(classify_attempt(StatusCode::OK, false), AttemptOutcome::Success);
    assert_eq!(classify_attempt(StatusCode::PARTIAL_CONTENT, true), AttemptOutcome::Success);
    assert_eq!(
        classify_attempt(StatusCode::NOT_FOUND, false),
        AttemptOutcome::RetryableNotFound
    );
    assert_eq!(classify_attempt(StatusCode::NOT_FOUND, true), AttemptOutcome::TerminalError);
    assert_eq!(
        classify_attempt(StatusCode::INTERNAL_SERVER_ERROR, false),
        AttemptOutcome::TerminalError
    );
    assert_eq!(classify_attempt(StatusCode::NOT_MODIFIED, false), AttemptOutcome::TerminalError);
}

#[test]
fn upstream_url_escapes_each_segment() {
    // Arrange
    let gateway = GatewayOrigin::parse_exact(GATEWAY).unwrap();
    let id = normalize_grove("file/my deck#1?.pptx").unwrap();

    // Act
    let url = upstream_url(&gateway, &id).unwrap();

    // Assert
    assert_eq!(
        url.as_str(),
        "https://gateway.example.test/file/my%20deck%231%3F.pptx"
    );
}

//-----------------------------------------------------------------------------
// Fallback loop
//-----------------------------------------------------------------------------
#[tokio::test]
async fn grove_falls_back_to_file_prefix_after_404() {
    // Arrange
    let fetcher = ScriptedFetcher::new([
        Scripted::status(404, "nope"),
        Scripted::status(200, "hello")
            .with_header("content-type", "application/octet-stream")
            .with_header("content-length", "5"),
    ]);
    let mut plan = grove_plan("abc");
    plan.filename = "deck.pptx".to_string();

    // Act
    let response = fetch_with_fallback(&fetcher, plan).await.unwrap();

    // Assert
    assert_eq!(
        fetcher.urls(),
        vec![
            "https://gateway.example.test/abc",
            "https://gateway.example.test/file/abc",
        ]
    );
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers[header::CONTENT_TYPE],
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "inline; filename=\"deck.pptx\""
    );
    assert_eq!(body_text(response.body).await, "hello");
}

#[tokio::test]
async fn first_success_stops_the_loop() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::status(200, "first")]);

    // Act
    let response = fetch_with_fallback(&fetcher, grove_plan("abc")).await.unwrap();

    // Assert
    assert_eq!(fetcher.requests().len(), 1);
    assert_eq!(body_text(response.body).await, "first");
}

#[tokio::test]
async fn partial_content_is_a_success() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::status(206, "par")
        .with_header("content-range", "bytes 0-2/10")]);
    let id = normalize_cid(&[CID_V0]).unwrap();

    // Act
    let response = fetch_with_fallback(&fetcher, plan(Scheme::Ipfs, id, Method::GET, "file"))
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(response.headers[header::CONTENT_RANGE], "bytes 0-2/10");
}

#[tokio::test]
async fn grove_exhausted_candidates_give_fixed_not_found() {
    // Arrange
    let fetcher = ScriptedFetcher::new([
        Scripted::status(404, "upstream says no"),
        Scripted::status(404, "upstream says no again"),
    ]);

    // Act
    let err = fetch_with_fallback(&fetcher, grove_plan("abc"))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(fetcher.requests().len(), 2);
    assert_eq!(err.status(), StatusCode::NOT_FOUND);
    assert_eq!(err.to_string(), "Grove resource not found.");
}

#[tokio::test]
async fn ipfs_not_found_passes_upstream_body_through() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::status(404, "no link named x")]);
    let id = normalize_cid(&[CID_V0, "x"]).unwrap();

    // Act
    let err = fetch_with_fallback(&fetcher, plan(Scheme::Ipfs, id, Method::GET, "file"))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(
        fetcher.urls(),
        vec![format!("https://gateway.example.test/ipfs/{CID_V0}/x")]
    );
    match err {
        ResolveError::UpstreamError { status, body } => {
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(body, "no link named x");
        }
        other => panic!("expected UpstreamError, got {other:?}"),
    }
}

#[tokio::test]
async fn non_404_error_stops_without_fallback() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::status(500, "boom")]);

    // Act
    let err = fetch_with_fallback(&fetcher, grove_plan("abc"))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(fetcher.requests().len(), 1);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn transport_failure_is_bad_gateway_and_not_retried() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::refused()]);

    // Act
    let err = fetch_with_fallback(&fetcher, grove_plan("abc"))
        .await
        .unwrap_err();

    // Assert
    assert_eq!(fetcher.requests().len(), 1);
    assert!(matches!(err, ResolveError::UpstreamUnavailable(_)));
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn transport_timeout_is_gateway_timeout() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::timed_out()]);

    // Act
    let err = fetch_with_fallback(&fetcher, grove_plan("abc"))
        .await
        .unwrap_err();

    // Assert
    assert!(matches!(err, ResolveError::UpstreamTimeout(_)));
    assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn head_is_forwarded_as_head() {
    // Arrange
    let fetcher = ScriptedFetcher::new([Scripted::status(200, "ignored")]);
    let id = normalize_cid(&[CID_V0]).unwrap();

    // Act
    let response = fetch_with_fallback(&fetcher, plan(Scheme::Ipfs, id, Method::HEAD, "file"))
        .await
        .unwrap();

    // Assert
    assert_eq!(fetcher.requests()[0].method, Method::HEAD);
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(body_text(response.body).await, "");
}
