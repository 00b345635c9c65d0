use integration_tests::harness::{FakeGateway, ScriptedResponse, TestServer};
use pretty_assertions::assert_eq;

#[test]
fn falls_back_to_file_prefix_after_404() {
    // Arrange
    let gateway = FakeGateway::start();
    gateway.respond(
        "/file/abc123",
        ScriptedResponse::ok("grove bytes").header("Content-Type", "application/octet-stream"),
    );
    let server = TestServer::start(&gateway);

    // Act
    let res = server
        .get("/grove/abc123?filename=deck.pptx")
        .send()
        .expect("request failed");

    // Assert
    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers()["content-type"],
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(res.text().unwrap(), "grove bytes");
    assert_eq!(gateway.paths(), vec!["/abc123", "/file/abc123"]);
}

#[test]
fn uri_query_with_lens_scheme_is_resolved() {
    // Arrange
    let gateway = FakeGateway::start();
    gateway.respond("/abc123", ScriptedResponse::ok("found"));
    let server = TestServer::start(&gateway);

    // Act
    let res = server
        .get("/grove?uri=lens%3A%2F%2Fabc123")
        .send()
        .expect("request failed");

    // Assert
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().unwrap(), "found");
    assert_eq!(gateway.paths(), vec!["/abc123"]);
}

#[test]
fn file_prefixed_id_tries_bare_form_first() {
    // Arrange
    let gateway = FakeGateway::start();
    gateway.respond("/file/abc123", ScriptedResponse::ok("prefixed"));
    let server = TestServer::start(&gateway);

    // Act
    let res = server.get("/grove/file/abc123").send().expect("request failed");

    // Assert
    assert_eq!(res.text().unwrap(), "prefixed");
    assert_eq!(gateway.paths(), vec!["/abc123", "/file/abc123"]);
}

#[test]
fn exhausted_candidates_give_fixed_not_found() {
    // Arrange
    let gateway = FakeGateway::start();
    let server = TestServer::start(&gateway);

    // Act
    let res = server.get("/grove/missing").send().expect("request failed");

    // Assert
    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["access-control-allow-origin"], "*");
    assert_eq!(res.text().unwrap(), "Grove resource not found.");
    assert_eq!(gateway.paths(), vec!["/missing", "/file/missing"]);
}

#[test]
fn missing_resource_returns_usage() {
    // Arrange
    let gateway = FakeGateway::start();
    let server = TestServer::start(&gateway);

    // Act
    let res = server.get("/grove").send().expect("request failed");

    // Assert
    assert_eq!(res.status(), 400);
    assert_eq!(
        res.text().unwrap(),
        "Usage: /grove/<resourceId> or /grove?uri=lens://<resourceId>"
    );
}

#[test]
fn uri_that_normalizes_to_nothing_is_invalid() {
    // Arrange
    let gateway = FakeGateway::start();
    let server = TestServer::start(&gateway);

    // Act
    let res = server.get("/grove?uri=lens://").send().expect("request failed");

    // Assert
    assert_eq!(res.status(), 400);
    assert_eq!(res.text().unwrap(), "Invalid Grove resource.");
    assert!(gateway.requests().is_empty());
}
