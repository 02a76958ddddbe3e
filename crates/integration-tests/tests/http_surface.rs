//! Health checks, headers and static assets.

use abyssinia_integration_tests::TestServer;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoints() {
    let server = TestServer::coffeestore().await;
    let client = reqwest::Client::new();

    let live = client.get(server.url("/health")).send().await.expect("request");
    assert_eq!(live.status(), StatusCode::OK);
    assert_eq!(live.text().await.expect("body"), "ok");

    let ready = client
        .get(server.url("/health/ready"))
        .send()
        .await
        .expect("request");
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn pages_carry_security_headers_and_nonce() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();

    let response = visitor.get("/").await;
    let headers = response.headers().clone();
    let html = response.text().await.expect("body");

    assert_eq!(
        headers.get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert_eq!(
        headers.get("x-content-type-options").and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );

    let csp = headers
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .expect("CSP header");
    let nonce = csp
        .split("'nonce-")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .expect("nonce in CSP");
    assert!(html.contains(&format!(r#"nonce="{nonce}""#)));
    assert!(csp.contains("https://images.unsplash.com"));
}

#[tokio::test]
async fn request_id_is_generated_or_propagated() {
    let server = TestServer::coffeestore().await;
    let client = reqwest::Client::new();

    let generated = client.get(server.url("/health")).send().await.expect("request");
    assert!(generated.headers().contains_key("x-request-id"));

    let propagated = client
        .get(server.url("/health"))
        .header("x-request-id", "edge-1234")
        .send()
        .await
        .expect("request");
    assert_eq!(
        propagated
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("edge-1234")
    );
}

#[tokio::test]
async fn serves_stylesheet_under_base_path() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();

    let response = visitor.get("/static/css/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.expect("body").contains(".cart-badge"));
}

#[tokio::test]
async fn serves_enhancement_script_allowed_by_csp() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();

    let page = visitor.get("/").await;
    let csp = page
        .headers()
        .get("content-security-policy")
        .and_then(|v| v.to_str().ok())
        .expect("CSP header")
        .to_string();
    assert!(csp.contains("script-src 'self'"));
    let html = page.text().await.expect("body");
    assert!(html.contains(r#"src="/coffeestore/static/js/storefront.js""#));

    let script = visitor.get("/static/js/storefront.js").await;
    assert_eq!(script.status(), StatusCode::OK);
    let body = script.text().await.expect("body");
    assert!(body.contains("HX-Request"));
    assert!(body.contains("HX-Trigger"));
}
