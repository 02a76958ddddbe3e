//! Cart behaviour through the HTTP surface.

use abyssinia_integration_tests::{TestServer, location};
use reqwest::StatusCode;

#[tokio::test]
async fn add_update_and_remove_keep_totals_consistent() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();
    visitor.navigate("explore_collection").await;

    for id in [1, 1, 2] {
        let response = visitor.add_to_cart(id).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), Some(server.href("/").as_str()));
    }

    let catalog = visitor.page().await;
    assert!(catalog.contains(r#"<span class="cart-badge" id="cart-count">3</span>"#));

    visitor.navigate("view_cart").await;
    let cart = visitor.page().await;
    assert!(cart.contains("Yirgacheffe Reserve"));
    assert!(cart.contains("Sidamo Gold"));
    assert!(cart.contains("$49.98"));
    assert!(cart.contains("$72.97"));

    visitor.update_quantity(1, 1).await;
    assert!(visitor.page().await.contains("$47.98"));

    visitor.update_quantity(2, 0).await;
    let cart = visitor.page().await;
    assert!(!cart.contains("Sidamo Gold"));
    assert!(cart.contains("$24.99"));

    visitor.update_quantity(1, -3).await;
    assert!(visitor.page().await.contains("Your cart is empty"));
}

#[tokio::test]
async fn home_badge_reflects_cart() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();

    visitor.add_to_cart(4).await;
    visitor.add_to_cart(4).await;

    let home = visitor.page().await;
    assert!(home.contains("Coffee Excellence"));
    assert!(home.contains(r#"<span class="cart-badge" id="cart-count">2</span>"#));
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();

    let response = visitor.add_to_cart(99).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count = visitor.get("/cart/count").await.text().await.expect("body");
    assert!(count.trim().is_empty());
}

#[tokio::test]
async fn update_of_product_not_in_cart_is_ignored() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();
    visitor.add_to_cart(3).await;

    let response = visitor.update_quantity(5, 4).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let count = visitor.get("/cart/count").await.text().await.expect("body");
    assert!(count.contains(">1<"));
}

#[tokio::test]
async fn htmx_posts_return_fragments_and_trigger() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor().htmx();

    let response = visitor.add_to_cart(6).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("hx-trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    let badge = response.text().await.expect("body");
    assert!(badge.contains("cart-badge"));
    assert!(!badge.contains("<html"));

    let response = visitor.update_quantity(6, 3).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("hx-trigger"));
    let items = response.text().await.expect("body");
    assert!(items.contains("Forest Blend"));
    assert!(items.contains("$65.97"));
    assert!(!items.contains("<html"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_adds_from_one_session_are_all_counted() {
    let server = TestServer::coffeestore().await;
    let mut visitor = server.visitor();
    visitor.add_to_cart(1).await;
    assert!(visitor.cookie().is_some());

    let sends: Vec<_> = (0..100)
        .map(|_| {
            let request = visitor.post_request("/cart/add", &[("product_id", "1")]);
            tokio::spawn(request.send())
        })
        .collect();
    for send in sends {
        let response = send.await.expect("task panicked").expect("request");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    visitor.navigate("explore_collection").await;
    visitor.navigate("view_cart").await;
    let cart = visitor.page().await;
    assert!(cart.contains(r#"<span class="quantity">101</span>"#));
    assert!(cart.contains("$2523.99"));
}
