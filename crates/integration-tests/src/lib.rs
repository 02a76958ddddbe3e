//! End-to-end tests for the Abyssinia storefront.
//!
//! Each test spawns the full application (sessions, middleware, templates)
//! on an ephemeral port and drives it over HTTP with `reqwest`, the way a
//! browser without JavaScript would, or the way htmx would when
//! [`Visitor::htmx`] is set.
//!
//! Run with: `cargo test -p abyssinia-integration-tests`

#![allow(clippy::missing_panics_doc, clippy::expect_used)]

use std::net::SocketAddr;
use std::path::PathBuf;

use abyssinia_core::Catalog;
use abyssinia_storefront::config::{BasePath, StorefrontConfig};
use abyssinia_storefront::routes;
use abyssinia_storefront::state::AppState;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, redirect};

/// Storefront configuration for tests, served under `base_path`.
#[must_use]
pub fn test_config(base_path: &str) -> StorefrontConfig {
    StorefrontConfig {
        base_path: BasePath::parse(base_path).expect("valid base path"),
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static")),
        ..StorefrontConfig::default()
    }
}

/// A storefront running in the test's runtime.
pub struct TestServer {
    addr: SocketAddr,
    base_path: BasePath,
}

impl TestServer {
    /// Start the storefront with the given configuration.
    pub async fn spawn(config: StorefrontConfig) -> Self {
        let base_path = config.base_path.clone();
        let app = routes::app(AppState::new(config, Catalog::abyssinia()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind ephemeral port");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move { axum::serve(listener, app).await });

        Self { addr, base_path }
    }

    /// Start the storefront under its default `/coffeestore` prefix.
    pub async fn coffeestore() -> Self {
        Self::spawn(test_config("/coffeestore")).await
    }

    /// Absolute URL for a server path, ignoring the base path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Absolute URL for a path under the base path.
    #[must_use]
    pub fn page_url(&self, path: &str) -> String {
        self.url(&self.base_path.href(path))
    }

    /// Path under the base path, as it appears in `Location` headers.
    #[must_use]
    pub fn href(&self, path: &str) -> String {
        self.base_path.href(path)
    }

    /// A new browser session with no cookies.
    #[must_use]
    pub fn visitor(&self) -> Visitor<'_> {
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Visitor {
            server: self,
            client,
            cookie: None,
            htmx: false,
        }
    }
}

/// One browser session against a [`TestServer`].
///
/// Redirects are not followed, so tests can assert on them. The session
/// cookie is carried from response to request by hand.
pub struct Visitor<'a> {
    server: &'a TestServer,
    client: Client,
    cookie: Option<String>,
    htmx: bool,
}

impl Visitor<'_> {
    /// Send the `HX-Request` header on cart posts from now on.
    #[must_use]
    pub const fn htmx(mut self) -> Self {
        self.htmx = true;
        self
    }

    /// The session cookie pair (`name=value`), once the server has set one.
    #[must_use]
    pub fn cookie(&self) -> Option<&str> {
        self.cookie.as_deref()
    }

    /// GET a path under the base path.
    pub async fn get(&mut self, path: &str) -> Response {
        let mut request = self.client.get(self.server.page_url(path));
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        self.send(request).await
    }

    /// GET the single page URL and return its HTML.
    pub async fn page(&mut self) -> String {
        let response = self.get("/").await;
        assert!(
            response.status().is_success(),
            "page returned {}",
            response.status()
        );
        response.text().await.expect("Failed to read page body")
    }

    /// POST a navigation action.
    pub async fn navigate(&mut self, action: &str) -> Response {
        self.post("/navigate", &[("action", action)]).await
    }

    /// POST an add-to-cart form.
    pub async fn add_to_cart(&mut self, product_id: i32) -> Response {
        let product_id = product_id.to_string();
        self.post("/cart/add", &[("product_id", product_id.as_str())])
            .await
    }

    /// POST a quantity update form.
    pub async fn update_quantity(&mut self, product_id: i32, quantity: i64) -> Response {
        let product_id = product_id.to_string();
        let quantity = quantity.to_string();
        self.post(
            "/cart/update",
            &[
                ("product_id", product_id.as_str()),
                ("quantity", quantity.as_str()),
            ],
        )
        .await
    }

    /// POST a form to a path under the base path.
    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> Response {
        let request = self.post_request(path, form);
        self.send(request).await
    }

    /// A form POST carrying this visitor's cookie, to send independently.
    ///
    /// Responses to it do not update the visitor's cookie.
    #[must_use]
    pub fn post_request(&self, path: &str, form: &[(&str, &str)]) -> RequestBuilder {
        let mut request = self.client.post(self.server.page_url(path)).form(form);
        if self.htmx {
            request = request.header("HX-Request", "true");
        }
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.as_str());
        }
        request
    }

    async fn send(&mut self, request: RequestBuilder) -> Response {
        let response = request.send().await.expect("Request failed");

        if let Some(pair) = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
        {
            self.cookie = Some(pair.to_string());
        }

        response
    }
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
