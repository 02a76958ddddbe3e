//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP with the nonce, framing, referrer policy)
//! 5. CSP nonce (generate per-request nonce for inline scripts)
//! 6. Session layer (tower-sessions with a bounded in-memory store)
//!
//! The [`VisitorShop`] extractor sits on top of the session layer and gives
//! handlers the visitor's cart and page.

pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod shop;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
pub use shop::VisitorShop;
