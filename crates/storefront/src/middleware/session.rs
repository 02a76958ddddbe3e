//! Session middleware configuration.
//!
//! Sessions are kept in process memory in a `moka`-backed store bounded by
//! `max_sessions` entries. Each session expires after `session_idle` without
//! a request, after which the store drops it. Nothing is persisted: the store
//! is empty after every restart.

use tower_sessions::{Expiry, SessionManagerLayer, cookie::time};
use tower_sessions_moka_store::MokaStore;

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "abyssinia_session";

/// Create the session layer with a bounded in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MokaStore> {
    let path = if config.base_path.is_root() {
        "/".to_string()
    } else {
        config.base_path.as_str().to_string()
    };

    let idle = time::Duration::try_from(config.session_idle).unwrap_or(time::Duration::HOUR);

    SessionManagerLayer::new(MokaStore::new(Some(config.max_sessions)))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(idle))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path(path)
}
