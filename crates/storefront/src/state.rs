//! Application state shared across handlers.

use std::sync::Arc;

use abyssinia_core::Catalog;

use crate::config::{BasePath, StorefrontConfig};
use crate::shops::ShopRegistry;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Config and catalog are read-only; visitor
/// shops live in the [`ShopRegistry`], reached through
/// [`crate::middleware::VisitorShop`].
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    shops: ShopRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `catalog` - Product catalog, fixed for the life of the process
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Self {
        let shops = ShopRegistry::new(config.max_sessions, config.session_idle);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                shops,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn shops(&self) -> &ShopRegistry {
        &self.inner.shops
    }

    /// Shortcut for the configured base path.
    #[must_use]
    pub fn base_path(&self) -> &BasePath {
        &self.inner.config.base_path
    }
}
