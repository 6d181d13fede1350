//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::shop::AjaxClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the platform client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    shop: AjaxClient,
    catalog: Catalog,
}

impl AppState {
    /// Create a new application state from storefront configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let shop = AjaxClient::new(config.shop.ajax_base_url());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop,
                catalog: Catalog::seeded(),
            }),
        }
    }

    /// Create a state whose platform client points at an arbitrary base URL.
    ///
    /// Used by integration tests to target a mock platform.
    #[must_use]
    pub fn with_shop_base_url(config: StorefrontConfig, base_url: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shop: AjaxClient::new(base_url),
                catalog: Catalog::seeded(),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the platform AJAX client.
    #[must_use]
    pub fn shop(&self) -> &AjaxClient {
        &self.inner.shop
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}
