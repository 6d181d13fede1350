//! Commerce platform AJAX API client.
//!
//! # Architecture
//!
//! - The platform is the source of truth for the cart - NO local persistence,
//!   direct API calls against the store domain's AJAX endpoints
//! - Every mutation is followed by a fresh cart read; nothing is updated
//!   optimistically, so a failed call leaves the rendered state untouched
//! - Predictive-search responses are cached in-memory via `moka` for a few
//!   seconds; cart reads are never cached
//!
//! # Endpoints
//!
//! - `GET  /cart.js` - authoritative cart snapshot
//! - `POST /cart/add.js` - add a variant (form-encoded)
//! - `POST /cart/change.js` - set a line quantity (JSON `{ id, quantity }`)
//! - `GET  /search/suggest.json` - predictive product search
//!
//! # Example
//!
//! ```rust,ignore
//! use sable_storefront::shop::AjaxClient;
//!
//! let client = AjaxClient::new(config.shop.ajax_base_url());
//!
//! // Add a variant, then read back the authoritative cart
//! let token = client.add_to_cart(None, VariantId::new(42), 1).await?;
//! let fetched = client.get_cart(token.as_deref()).await?;
//! ```

mod ajax;

pub use ajax::{AjaxClient, FetchedCart, SearchProduct};
pub use ajax::types;

use thiserror::Error;

/// Errors that can occur when talking to the commerce platform.
#[derive(Debug, Error)]
pub enum ShopError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Platform returned a non-success status with no usable error payload.
    #[error("Platform returned HTTP {0}")]
    Status(u16),

    /// Platform rejected the request and said why (e.g., sold out).
    ///
    /// The description is platform-supplied and safe to show to the user.
    #[error("{0}")]
    Rejected(String),

    /// Cart was reported in a currency the shop does not sell in.
    #[error("Currency error: {0}")]
    Currency(#[from] sable_core::CurrencyError),
}

impl ShopError {
    /// The message shown to the user for this failure.
    ///
    /// Platform-supplied rejection descriptions pass through verbatim;
    /// everything else collapses to a generic error string, matching the
    /// storefront's error taxonomy.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(description) => description.clone(),
            _ => "Something went wrong while updating your cart. Please try again.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_passes_description_through() {
        let err = ShopError::Rejected("All 1 Elegant Blazer is in your cart.".to_string());
        assert_eq!(err.to_string(), "All 1 Elegant Blazer is in your cart.");
        assert_eq!(err.user_message(), "All 1 Elegant Blazer is in your cart.");
    }

    #[test]
    fn test_status_error_has_generic_user_message() {
        let err = ShopError::Status(502);
        assert_eq!(err.to_string(), "Platform returned HTTP 502");
        assert!(err.user_message().starts_with("Something went wrong"));
    }

    #[test]
    fn test_currency_error() {
        let err = ShopError::from(sable_core::CurrencyError::Unsupported("JPY".to_string()));
        assert_eq!(err.to_string(), "Currency error: unsupported currency code: JPY");
    }
}
