//! Client for the platform's AJAX cart and predictive-search endpoints.
//!
//! The platform identifies a browser's cart by a `cart` cookie. Since this
//! storefront sits between the browser and the platform, that cookie value is
//! carried as an opaque token: handlers read it out of the server session,
//! pass it in here, and store back whatever the platform rotates it to.

mod conversions;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::header::{COOKIE, SET_COOKIE};
use sable_core::{Cart, VariantId};
use tracing::{debug, instrument};

use crate::shop::ShopError;

use conversions::convert_cart;
use types::{AddRejection, AjaxCart, ChangeRequest, PredictiveSearchResponse};

pub use types::SearchProduct;

/// How long predictive-search responses stay cached.
const SEARCH_CACHE_TTL: Duration = Duration::from_secs(30);

/// A cart read back from the platform.
#[derive(Debug, Clone)]
pub struct FetchedCart {
    /// The authoritative cart state.
    pub cart: Cart,
    /// Rotated cart token, when the platform set a new one on this response.
    pub cart_token: Option<String>,
}

/// Client for the platform AJAX API.
///
/// Cheaply cloneable; cart calls are never cached, predictive-search
/// responses are cached for [`SEARCH_CACHE_TTL`].
#[derive(Clone)]
pub struct AjaxClient {
    inner: Arc<AjaxClientInner>,
}

struct AjaxClientInner {
    client: reqwest::Client,
    base_url: String,
    search_cache: Cache<String, Vec<SearchProduct>>,
}

impl AjaxClient {
    /// Create a new client for the given store base URL
    /// (e.g., `https://sable-atelier.myshopify.com`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let search_cache = Cache::builder()
            .max_capacity(128)
            .time_to_live(SEARCH_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AjaxClientInner {
                client: reqwest::Client::new(),
                base_url: base_url.into(),
                search_cache,
            }),
        }
    }

    /// Fetch the authoritative cart.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-success status, or an
    /// unparseable response.
    #[instrument(skip(self, cart_token))]
    pub async fn get_cart(&self, cart_token: Option<&str>) -> Result<FetchedCart, ShopError> {
        let url = format!("{}/cart.js", self.inner.base_url);
        let request = self.with_cart_cookie(self.inner.client.get(&url), cart_token);

        let response = request.send().await?;
        let rotated = extract_cart_token(&response);
        let ajax: AjaxCart = parse_cart_response(response).await?;

        Ok(FetchedCart {
            cart: convert_cart(ajax)?,
            cart_token: rotated,
        })
    }

    /// Set the quantity of the line for a variant; zero removes the line.
    ///
    /// Returns the updated authoritative cart.
    ///
    /// # Errors
    ///
    /// Any non-2xx status is a failure; the caller's rendered state must be
    /// left as it was.
    #[instrument(skip(self, cart_token), fields(variant_id = %variant_id, quantity))]
    pub async fn change_line(
        &self,
        cart_token: Option<&str>,
        variant_id: VariantId,
        quantity: i64,
    ) -> Result<FetchedCart, ShopError> {
        let url = format!("{}/cart/change.js", self.inner.base_url);
        let body = ChangeRequest {
            id: variant_id.as_u64(),
            quantity,
        };
        let request = self
            .with_cart_cookie(self.inner.client.post(&url), cart_token)
            .json(&body);

        let response = request.send().await?;
        let rotated = extract_cart_token(&response);
        let ajax: AjaxCart = parse_cart_response(response).await?;

        Ok(FetchedCart {
            cart: convert_cart(ajax)?,
            cart_token: rotated,
        })
    }

    /// Add a variant to the cart (form-encoded, like a product form submit).
    ///
    /// The platform responds with the added line, not the full cart; callers
    /// follow up with [`get_cart`](Self::get_cart) for the authoritative
    /// state. Returns the rotated cart token, if the platform set one.
    ///
    /// # Errors
    ///
    /// A rejected add (e.g., sold out) surfaces the platform-supplied
    /// description as [`ShopError::Rejected`].
    #[instrument(skip(self, cart_token), fields(variant_id = %variant_id, quantity))]
    pub async fn add_to_cart(
        &self,
        cart_token: Option<&str>,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<Option<String>, ShopError> {
        let url = format!("{}/cart/add.js", self.inner.base_url);
        let form = [
            ("id", variant_id.to_string()),
            ("quantity", quantity.to_string()),
        ];
        let request = self
            .with_cart_cookie(self.inner.client.post(&url), cart_token)
            .form(&form);

        let response = request.send().await?;
        let rotated = extract_cart_token(&response);
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_add_rejection(status.as_u16(), &body));
        }

        Ok(rotated)
    }

    /// Query predictive search, restricted to products.
    ///
    /// Unavailable products are hidden and at most `limit` results are
    /// returned. Responses are cached briefly per normalized query.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure, a non-success status, or an
    /// unparseable response.
    #[instrument(skip(self))]
    pub async fn predictive_search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchProduct>, ShopError> {
        let cache_key = format!("{}:{limit}", query.trim().to_lowercase());

        if let Some(hit) = self.inner.search_cache.get(&cache_key).await {
            debug!("Cache hit for predictive search");
            return Ok(hit);
        }

        let url = format!("{}/search/suggest.json", self.inner.base_url);
        let response = self
            .inner
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("resources[type]", "product"),
                ("resources[limit]", &limit.to_string()),
                ("resources[options][unavailable_products]", "hide"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShopError::Status(status.as_u16()));
        }

        let parsed: PredictiveSearchResponse = parse_json(response).await?;
        let mut products = parsed.resources.results.products;
        products.truncate(limit);

        self.inner
            .search_cache
            .insert(cache_key, products.clone())
            .await;

        Ok(products)
    }

    /// Attach the platform cart cookie, when the session already has one.
    fn with_cart_cookie(
        &self,
        request: reqwest::RequestBuilder,
        cart_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        match cart_token {
            Some(token) => request.header(COOKIE, format!("cart={token}")),
            None => request,
        }
    }
}

/// Pull a rotated `cart` cookie value out of a platform response.
fn extract_cart_token(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let rest = cookie.strip_prefix("cart=")?;
            let token = rest.split(';').next().unwrap_or(rest);
            (!token.is_empty()).then(|| token.to_string())
        })
}

/// Check the status of a cart response and parse its body.
async fn parse_cart_response(response: reqwest::Response) -> Result<AjaxCart, ShopError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ShopError::Status(status.as_u16()));
    }
    parse_json(response).await
}

/// Parse a JSON body, logging a truncated copy when it does not parse.
async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ShopError> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %text.chars().take(500).collect::<String>(),
            "Failed to parse platform response"
        );
        ShopError::Parse(e)
    })
}

/// Turn a rejected add into the most specific error available.
fn parse_add_rejection(status: u16, body: &str) -> ShopError {
    match serde_json::from_str::<AddRejection>(body) {
        Ok(rejection) => rejection
            .description
            .or(rejection.message)
            .map_or(ShopError::Status(status), ShopError::Rejected),
        Err(_) => ShopError::Status(status),
    }
}
