//! Cart route handlers.
//!
//! The drawer, the count badge, and the checkout redirect all project the
//! platform's cart. Every mutation goes to the platform first and the drawer
//! is re-rendered from the authoritative cart it returns; nothing is updated
//! optimistically, so a failed call leaves the rendered state untouched.
//!
//! The platform identifies the cart by its `cart` cookie; that token lives
//! in the server session and is replayed on every call.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
};
use sable_core::{Cart, VariantId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error;
use crate::filters;
use crate::models::session_keys;
use crate::shop::ShopError;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub variant_id: u64,
    pub product_title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "€0.00".to_string(),
            item_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let currency = cart.currency();
        Self {
            items: cart
                .items()
                .iter()
                .map(|line| CartItemView {
                    variant_id: line.variant_id.as_u64(),
                    product_title: line.product_title.clone(),
                    variant_title: line.variant_title.clone(),
                    quantity: line.quantity,
                    unit_price: sable_core::Price::from_cents(line.unit_price_cents, currency)
                        .display(),
                    line_price: sable_core::Price::from_cents(line.line_price_cents, currency)
                        .display(),
                    image_url: line.image_url.clone(),
                })
                .collect(),
            subtotal: cart.total_price().display(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the platform cart token from the session.
pub(crate) async fn get_cart_token(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_TOKEN)
        .await
        .ok()
        .flatten()
}

/// Store a rotated cart token, when the platform set a new one.
async fn store_cart_token(session: &Session, rotated: Option<String>) {
    if let Some(token) = rotated {
        if let Err(e) = session.insert(session_keys::CART_TOKEN, token).await {
            tracing::error!("Failed to save cart token to session: {e}");
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub variant_id: u64,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub variant_id: u64,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub variant_id: u64,
}

/// Discount code form data.
#[derive(Debug, Deserialize)]
pub struct DiscountForm {
    #[serde(default)]
    pub code: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart drawer body fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the cart drawer body from the authoritative platform cart.
///
/// A failed fetch renders the inline error fragment rather than an empty
/// drawer, so a cart that exists on the platform is never shown as empty.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Response {
    match fetch_cart_view(&state, &session).await {
        Ok(cart) => CartItemsTemplate { cart }.into_response(),
        Err(e) => cart_error_response(&e),
    }
}

/// Cart count badge (HTMX).
///
/// A failed fetch returns an error status with no body; HTMX leaves the
/// previously rendered badge in place.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Response {
    match fetch_cart_view(&state, &session).await {
        Ok(cart) => CartCountTemplate {
            count: cart.item_count,
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Failed to fetch cart count: {e}");
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

/// Add a variant to the cart (HTMX).
///
/// Adds on the platform, then re-fetches the authoritative cart and renders
/// the drawer body. A platform rejection (sold out, bad variant) surfaces
/// its description; any other failure shows a generic message and leaves the
/// rendered cart as it was.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let token = get_cart_token(&session).await;
    let variant_id = VariantId::new(form.variant_id);
    let quantity = form.quantity.unwrap_or(1);

    error::add_breadcrumb(
        "cart",
        "Add to cart",
        Some(&[("variant_id", &variant_id.to_string())]),
    );

    let rotated = match state
        .shop()
        .add_to_cart(token.as_deref(), variant_id, quantity)
        .await
    {
        Ok(rotated) => rotated,
        Err(e) => return cart_error_response(&e),
    };
    store_cart_token(&session, rotated).await;

    // The add response carries only the added line; re-fetch for the drawer.
    refreshed_drawer(&state, &session).await
}

/// Set a line's quantity (HTMX). Zero removes the line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    change_line(&state, &session, VariantId::new(form.variant_id), form.quantity).await
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    change_line(&state, &session, VariantId::new(form.variant_id), 0).await
}

/// Redirect to the hosted checkout.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("https://{}/checkout", state.config().shop.store))
}

/// Apply a discount code: redirect to the hosted checkout with the code
/// attached. An empty code re-renders the panel with an inline message.
#[instrument(skip(state))]
pub async fn apply_discount(
    State(state): State<AppState>,
    Form(form): Form<DiscountForm>,
) -> Response {
    let code = form.code.trim();
    if code.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html("<p class=\"form-error\">Please enter a discount code.</p>".to_string()),
        )
            .into_response();
    }

    let mut url = format!("https://{}/checkout", state.config().shop.store);
    if let Ok(mut parsed) = url::Url::parse(&url) {
        parsed.query_pairs_mut().append_pair("discount", code);
        url = parsed.into();
    }

    // HTMX follows HX-Redirect with a full page navigation.
    (AppendHeaders([("HX-Redirect", url)]), StatusCode::OK).into_response()
}

// =============================================================================
// Shared plumbing
// =============================================================================

/// Fetch the platform cart as view data.
///
/// No stored token means no cart exists yet, which renders as empty; with a
/// token present a fetch failure is an error, never an empty cart.
async fn fetch_cart_view(state: &AppState, session: &Session) -> Result<CartView, ShopError> {
    let Some(token) = get_cart_token(session).await else {
        return Ok(CartView::empty());
    };

    let fetched = state.shop().get_cart(Some(&token)).await?;
    store_cart_token(session, fetched.cart_token).await;
    Ok(CartView::from(&fetched.cart))
}

/// Run a change on the platform and render the updated drawer body.
async fn change_line(
    state: &AppState,
    session: &Session,
    variant_id: VariantId,
    quantity: i64,
) -> Response {
    let token = get_cart_token(session).await;

    match state
        .shop()
        .change_line(token.as_deref(), variant_id, quantity)
        .await
    {
        Ok(fetched) => {
            store_cart_token(session, fetched.cart_token).await;
            (
                AppendHeaders([("HX-Trigger", "cart-updated")]),
                CartItemsTemplate {
                    cart: CartView::from(&fetched.cart),
                },
            )
                .into_response()
        }
        Err(e) => cart_error_response(&e),
    }
}

/// Re-fetch the cart and render the drawer body with a count trigger.
async fn refreshed_drawer(state: &AppState, session: &Session) -> Response {
    match fetch_cart_view(state, session).await {
        Ok(cart) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate { cart },
        )
            .into_response(),
        Err(e) => cart_error_response(&e),
    }
}

/// Render a failed platform call as an inline error fragment.
///
/// Swapped into the drawer's error slot; the line list is not replaced, so
/// the previously rendered state stays visible.
fn cart_error_response(error: &ShopError) -> Response {
    tracing::error!("Cart call failed: {error}");

    let status = match error {
        ShopError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
    };
    let message = error.user_message();

    (
        status,
        AppendHeaders([("HX-Reswap", "innerHTML"), ("HX-Retarget", "#cart-error")]),
        Html(format!("<p class=\"cart-error\">{}</p>", escape_html(&message))),
    )
        .into_response()
}

/// Minimal HTML escaping for platform-supplied error text.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::{CartItem, Currency, LineKey};

    fn sample_cart() -> Cart {
        Cart::from_items(
            Currency::Eur,
            vec![
                CartItem {
                    key: LineKey::new("a:1"),
                    variant_id: VariantId::new(1),
                    product_title: "Elegant Blazer".to_string(),
                    variant_title: Some("M".to_string()),
                    image_url: Some("https://cdn.shopify.com/x.jpg".to_string()),
                    unit_price_cents: 28_500,
                    line_price_cents: 57_000,
                    quantity: 2,
                },
                CartItem {
                    key: LineKey::new("b:2"),
                    variant_id: VariantId::new(2),
                    product_title: "Silk Blouse".to_string(),
                    variant_title: None,
                    image_url: None,
                    unit_price_cents: 19_500,
                    line_price_cents: 19_500,
                    quantity: 1,
                },
            ],
        )
    }

    #[test]
    fn test_cart_view_projection() {
        let view = CartView::from(&sample_cart());
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "€765.00");
        assert_eq!(view.items[0].line_price, "€570.00");
        assert_eq!(view.items[0].unit_price, "€285.00");
        assert!(view.items[1].variant_title.is_none());
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.subtotal, "€0.00");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"sold\" & gone</b>"),
            "&lt;b&gt;&quot;sold&quot; &amp; gone&lt;/b&gt;"
        );
    }
}
