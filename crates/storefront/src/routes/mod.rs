//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (grid + newsletter popup)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing
//! GET  /products/{handle}      - Product detail (gallery, sticky panel)
//! GET  /collections            - Collection listing
//! GET  /collections/{handle}   - Collection detail (sort_by, gate check)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart drawer body
//! POST /cart/add               - Add variant (re-renders drawer)
//! POST /cart/update            - Set line quantity (0 removes)
//! POST /cart/remove            - Remove line
//! GET  /cart/count             - Cart count badge
//! POST /cart/discount          - Apply discount code (redirect to checkout)
//!
//! # Checkout
//! GET  /checkout               - Redirect to hosted checkout
//!
//! # Search
//! GET  /search/suggest         - Predictive search fragment
//!
//! # Gate
//! GET  /gate                   - Code-entry page
//! POST /gate                   - Check code
//!
//! # Newsletter
//! POST /newsletter/subscribe   - Subscribe (fragment)
//! POST /newsletter/dismiss     - Set dismissal cookie
//!
//! # Preorder
//! GET  /preorder               - Step carousel page
//! ```

pub mod cart;
pub mod collections;
pub mod gate;
pub mod home;
pub mod newsletter;
pub mod preorder;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{handle}", get(products::show))
}

/// Create the collection routes router.
pub fn collection_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(collections::index))
        .route("/{handle}", get(collections::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/discount", post(cart::apply_discount))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/products", product_routes())
        .nest("/collections", collection_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", get(cart::checkout))
        .route("/search/suggest", get(search::suggest))
        .route("/gate", get(gate::show).post(gate::submit))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/newsletter/dismiss", post(newsletter::dismiss))
        .route("/preorder", get(preorder::show))
}
