//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, http::HeaderMap, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::newsletter;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductCardView>,
    /// Whether the newsletter popup markup is rendered at all.
    pub show_popup: bool,
    /// Popup open delay, milliseconds, emitted as a data attribute.
    pub popup_delay_ms: u64,
    pub nonce: String,
}

/// Display the home page.
///
/// The newsletter popup is omitted entirely while the dismissal cookie is
/// present; once the cookie expires the markup comes back and the popup
/// reopens after its configured delay.
#[instrument(skip(state, headers, nonce))]
pub async fn home(
    State(state): State<AppState>,
    headers: HeaderMap,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    let products = state
        .catalog()
        .products()
        .iter()
        .map(ProductCardView::from)
        .collect();

    HomeTemplate {
        products,
        show_popup: !newsletter::is_dismissed(&headers),
        popup_delay_ms: state.config().popup.delay_ms,
        nonce,
    }
}
