//! Newsletter popup and subscription handlers.
//!
//! The popup's dismissal is persisted as a cookie so it stays closed across
//! visits until the configured window runs out. Subscription has no platform
//! endpoint in the surface this storefront talks to; submissions are
//! validated, logged, and acknowledged.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;

/// Name of the popup dismissal cookie.
pub const DISMISSAL_COOKIE: &str = "newsletter_dismissed";

/// Value the dismissal cookie carries.
const DISMISSAL_VALUE: &str = "1";

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    #[serde(default)]
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Whether the request carries a live dismissal cookie.
#[must_use]
pub fn is_dismissed(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == DISMISSAL_COOKIE && value == DISMISSAL_VALUE)
}

/// Dismiss the popup.
///
/// Sets the dismissal cookie for the configured number of days. The popup's
/// markup is omitted from pages while the cookie is live, so it cannot
/// reopen until the window expires.
#[instrument(skip(state))]
pub async fn dismiss(State(state): State<AppState>) -> Response {
    let cookie = format!(
        "{DISMISSAL_COOKIE}={DISMISSAL_VALUE}; Max-Age={}; Path=/; SameSite=Lax",
        state.config().popup.cookie_max_age_secs()
    );

    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        StatusCode::NO_CONTENT,
    )
        .into_response()
}

/// Subscribe to the newsletter (HTMX).
#[instrument(fields(email = %form.email))]
pub async fn subscribe(Form(form): Form<SubscribeForm>) -> Response {
    let email = form.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return SubscribeErrorTemplate {
            message: "Please enter a valid email address.".to_string(),
            email,
        }
        .into_response();
    }

    tracing::info!(email = %email, "Newsletter subscription received");
    SubscribeSuccessTemplate { email }.into_response()
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    // Simple validation: contains @, has content before and after @
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}
