//! Access gate ("buyers only") route handlers.
//!
//! A shared code keeps gated collections out of casual view. The comparison
//! happens server-side and the pass is a session flag, but this remains a
//! cosmetic deterrent: anyone handed the code is in, and nothing behind the
//! gate is sensitive. Real access control would need authentication.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::models::session_keys;
use crate::state::AppState;

/// Gate code form data.
#[derive(Debug, Deserialize)]
pub struct GateForm {
    #[serde(default)]
    pub code: String,
}

/// Gate page template.
#[derive(Template, WebTemplate)]
#[template(path = "gate/show.html")]
pub struct GateTemplate {
    pub error: Option<String>,
    pub nonce: String,
}

/// Whether this session has passed the gate.
pub async fn has_access(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::GATE_PASSED)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Display the code-entry page.
///
/// With no gate configured there is nothing to guard; sends the visitor to
/// the configured destination directly.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
) -> Response {
    if !state.config().gate.enabled() || has_access(&session).await {
        return Redirect::to(&state.config().gate.redirect_url).into_response();
    }

    GateTemplate { error: None, nonce }.into_response()
}

/// Check a submitted code.
///
/// A match sets the session flag and redirects to the configured URL; a
/// mismatch re-renders the page with inline error text and no navigation.
#[instrument(skip(state, session, nonce, form))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    CspNonce(nonce): CspNonce,
    Form(form): Form<GateForm>,
) -> Response {
    let gate = &state.config().gate;

    if gate.matches(&form.code) {
        if let Err(e) = session.insert(session_keys::GATE_PASSED, true).await {
            tracing::error!("Failed to save gate flag to session: {e}");
        }
        return Redirect::to(&gate.redirect_url).into_response();
    }

    tracing::info!("Gate code mismatch");
    GateTemplate {
        error: Some("That code is not valid. Please check it and try again.".to_string()),
        nonce,
    }
    .into_response()
}
