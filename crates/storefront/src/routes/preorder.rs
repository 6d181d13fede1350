//! Preorder page handler.
//!
//! Renders the "how preordering works" steps as a carousel: the active
//! slide comes from the query string and the prev/next/dot controls are
//! plain links, so the wraparound works before any script loads.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;
use crate::ui::Carousel;

/// The preorder explainer steps, in display order.
const STEPS: [(&str, &str); 4] = [
    (
        "Choose your piece",
        "Browse the preorder collection and pick your size while the run is open.",
    ),
    (
        "Place your preorder",
        "Pay up front to reserve your piece; the run closes when the window ends.",
    ),
    (
        "We cut and sew",
        "Production starts once the window closes, in the exact quantities ordered.",
    ),
    (
        "Delivered to you",
        "Your order ships as soon as the run leaves the atelier, typically 6-8 weeks.",
    ),
];

/// Preorder page query parameters.
#[derive(Debug, Deserialize)]
pub struct PreorderQuery {
    #[serde(default)]
    pub step: usize,
}

/// One carousel slide for templates.
pub struct StepView {
    pub index: usize,
    pub title: &'static str,
    pub body: &'static str,
    pub active: bool,
}

/// Preorder page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/preorder.html")]
pub struct PreorderTemplate {
    pub steps: Vec<StepView>,
    pub current: usize,
    pub prev: usize,
    pub next: usize,
    pub guide_url: Option<String>,
    pub nonce: String,
}

/// Display the preorder page with the step carousel.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Query(query): Query<PreorderQuery>,
    CspNonce(nonce): CspNonce,
) -> impl IntoResponse {
    let carousel = Carousel::new(STEPS.len(), query.step);

    let steps = STEPS
        .iter()
        .enumerate()
        .map(|(index, &(title, body))| StepView {
            index,
            title,
            body,
            active: carousel.is_active(index),
        })
        .collect();

    PreorderTemplate {
        steps,
        current: carousel.current(),
        prev: carousel.prev(),
        next: carousel.next(),
        guide_url: state.config().preorder_guide_url.clone(),
        nonce,
    }
}
