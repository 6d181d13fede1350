//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{Collection, SortOrder};
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::routes::gate;
use crate::routes::products::ProductCardView;
use crate::state::AppState;

/// Collection page query parameters.
#[derive(Debug, Deserialize)]
pub struct CollectionQuery {
    #[serde(default)]
    pub sort_by: String,
}

/// A sort option for the select menu.
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Collection listing template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionIndexTemplate {
    pub collections: Vec<CollectionCardView>,
    pub nonce: String,
}

/// Collection card display data.
pub struct CollectionCardView {
    pub handle: String,
    pub title: String,
}

/// Collection detail template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/show.html")]
pub struct CollectionShowTemplate {
    pub title: String,
    pub products: Vec<ProductCardView>,
    pub sort_options: Vec<SortOptionView>,
    pub nonce: String,
}

impl From<&Collection> for CollectionCardView {
    fn from(collection: &Collection) -> Self {
        Self {
            handle: collection.handle.clone(),
            title: collection.title.clone(),
        }
    }
}

/// List all collections.
#[instrument(skip(state, nonce))]
pub async fn index(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    let collections = ["fall-winter", "preorder"]
        .iter()
        .filter_map(|handle| state.catalog().collection(handle))
        .map(CollectionCardView::from)
        .collect();

    CollectionIndexTemplate { collections, nonce }
}

/// Display a collection, sorted per the `sort_by` query parameter.
///
/// Gated collections redirect to the gate page until the session holds the
/// gate flag.
#[instrument(skip(state, session, nonce))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(handle): Path<String>,
    Query(query): Query<CollectionQuery>,
    CspNonce(nonce): CspNonce,
) -> Result<Response, AppError> {
    if state.config().gate.is_gated(&handle) && !gate::has_access(&session).await {
        return Ok(Redirect::to("/gate").into_response());
    }

    let collection = state
        .catalog()
        .collection(&handle)
        .ok_or_else(|| AppError::NotFound(format!("collection {handle}")))?;

    let sort = SortOrder::from_query(&query.sort_by);
    let products = state
        .catalog()
        .collection_products(&handle, sort)
        .into_iter()
        .map(ProductCardView::from)
        .collect();

    let sort_options = SortOrder::ALL
        .into_iter()
        .map(|order| SortOptionView {
            value: order.as_query(),
            label: order.label(),
            selected: order == sort,
        })
        .collect();

    Ok(CollectionShowTemplate {
        title: collection.title.clone(),
        products,
        sort_options,
        nonce,
    }
    .into_response())
}
