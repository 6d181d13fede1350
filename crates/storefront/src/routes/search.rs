//! Predictive search route handlers.
//!
//! The search overlay's input drives this fragment endpoint declaratively:
//! the input debounces for 180 ms and replaces its in-flight request, so only
//! the latest query's response is ever swapped in. Queries under two
//! characters never reach the platform.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::shop::SearchProduct;
use crate::state::AppState;

/// Shortest query that triggers a platform call.
pub const MIN_QUERY_LENGTH: usize = 2;

/// Most results rendered in the overlay panel.
pub const MAX_RESULTS: usize = 6;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// A predictive search hit for templates.
#[derive(Clone)]
pub struct SearchResultView {
    pub url: String,
    pub title: String,
    pub image_url: Option<String>,
}

impl From<SearchProduct> for SearchResultView {
    fn from(product: SearchProduct) -> Self {
        Self {
            url: product.url,
            title: product.title,
            image_url: product.featured_image.map(|image| image.url),
        }
    }
}

/// Search suggestions fragment (HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/search_results.html")]
pub struct SearchResultsTemplate {
    pub query: String,
    pub results: Vec<SearchResultView>,
    /// Whether a platform search actually ran; gates the no-results message
    /// so short queries and failures render a bare cleared panel.
    pub searched: bool,
}

/// Predictive search suggestions.
///
/// Short queries short-circuit to an empty panel without touching the
/// platform. Platform failures also render the empty panel: stale results
/// are cleared rather than surfaced as an error.
#[instrument(skip(state), fields(query_len = query.q.trim().len()))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let q = query.q.trim();

    if q.chars().count() < MIN_QUERY_LENGTH {
        return SearchResultsTemplate {
            query: q.to_string(),
            results: Vec::new(),
            searched: false,
        };
    }

    let (results, searched) = match state.shop().predictive_search(q, MAX_RESULTS).await {
        Ok(products) => (
            products.into_iter().map(SearchResultView::from).collect(),
            true,
        ),
        Err(e) => {
            tracing::warn!("Predictive search failed: {e}");
            (Vec::new(), false)
        }
    };

    SearchResultsTemplate {
        query: q.to_string(),
        results,
        searched,
    }
}
