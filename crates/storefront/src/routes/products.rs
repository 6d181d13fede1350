//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::instrument;

use crate::catalog::Product;
use crate::error::AppError;
use crate::filters;
use crate::middleware::CspNonce;
use crate::state::AppState;
use crate::ui::sticky;

/// Product card display data for grid pages.
#[derive(Clone)]
pub struct ProductCardView {
    pub handle: String,
    pub title: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            price: product.price().display(),
            image_url: product.featured_image().map(String::from),
        }
    }
}

/// Variant display data for the size selector.
#[derive(Clone)]
pub struct VariantView {
    pub id: u64,
    pub size: String,
}

/// Product detail display data.
pub struct ProductView {
    pub handle: String,
    pub title: String,
    pub price: String,
    pub description: String,
    pub images: Vec<String>,
    pub variants: Vec<VariantView>,
    pub is_preorder: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            handle: product.handle.clone(),
            title: product.title.clone(),
            price: product.price().display(),
            description: product.description.clone(),
            images: product.images.clone(),
            variants: product
                .variants
                .iter()
                .map(|v| VariantView {
                    id: v.id.as_u64(),
                    size: v.size.clone(),
                })
                .collect(),
            is_preorder: product.collections.iter().any(|c| c == "preorder"),
        }
    }
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub nonce: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    /// Viewport threshold below which the details panel stays in flow.
    pub sticky_min_width: u32,
    /// Pinned panel offset from the viewport top, in pixels.
    pub sticky_top_offset: i64,
    /// Placement class for the initial render; the static script swaps it as
    /// the visitor scrolls.
    pub panel_class: &'static str,
    pub preorder_guide_url: Option<String>,
    pub nonce: String,
}

/// List all products.
#[instrument(skip(state, nonce))]
pub async fn index(State(state): State<AppState>, CspNonce(nonce): CspNonce) -> impl IntoResponse {
    let products = state
        .catalog()
        .products()
        .iter()
        .map(ProductCardView::from)
        .collect();

    ProductIndexTemplate { products, nonce }
}

/// Display a product detail page.
///
/// The sticky-panel thresholds are emitted as data attributes; the static
/// script applies the same placement transitions the server-side resolver
/// computes.
#[instrument(skip(state, nonce))]
pub async fn show(
    State(state): State<AppState>,
    Path(handle): Path<String>,
    CspNonce(nonce): CspNonce,
) -> Result<ProductShowTemplate, AppError> {
    let product = state
        .catalog()
        .product(&handle)
        .ok_or_else(|| AppError::NotFound(format!("product {handle}")))?;

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
        sticky_min_width: sticky::STICKY_MIN_VIEWPORT_WIDTH,
        sticky_top_offset: sticky::STICKY_TOP_OFFSET,
        panel_class: sticky::initial_placement().css_class(),
        preorder_guide_url: state.config().preorder_guide_url.clone(),
        nonce,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_product_view_projection() {
        let catalog = Catalog::seeded();
        let view = ProductView::from(catalog.product("elegant-blazer").unwrap());

        assert_eq!(view.price, "€285.00");
        assert_eq!(view.variants.len(), 4);
        assert_eq!(view.variants[1].size, "S");
        assert!(view.is_preorder);

        let blouse = ProductView::from(catalog.product("silk-blouse").unwrap());
        assert!(!blouse.is_preorder);
    }
}
