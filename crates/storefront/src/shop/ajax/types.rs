//! Wire types for the platform's AJAX endpoints.
//!
//! These mirror the JSON the platform actually sends; conversion into the
//! clean domain types happens in `conversions`.

use serde::{Deserialize, Serialize};

/// Cart resource returned by `GET /cart.js` and `POST /cart/change.js`.
#[derive(Debug, Clone, Deserialize)]
pub struct AjaxCart {
    /// Sum of line quantities, as reported by the platform.
    pub item_count: u32,
    /// Total price in the smallest currency unit.
    pub total_price: i64,
    /// Cart currency.
    pub currency: AjaxCurrency,
    /// Cart lines.
    #[serde(default)]
    pub items: Vec<AjaxLine>,
}

/// Currency block in the cart resource.
#[derive(Debug, Clone, Deserialize)]
pub struct AjaxCurrency {
    /// ISO 4217 code.
    pub iso_code: String,
}

/// One line in the cart resource.
#[derive(Debug, Clone, Deserialize)]
pub struct AjaxLine {
    /// Opaque composite line key.
    pub key: String,
    /// Line image URL.
    pub image: Option<String>,
    /// Full line title (product plus variant).
    pub title: String,
    /// Product title.
    pub product_title: String,
    /// Variant label; the platform sends "Default Title" for single-variant
    /// products.
    pub variant_title: Option<String>,
    /// Numeric variant ID.
    pub variant_id: u64,
    /// Line quantity.
    pub quantity: u32,
    /// Line price (unit price times quantity) in the smallest currency unit.
    pub line_price: i64,
}

/// Body of `POST /cart/change.js`.
#[derive(Debug, Serialize)]
pub struct ChangeRequest {
    /// Variant ID of the line to change.
    pub id: u64,
    /// New quantity; zero removes the line.
    pub quantity: i64,
}

/// Error payload the platform sends for a rejected `POST /cart/add.js`.
#[derive(Debug, Deserialize)]
pub struct AddRejection {
    /// Human-readable reason (e.g., "All 1 Elegant Blazer is in your cart.").
    pub description: Option<String>,
    /// Short machine-ish message (e.g., "Cart Error").
    pub message: Option<String>,
}

/// Response envelope of the predictive search endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictiveSearchResponse {
    pub resources: PredictiveResources,
}

/// `resources` block of the predictive search response.
#[derive(Debug, Deserialize)]
pub struct PredictiveResources {
    pub results: PredictiveResults,
}

/// `results` block of the predictive search response.
#[derive(Debug, Deserialize)]
pub struct PredictiveResults {
    #[serde(default)]
    pub products: Vec<SearchProduct>,
}

/// One product hit from predictive search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchProduct {
    /// URL of the product page on the platform.
    pub url: String,
    /// Product title.
    pub title: String,
    /// Thumbnail image, when the product has one.
    pub featured_image: Option<FeaturedImage>,
}

/// Featured image block of a search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_cart_resource() {
        let json = r#"{
            "item_count": 3,
            "total_price": 76500,
            "currency": { "iso_code": "EUR" },
            "items": [
                {
                    "key": "44906286710984:1a2b3c",
                    "image": "https://cdn.example.com/blazer.jpg",
                    "title": "Elegant Blazer - 38",
                    "product_title": "Elegant Blazer",
                    "variant_title": "38",
                    "variant_id": 44906286710984,
                    "quantity": 2,
                    "line_price": 57000
                },
                {
                    "key": "44906286710985:9f8e7d",
                    "image": null,
                    "title": "Silk Blouse",
                    "product_title": "Silk Blouse",
                    "variant_title": "Default Title",
                    "variant_id": 44906286710985,
                    "quantity": 1,
                    "line_price": 19500
                }
            ]
        }"#;

        let cart: AjaxCart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.item_count, 3);
        assert_eq!(cart.total_price, 76_500);
        assert_eq!(cart.currency.iso_code, "EUR");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0].variant_id, 44_906_286_710_984);
        assert_eq!(cart.items[1].variant_title.as_deref(), Some("Default Title"));
        assert!(cart.items[1].image.is_none());
    }

    #[test]
    fn test_deserialize_cart_without_items_field() {
        let json = r#"{
            "item_count": 0,
            "total_price": 0,
            "currency": { "iso_code": "USD" }
        }"#;
        let cart: AjaxCart = serde_json::from_str(json).unwrap();
        assert!(cart.items.is_empty());
    }

    #[test]
    fn test_serialize_change_request() {
        let body = ChangeRequest {
            id: 44_906_286_710_984,
            quantity: 0,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"id":44906286710984,"quantity":0}"#);
    }

    #[test]
    fn test_deserialize_add_rejection() {
        let json = r#"{"status":422,"message":"Cart Error","description":"The product is sold out"}"#;
        let rejection: AddRejection = serde_json::from_str(json).unwrap();
        assert_eq!(rejection.description.as_deref(), Some("The product is sold out"));
        assert_eq!(rejection.message.as_deref(), Some("Cart Error"));
    }

    #[test]
    fn test_deserialize_predictive_search_response() {
        let json = r#"{
            "resources": {
                "results": {
                    "products": [
                        {
                            "url": "/products/elegant-blazer",
                            "title": "Elegant Blazer",
                            "featured_image": { "url": "https://cdn.example.com/blazer.jpg" }
                        },
                        {
                            "url": "/products/silk-blouse",
                            "title": "Silk Blouse",
                            "featured_image": null
                        }
                    ]
                }
            }
        }"#;

        let response: PredictiveSearchResponse = serde_json::from_str(json).unwrap();
        let products = response.resources.results.products;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Elegant Blazer");
        assert!(products[1].featured_image.is_none());
    }
}
