//! Integration tests for `AjaxClient` against a mock platform.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers cart reads, both mutation endpoints with
//! their exact wire formats, cart cookie handling, and predictive search.

use sable_core::VariantId;
use sable_storefront::shop::{AjaxClient, ShopError};
use serde_json::json;
use wiremock::matchers::{
    body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A two-line cart fixture in the platform's `/cart.js` shape.
fn cart_json() -> serde_json::Value {
    json!({
        "item_count": 3,
        "total_price": 76500,
        "currency": { "iso_code": "EUR" },
        "items": [
            {
                "key": "41000100001:abc",
                "image": "https://cdn.shopify.com/blazer.jpg",
                "title": "Elegant Blazer - M",
                "product_title": "Elegant Blazer",
                "variant_title": "M",
                "variant_id": 41_000_100_001_u64,
                "quantity": 2,
                "line_price": 57000
            },
            {
                "key": "41000100101:def",
                "image": null,
                "title": "Silk Blouse",
                "product_title": "Silk Blouse",
                "variant_title": "Default Title",
                "variant_id": 41_000_100_101_u64,
                "quantity": 1,
                "line_price": 19500
            }
        ]
    })
}

// ---------------------------------------------------------------------------
// GET /cart.js
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_cart_parses_platform_response_into_domain_cart() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&cart_json()))
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let fetched = client.get_cart(None).await.expect("get_cart failed");

    assert_eq!(fetched.cart.item_count(), 3);
    assert_eq!(fetched.cart.total_price_cents(), 76_500);
    assert_eq!(fetched.cart.total_price().display(), "€765.00");

    let items = fetched.cart.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].variant_title.as_deref(), Some("M"));
    assert_eq!(items[0].unit_price_cents, 28_500);
    // "Default Title" is the platform's placeholder for single-variant products
    assert!(items[1].variant_title.is_none());
}

#[tokio::test]
async fn get_cart_sends_cart_cookie_and_captures_rotation() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .and(header("cookie", "cart=old-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&cart_json())
                .insert_header("set-cookie", "cart=new-token; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let fetched = client
        .get_cart(Some("old-token"))
        .await
        .expect("get_cart failed");

    assert_eq!(fetched.cart_token.as_deref(), Some("new-token"));
}

#[tokio::test]
async fn get_cart_maps_server_error_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cart.js"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let err = client.get_cart(None).await.expect_err("expected failure");

    assert!(matches!(err, ShopError::Status(502)), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// POST /cart/change.js
// ---------------------------------------------------------------------------

#[tokio::test]
async fn change_line_posts_id_and_quantity_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/change.js"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&cart_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let fetched = client
        .change_line(None, VariantId::new(41_000_100_001), 2)
        .await
        .expect("change_line failed");

    assert_eq!(fetched.cart.item_count(), 3);

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    let body: serde_json::Value =
        serde_json::from_slice(&requests[0].body).expect("JSON body");
    assert_eq!(body, json!({ "id": 41_000_100_001_u64, "quantity": 2 }));
}

#[tokio::test]
async fn change_line_treats_any_non_2xx_as_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/change.js"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&json!({
            "message": "Cart Error",
            "description": "Cart item not found"
        })))
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let err = client
        .change_line(None, VariantId::new(99), 1)
        .await
        .expect_err("expected failure");

    assert!(matches!(err, ShopError::Status(404)), "got: {err:?}");
}

// ---------------------------------------------------------------------------
// POST /cart/add.js
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_to_cart_posts_form_encoded_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .and(header(
            "content-type",
            "application/x-www-form-urlencoded",
        ))
        .and(body_string_contains("id=41000100001"))
        .and(body_string_contains("quantity=1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "key": "41000100001:abc", "quantity": 1 }))
                .insert_header("set-cookie", "cart=fresh-token; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let rotated = client
        .add_to_cart(None, VariantId::new(41_000_100_001), 1)
        .await
        .expect("add_to_cart failed");

    assert_eq!(rotated.as_deref(), Some("fresh-token"));
}

#[tokio::test]
async fn add_to_cart_surfaces_rejection_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/add.js"))
        .respond_with(ResponseTemplate::new(422).set_body_json(&json!({
            "status": 422,
            "message": "Cart Error",
            "description": "The product 'Elegant Blazer' is already sold out."
        })))
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let err = client
        .add_to_cart(None, VariantId::new(41_000_100_001), 1)
        .await
        .expect_err("expected rejection");

    match err {
        ShopError::Rejected(ref description) => {
            assert_eq!(description, "The product 'Elegant Blazer' is already sold out.");
            // The rejection text is what the drawer shows the visitor
            assert_eq!(err.user_message(), *description);
        }
        other => panic!("expected Rejected, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// GET /search/suggest.json
// ---------------------------------------------------------------------------

#[tokio::test]
async fn predictive_search_sends_exact_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/suggest.json"))
        .and(query_param("q", "blazer"))
        .and(query_param("resources[type]", "product"))
        .and(query_param("resources[limit]", "6"))
        .and(query_param(
            "resources[options][unavailable_products]",
            "hide",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "resources": {
                "results": {
                    "products": [
                        {
                            "url": "/products/elegant-blazer",
                            "title": "Elegant Blazer",
                            "featured_image": { "url": "https://cdn.shopify.com/blazer.jpg" }
                        },
                        {
                            "url": "/products/cropped-blazer",
                            "title": "Cropped Blazer",
                            "featured_image": null
                        }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let results = client
        .predictive_search("blazer", 6)
        .await
        .expect("search failed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Elegant Blazer");
    assert!(results[1].featured_image.is_none());
}

#[tokio::test]
async fn predictive_search_caches_repeated_queries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/suggest.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "resources": { "results": { "products": [] } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    client.predictive_search("silk", 6).await.expect("first call");
    // Normalization folds case and surrounding whitespace into the same key
    client
        .predictive_search(" SILK ", 6)
        .await
        .expect("second call");
}

#[tokio::test]
async fn predictive_search_failure_is_an_error_not_a_panic() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/suggest.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AjaxClient::new(server.uri());
    let err = client
        .predictive_search("blazer", 6)
        .await
        .expect_err("expected failure");

    assert!(matches!(err, ShopError::Status(500)), "got: {err:?}");
}
