//! In-memory demo catalog.
//!
//! The storefront's own logic is cart synchronization and small UI state
//! machines; the catalog behind the grid, detail, and collection pages is a
//! fixed seeded set, so lookups and sorting are trivial scans.

use sable_core::{Currency, Price, VariantId};

/// A purchasable size of a product.
#[derive(Debug, Clone)]
pub struct ProductVariant {
    /// Platform variant ID, submitted on add-to-cart.
    pub id: VariantId,
    /// Size label shown on the selector.
    pub size: String,
}

/// A catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    /// URL handle, unique within the catalog.
    pub handle: String,
    pub title: String,
    /// Unit price in minor units.
    pub price_cents: i64,
    pub currency: Currency,
    /// Gallery images; the first is the featured image.
    pub images: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub description: String,
    /// Collections this product appears in.
    pub collections: Vec<String>,
}

impl Product {
    /// Formatted unit price, e.g. `€285.00`.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::from_cents(self.price_cents, self.currency)
    }

    /// The featured image, when the product has one.
    #[must_use]
    pub fn featured_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Collection sort order, parsed from the `sort_by` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Featured,
    PriceAscending,
    PriceDescending,
    TitleAscending,
    TitleDescending,
}

impl SortOrder {
    /// Parse a `sort_by` value; unknown values fall back to featured order.
    #[must_use]
    pub fn from_query(value: &str) -> Self {
        match value {
            "price-ascending" => Self::PriceAscending,
            "price-descending" => Self::PriceDescending,
            "title-ascending" => Self::TitleAscending,
            "title-descending" => Self::TitleDescending,
            _ => Self::Featured,
        }
    }

    /// The query value for this order.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
            Self::TitleAscending => "title-ascending",
            Self::TitleDescending => "title-descending",
        }
    }

    /// Label shown in the sort select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Featured",
            Self::PriceAscending => "Price, low to high",
            Self::PriceDescending => "Price, high to low",
            Self::TitleAscending => "Alphabetically, A-Z",
            Self::TitleDescending => "Alphabetically, Z-A",
        }
    }

    /// All orders, in select-menu display order.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::TitleAscending,
        Self::TitleDescending,
    ];
}

/// A named collection of products.
#[derive(Debug, Clone)]
pub struct Collection {
    pub handle: String,
    pub title: String,
}

/// The seeded product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    collections: Vec<Collection>,
}

impl Catalog {
    /// Build the seeded demo catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            products: seed_products(),
            collections: vec![
                Collection {
                    handle: "fall-winter".to_string(),
                    title: "Fall / Winter".to_string(),
                },
                Collection {
                    handle: "preorder".to_string(),
                    title: "Preorder".to_string(),
                },
            ],
        }
    }

    /// All products in featured order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by handle.
    #[must_use]
    pub fn product(&self, handle: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.handle == handle)
    }

    /// Look up a collection by handle.
    #[must_use]
    pub fn collection(&self, handle: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.handle == handle)
    }

    /// Products in a collection, sorted.
    #[must_use]
    pub fn collection_products(&self, handle: &str, sort: SortOrder) -> Vec<&Product> {
        let mut products: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.collections.iter().any(|c| c == handle))
            .collect();
        sort_products(&mut products, sort);
        products
    }
}

fn sort_products(products: &mut [&Product], sort: SortOrder) {
    match sort {
        // Featured keeps seeded order.
        SortOrder::Featured => {}
        SortOrder::PriceAscending => products.sort_by_key(|p| p.price_cents),
        SortOrder::PriceDescending => {
            products.sort_by_key(|p| std::cmp::Reverse(p.price_cents));
        }
        SortOrder::TitleAscending => products.sort_by(|a, b| a.title.cmp(&b.title)),
        SortOrder::TitleDescending => products.sort_by(|a, b| b.title.cmp(&a.title)),
    }
}

const SIZES: [&str; 4] = ["XS", "S", "M", "L"];

fn seed_products() -> Vec<Product> {
    let seed = [
        (
            "elegant-blazer",
            "Elegant Blazer",
            28_500_i64,
            41_000_100_001_u64,
            "Structured single-breasted blazer in Italian virgin wool, \
             half-lined with horn buttons.",
            &["fall-winter", "preorder"][..],
        ),
        (
            "silk-blouse",
            "Silk Blouse",
            19_500,
            41_000_100_101,
            "Fluid sandwashed silk blouse with covered placket and \
             French cuffs.",
            &["fall-winter"],
        ),
        (
            "tailored-trousers",
            "Tailored Trousers",
            24_000,
            41_000_100_201,
            "High-rise trousers with a pressed crease and a tapered leg, \
             cut from wool gabardine.",
            &["fall-winter"],
        ),
        (
            "cashmere-sweater",
            "Cashmere Sweater",
            32_000,
            41_000_100_301,
            "Two-ply Mongolian cashmere crewneck, fully fashioned and \
             garment dyed.",
            &["fall-winter", "preorder"],
        ),
    ];

    seed.into_iter()
        .map(|(handle, title, price_cents, variant_base, description, collections)| {
            let variants = SIZES
                .iter()
                .enumerate()
                .map(|(i, size)| ProductVariant {
                    id: VariantId::new(variant_base + i as u64),
                    size: (*size).to_string(),
                })
                .collect();

            Product {
                handle: handle.to_string(),
                title: title.to_string(),
                price_cents,
                currency: Currency::Eur,
                images: vec![
                    format!("/static/img/products/{handle}-1.jpg"),
                    format!("/static/img/products/{handle}-2.jpg"),
                    format!("/static/img/products/{handle}-3.jpg"),
                ],
                variants,
                description: description.to_string(),
                collections: collections.iter().map(ToString::to_string).collect(),
            }
        })
        .collect()
}
