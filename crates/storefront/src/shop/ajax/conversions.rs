//! Conversions from wire types into the domain cart aggregate.

use sable_core::{Cart, CartItem, Currency, LineKey, VariantId};

use super::types::{AjaxCart, AjaxLine};
use crate::shop::ShopError;

/// Convert a platform cart resource into the domain [`Cart`].
///
/// The platform's own `item_count`/`total_price` fields are discarded: the
/// aggregate derives both from the line list, so there is no second copy of
/// the truth to drift.
pub fn convert_cart(ajax: AjaxCart) -> Result<Cart, ShopError> {
    let currency = Currency::from_iso_code(&ajax.currency.iso_code)?;
    let items = ajax.items.into_iter().filter_map(convert_line).collect();
    Ok(Cart::from_items(currency, items))
}

/// Convert one cart line. Lines the platform reports with a zero quantity
/// are dropped.
///
/// The platform's `line_price` already includes line-level discounts, so it
/// is carried as-is; the unit price derived from it is for display only and
/// may round down.
fn convert_line(line: AjaxLine) -> Option<CartItem> {
    if line.quantity == 0 {
        return None;
    }
    Some(CartItem {
        key: LineKey::new(line.key),
        variant_id: VariantId::new(line.variant_id),
        product_title: line.product_title,
        variant_title: normalize_variant_title(line.variant_title),
        image_url: line.image,
        unit_price_cents: line.line_price / i64::from(line.quantity),
        line_price_cents: line.line_price,
        quantity: line.quantity,
    })
}

/// The platform reports "Default Title" for single-variant products; the
/// drawer hides that label.
fn normalize_variant_title(title: Option<String>) -> Option<String> {
    title.filter(|t| t != "Default Title")
}
