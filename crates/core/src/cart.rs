//! The cart aggregate.
//!
//! One state-management module consumed by every view renderer. The drawer,
//! the count badge, and the cart page all project the same [`Cart`] value;
//! `item_count` and `total_price` are derived from the line list on every
//! observation, never stored alongside it.
//!
//! Mutations are keyed by [`VariantId`], matching how the platform's
//! `/cart/change.js` endpoint addresses lines. Setting a quantity of zero
//! (or less) removes the line entirely; the aggregate never holds a line
//! with a non-positive quantity.

use crate::types::{Currency, LineKey, Price, VariantId};

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    /// Opaque line key assigned by the platform.
    pub key: LineKey,
    /// Variant this line purchases.
    pub variant_id: VariantId,
    /// Product title.
    pub product_title: String,
    /// Variant label, if the variant is not the product's only configuration.
    pub variant_title: Option<String>,
    /// Line image URL.
    pub image_url: Option<String>,
    /// Unit price in the smallest currency unit, for per-item display.
    pub unit_price_cents: i64,
    /// Line price in the smallest currency unit, as the platform reported it.
    ///
    /// Carried separately from the unit price because line-level discounts
    /// make it more than a multiplication; totals sum this field.
    pub line_price_cents: i64,
    /// Quantity, always >= 1 while the line is in the cart.
    pub quantity: u32,
}

/// Ordered collection of cart lines with derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    currency: Currency,
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub const fn new(currency: Currency) -> Self {
        Self {
            currency,
            items: Vec::new(),
        }
    }

    /// Create a cart from already-validated lines.
    ///
    /// Lines with a zero quantity are dropped so the aggregate's invariant
    /// holds regardless of what the caller hands in.
    #[must_use]
    pub fn from_items(currency: Currency, items: Vec<CartItem>) -> Self {
        Self {
            currency,
            items: items.into_iter().filter(|i| i.quantity > 0).collect(),
        }
    }

    /// The cart currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// The cart lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count: the sum of line quantities.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Total price in the smallest currency unit: the sum of line prices.
    #[must_use]
    pub fn total_price_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_price_cents).sum()
    }

    /// Total price as a displayable [`Price`].
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::from_cents(self.total_price_cents(), self.currency)
    }

    /// Append an item, or increment the quantity of an existing line for the
    /// same variant.
    pub fn add_item(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.variant_id == item.variant_id)
        {
            existing.quantity += item.quantity;
            existing.line_price_cents += item.line_price_cents;
        } else {
            self.items.push(item);
        }
    }

    /// Set the quantity of the line for `variant_id`.
    ///
    /// A quantity of zero or less removes the line. Setting a quantity for a
    /// variant that is not in the cart is a no-op. The line price is
    /// recomputed from the unit price; the next platform fetch replaces it
    /// with the authoritative value.
    pub fn set_quantity(&mut self, variant_id: VariantId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(variant_id);
            return;
        }
        if let Some(existing) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            existing.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            existing.line_price_cents =
                existing.unit_price_cents * i64::from(existing.quantity);
        }
    }

    /// Remove the line for `variant_id`, if present.
    pub fn remove_item(&mut self, variant_id: VariantId) {
        self.items.retain(|i| i.variant_id != variant_id);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(variant: u64, unit_cents: i64, quantity: u32) -> CartItem {
        CartItem {
            key: LineKey::new(format!("{variant}:key")),
            variant_id: VariantId::new(variant),
            product_title: format!("Product {variant}"),
            variant_title: Some("M".to_string()),
            image_url: None,
            unit_price_cents: unit_cents,
            line_price_cents: unit_cents * i64::from(quantity),
            quantity,
        }
    }

    /// Derived totals must equal the sums over the line list at every
    /// observation point.
    fn assert_derived_invariant(cart: &Cart) {
        let count: u32 = cart.items().iter().map(|i| i.quantity).sum();
        let total: i64 = cart.items().iter().map(|i| i.line_price_cents).sum();
        assert_eq!(cart.item_count(), count);
        assert_eq!(cart.total_price_cents(), total);
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new(Currency::Eur);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price().display(), "€0.00");
    }

    #[test]
    fn test_add_item_appends_and_merges() {
        let mut cart = Cart::new(Currency::Eur);

        cart.add_item(item(1, 28_500, 1));
        cart.add_item(item(2, 19_500, 2));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_derived_invariant(&cart);

        // Same variant merges into the existing line instead of duplicating it
        cart.add_item(item(1, 28_500, 1));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_price_cents(), 2 * 28_500 + 2 * 19_500);
        assert_derived_invariant(&cart);
    }

    #[test]
    fn test_set_quantity_updates_totals() {
        let mut cart = Cart::new(Currency::Usd);
        cart.add_item(item(1, 1_000, 1));

        cart.set_quantity(VariantId::new(1), 5);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total_price_cents(), 5_000);
        assert_derived_invariant(&cart);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new(Currency::Usd);
        cart.add_item(item(1, 1_000, 3));

        cart.set_quantity(VariantId::new(1), 0);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price_cents(), 0);
    }

    #[test]
    fn test_set_quantity_negative_never_leaves_negative_line() {
        let mut cart = Cart::new(Currency::Usd);
        cart.add_item(item(1, 1_000, 3));

        cart.set_quantity(VariantId::new(1), -4);
        assert!(cart.is_empty());
        assert!(cart.items().iter().all(|i| i.quantity > 0));
    }

    #[test]
    fn test_set_quantity_unknown_variant_is_noop() {
        let mut cart = Cart::new(Currency::Usd);
        cart.add_item(item(1, 1_000, 1));

        cart.set_quantity(VariantId::new(99), 7);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = Cart::new(Currency::Eur);
        cart.add_item(item(1, 28_500, 1));
        cart.add_item(item(2, 19_500, 1));

        cart.remove_item(VariantId::new(1));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].variant_id, VariantId::new(2));
        assert_derived_invariant(&cart);
    }

    #[test]
    fn test_invariant_holds_across_mutation_sequences() {
        let mut cart = Cart::new(Currency::Eur);
        let ops: &[(&str, u64, i64)] = &[
            ("add", 1, 1),
            ("add", 2, 2),
            ("set", 1, 4),
            ("add", 3, 1),
            ("remove", 2, 0),
            ("set", 3, 0),
            ("add", 2, 5),
            ("set", 2, -1),
            ("add", 1, 1),
        ];

        for &(op, variant, n) in ops {
            match op {
                "add" => cart.add_item(item(variant, 10_000 + i64::try_from(variant).unwrap(), u32::try_from(n).unwrap())),
                "set" => cart.set_quantity(VariantId::new(variant), n),
                "remove" => cart.remove_item(VariantId::new(variant)),
                _ => unreachable!(),
            }
            assert_derived_invariant(&cart);
            assert!(cart.items().iter().all(|i| i.quantity > 0));
        }

        // Final state: only variant 1 remains, merged to quantity 5
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_from_items_drops_zero_quantity_lines() {
        let cart = Cart::from_items(
            Currency::Usd,
            vec![item(1, 1_000, 2), item(2, 2_000, 0)],
        );
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_line_price() {
        let line = item(1, 28_500, 3);
        assert_eq!(line.line_price_cents, 85_500);
    }

    #[test]
    fn test_discounted_line_price_carried_exactly() {
        // A line-level discount makes the line price more than unit * quantity;
        // the total must reflect the carried line price, not a recomputation.
        let mut discounted = item(1, 333, 3);
        discounted.line_price_cents = 1_001;

        let cart = Cart::from_items(Currency::Eur, vec![discounted]);
        assert_eq!(cart.total_price_cents(), 1_001);
    }

    #[test]
    fn test_add_item_merge_sums_line_prices() {
        let mut cart = Cart::new(Currency::Eur);
        let mut first = item(1, 333, 3);
        first.line_price_cents = 1_001;
        cart.add_item(first);
        cart.add_item(item(1, 333, 1));

        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total_price_cents(), 1_334);
        assert_derived_invariant(&cart);
    }
}
