//! Cart
//!
//! The client-local collection of line items, keyed by (product, size,
//! colour). Every operation is total over its domain: updating or removing a
//! key that is not present is a silent no-op.

use serde::{Deserialize, Serialize};

use crate::{items::LineItem, prices::Paise, variants::LineKey};

/// A shopping cart.
///
/// Invariant: no two entries share a [`LineKey`], for any sequence of
/// operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart from existing items, merging any duplicate keys.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut cart = Self::new();

        for item in items {
            cart.add(item);
        }

        cart
    }

    /// Adds an item to the cart.
    ///
    /// If an entry with the same key already exists its quantity is
    /// incremented by the new item's quantity; otherwise the item is
    /// appended.
    pub fn add(&mut self, item: LineItem) {
        let key = item.key();

        if let Some(existing) = self.items.iter_mut().find(|i| i.key() == key) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return;
        }

        self.items.push(item);
    }

    /// Applies `delta` to the quantity of the entry matching `key`.
    ///
    /// The resulting quantity never drops below 1; removal is a separate,
    /// explicit operation. Entries with any other key are untouched.
    pub fn update_quantity(&mut self, key: &LineKey, delta: i32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.key() == *key) {
            let next = i64::from(item.quantity)
                .saturating_add(i64::from(delta))
                .clamp(1, i64::from(u32::MAX));

            item.quantity = u32::try_from(next).unwrap_or(1);
        }
    }

    /// Removes exactly the entry matching `key`, leaving every other entry
    /// (including other variants of the same product) in place.
    pub fn remove(&mut self, key: &LineKey) {
        self.items.retain(|i| i.key() != *key);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The items currently in the cart.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of line totals before shipping, tax or discount.
    #[must_use]
    pub fn subtotal(&self) -> Paise {
        let total = self
            .items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(*item.line_total()));

        Paise::new(total)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::variants::Variant;

    use super::*;

    fn line(product: Uuid, size: &str, color: &str, quantity: u32) -> LineItem {
        LineItem::new(
            product,
            Uuid::now_v7(),
            "Sneakers",
            Paise::from_rupees(100),
            Variant::new(Some(size), Some(color)),
            quantity,
        )
    }

    #[test]
    fn adding_same_key_merges_quantities() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.add(line(product, "M", "red", 3));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn distinct_variants_are_independent_entries() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 1));
        cart.add(line(product, "L", "red", 1));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn no_sequence_produces_duplicate_keys() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.add(line(product, "L", "red", 1));
        cart.add(line(product, "M", "red", 1));
        cart.update_quantity(&line(product, "M", "red", 1).key(), 4);
        cart.add(line(product, "M", "red", 1));

        let keys: Vec<_> = cart.items().iter().map(LineItem::key).collect();
        let unique: std::collections::HashSet<_> = keys.iter().cloned().collect();

        assert_eq!(unique.len(), keys.len(), "cart contains duplicate line keys");
    }

    #[test]
    fn update_quantity_clamps_at_one() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 3));
        cart.update_quantity(&line(product, "M", "red", 1).key(), -100);

        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn update_quantity_only_touches_the_matching_variant() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.add(line(product, "L", "red", 2));
        cart.update_quantity(&line(product, "M", "red", 1).key(), 1);

        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].quantity, 2);
    }

    #[test]
    fn update_quantity_for_missing_key_is_a_no_op() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.update_quantity(&line(Uuid::now_v7(), "M", "red", 1).key(), 5);

        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn remove_deletes_exactly_the_matching_variant() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.add(line(product, "L", "red", 1));

        cart.remove(&line(product, "M", "red", 1).key());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].variant, Variant::new(Some("L"), Some("red")));
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new();

        cart.add(line(product, "M", "red", 2));
        cart.remove(&line(Uuid::now_v7(), "M", "red", 1).key());

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let mut cart = Cart::new();

        cart.add(line(Uuid::now_v7(), "M", "red", 2));
        cart.add(line(Uuid::now_v7(), "L", "blue", 1));

        assert_eq!(cart.subtotal(), Paise::from_rupees(300));
    }

    #[test]
    fn with_items_merges_duplicates() {
        let product = Uuid::now_v7();

        let cart = Cart::with_items([
            line(product, "M", "red", 1),
            line(product, "M", "red", 2),
        ]);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn clear_empties_the_cart() {
        let mut cart = Cart::new();

        cart.add(line(Uuid::now_v7(), "M", "red", 1));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Paise::new(0));
    }
}
