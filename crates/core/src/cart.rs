//! In-memory shopping cart.
//!
//! A cart holds at most one entry per product, in the order products were
//! first added. Entries always have a quantity of at least one; lowering a
//! quantity to zero (or below) removes the entry.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A product together with how many units of it are in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    product: Product,
    quantity: u64,
}

impl CartEntry {
    /// The product snapshot taken when it was first added.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Units of this product in the cart. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered collection of cart entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add one unit of `product`.
    ///
    /// If the product is already in the cart its quantity goes up by one and
    /// the stored product data is left as it was. Otherwise a new entry with
    /// quantity 1 is appended.
    pub fn add(&mut self, product: &Product) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == product.id) {
            entry.quantity = entry.quantity.saturating_add(1);
            return;
        }

        self.entries.push(CartEntry {
            product: product.clone(),
            quantity: 1,
        });
    }

    /// Set the quantity of the entry for `id`.
    ///
    /// A quantity of zero or less removes the entry. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        match u64::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                if let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) {
                    entry.quantity = quantity;
                }
            }
            _ => self.entries.retain(|e| e.id() != id),
        }
    }

    /// Total number of units across all entries.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .fold(0, |acc, e| acc.saturating_add(e.quantity))
    }

    /// Sum of every entry's line total, unrounded.
    #[must_use]
    pub fn total(&self) -> Price {
        self.entries.iter().map(CartEntry::line_total).sum()
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::catalog::Catalog;

    fn product(id: i32) -> Product {
        Catalog::abyssinia().find(ProductId::new(id)).unwrap().clone()
    }

    fn quantities(cart: &Cart) -> Vec<(i32, u64)> {
        cart.entries()
            .iter()
            .map(|e| (e.id().as_i32(), e.quantity()))
            .collect()
    }

    #[test]
    fn test_add_twice_merges_into_one_entry() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(1));

        assert_eq!(quantities(&cart), vec![(1, 2)]);
    }

    #[test]
    fn test_add_appends_new_products_in_order() {
        let mut cart = Cart::new();
        cart.add(&product(3));
        cart.add(&product(1));
        cart.add(&product(3));

        assert_eq!(quantities(&cart), vec![(3, 2), (1, 1)]);
    }

    #[test]
    fn test_repeat_add_keeps_original_product_data() {
        let mut cart = Cart::new();
        cart.add(&product(1));

        let mut renamed = product(1);
        renamed.name = "Something Else".to_string();
        renamed.price = Price::from_cents(100);
        cart.add(&renamed);

        let entry = cart.get(ProductId::new(1)).unwrap();
        assert_eq!(entry.quantity(), 2);
        assert_eq!(entry.product().name, "Yirgacheffe Reserve");
        assert_eq!(entry.product().price, Price::from_cents(2499));
    }

    #[test]
    fn test_update_missing_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        let before = cart.clone();

        for quantity in [-5, 0, 1, 42] {
            cart.update_quantity(ProductId::new(99), quantity);
            assert_eq!(cart, before);
        }
    }

    #[test]
    fn test_update_to_zero_removes_entry() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(2));

        cart.update_quantity(ProductId::new(1), 0);

        assert_eq!(cart.len(), 1);
        assert!(cart.get(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_update_negative_behaves_like_zero() {
        let mut cart = Cart::new();
        cart.add(&product(4));

        cart.update_quantity(ProductId::new(4), -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_replaces_quantity_in_place() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(2));

        cart.update_quantity(ProductId::new(1), 10);

        assert_eq!(quantities(&cart), vec![(1, 10), (2, 1)]);
    }

    #[test]
    fn test_item_count_tracks_every_operation() {
        let mut cart = Cart::new();
        assert_eq!(cart.item_count(), 0);

        cart.add(&product(1));
        cart.add(&product(2));
        cart.add(&product(2));
        assert_eq!(cart.item_count(), 3);

        cart.update_quantity(ProductId::new(2), 7);
        assert_eq!(cart.item_count(), 8);

        cart.update_quantity(ProductId::new(1), 0);
        assert_eq!(cart.item_count(), 7);

        let summed: u64 = cart.entries().iter().map(CartEntry::quantity).sum();
        assert_eq!(cart.item_count(), summed);
    }

    #[test]
    fn test_checkout_scenario_totals() {
        let mut cart = Cart::new();
        cart.add(&product(1));
        cart.add(&product(1));
        cart.add(&product(2));

        assert_eq!(quantities(&cart), vec![(1, 2), (2, 1)]);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total().amount(), Decimal::new(7297, 2));
        assert_eq!(cart.total().display(), "$72.97");

        cart.update_quantity(ProductId::new(1), 1);
        assert_eq!(cart.total().amount(), Decimal::new(4798, 2));

        cart.update_quantity(ProductId::new(1), 0);
        assert_eq!(quantities(&cart), vec![(2, 1)]);
    }

    #[test]
    fn test_total_is_exact_before_rounding() {
        let mut cart = Cart::new();
        let mut odd = product(1);
        odd.price = Price::new(Decimal::new(1_005, 3));
        cart.add(&odd);
        cart.update_quantity(odd.id, 3);

        assert_eq!(cart.total().amount(), Decimal::new(3_015, 3));
        assert_eq!(cart.total().display(), "$3.02");
    }

    #[test]
    fn test_line_total() {
        let mut cart = Cart::new();
        cart.add(&product(3));
        cart.update_quantity(ProductId::new(3), 3);

        let entry = cart.get(ProductId::new(3)).unwrap();
        assert_eq!(entry.line_total().display(), "$80.97");
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), Price::ZERO);
    }
}
