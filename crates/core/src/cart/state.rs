//! The cart reducer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, LineItemInput};
use super::totals::CartTotals;
use crate::types::ProductId;

/// Errors raised when rebuilding a cart from untrusted line items.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartStateError {
    #[error("product {0} appears more than once")]
    DuplicateId(ProductId),
    #[error("product {0} has quantity 0")]
    ZeroQuantity(ProductId),
}

/// What a cart operation did to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new line was appended with quantity 1.
    Inserted,
    /// An existing line's quantity went up to `quantity`.
    Incremented { quantity: u32 },
    /// An existing line's quantity went down to `quantity`.
    Decremented { quantity: u32 },
    /// A line was deleted outright.
    Deleted,
    /// Every line was dropped.
    Cleared,
    /// Nothing matched; the collection is untouched.
    Unchanged,
}

impl Transition {
    /// Whether the collection changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The full collection of line items at a point in time.
///
/// Invariants: line IDs are unique and every quantity is at least 1. Both
/// hold after every transition and are re-checked when a cart is
/// deserialized, so a tampered blob can never produce an invalid cart.
///
/// Serialized as `{"items": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CartSnapshot")]
pub struct CartState {
    items: Vec<LineItem>,
    /// Bumped on every change; lets readers cache derived values.
    #[serde(skip)]
    revision: u64,
}

#[derive(Deserialize)]
struct CartSnapshot {
    items: Vec<LineItem>,
}

impl TryFrom<CartSnapshot> for CartState {
    type Error = CartStateError;

    fn try_from(snapshot: CartSnapshot) -> Result<Self, Self::Error> {
        Self::from_items(snapshot.items)
    }
}

impl PartialEq for CartState {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for CartState {}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            revision: 0,
        }
    }

    /// Rebuild a cart from line items, checking both invariants.
    ///
    /// # Errors
    ///
    /// Returns an error on a duplicate ID or a zero quantity.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartStateError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CartStateError::ZeroQuantity(item.id));
            }
            if !seen.insert(item.id) {
                return Err(CartStateError::DuplicateId(item.id));
            }
        }
        Ok(Self { items, revision: 0 })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Changes whenever the collection changes. Starts at 0.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Add one unit of a product.
    ///
    /// A repeat add only bumps the quantity; title, price, and image stay as
    /// they were on the first add. A line already at `u32::MAX` is left
    /// alone.
    pub fn add(&mut self, input: LineItemInput) -> Transition {
        let transition = if let Some(existing) = self.items.iter_mut().find(|i| i.id == input.id) {
            let Some(quantity) = existing.quantity.checked_add(1) else {
                return Transition::Unchanged;
            };
            existing.quantity = quantity;
            Transition::Incremented { quantity }
        } else {
            self.items.push(input.into_line_item());
            Transition::Inserted
        };
        self.touch();
        transition
    }

    /// Remove one unit of a product, deleting the line at quantity 1.
    ///
    /// Removing an absent product is a no-op, not an error.
    pub fn remove(&mut self, id: ProductId) -> Transition {
        let Some(index) = self.position(id) else {
            return Transition::Unchanged;
        };

        let transition = match self.items.get_mut(index) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                Transition::Decremented {
                    quantity: item.quantity,
                }
            }
            _ => {
                self.items.remove(index);
                Transition::Deleted
            }
        };
        self.touch();
        transition
    }

    /// Delete a product's line regardless of its quantity.
    pub fn remove_all_units(&mut self, id: ProductId) -> Transition {
        let Some(index) = self.position(id) else {
            return Transition::Unchanged;
        };
        self.items.remove(index);
        self.touch();
        Transition::Deleted
    }

    /// Drop every line.
    pub fn clear(&mut self) -> Transition {
        if self.items.is_empty() {
            return Transition::Unchanged;
        }
        self.items.clear();
        self.touch();
        Transition::Cleared
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        CartTotals::item_count(&self.items)
    }

    /// Sum of `price * quantity` over all lines, unrounded.
    #[must_use]
    pub fn total(&self) -> crate::types::Price {
        CartTotals::total(&self.items)
    }

    /// Both aggregates in one pass.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn product(id: u32, title: &str, cents: i64) -> LineItemInput {
        LineItemInput {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::from_cents(cents),
            image: format!("{id}.png"),
        }
    }

    fn shirt() -> LineItemInput {
        LineItemInput {
            id: ProductId::new(1),
            title: "Shirt".to_string(),
            price: Price::from_cents(1999),
            image: "a.png".to_string(),
        }
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = CartState::new();
        assert_eq!(cart.add(shirt()), Transition::Inserted);

        assert_eq!(cart.len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.id, ProductId::new(1));
        assert_eq!(line.title, "Shirt");
        assert_eq!(line.image, "a.png");
        assert_eq!(line.quantity, 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total(), Price::from_cents(1999));
    }

    #[test]
    fn test_add_at_max_quantity_is_unchanged() {
        let line = LineItem {
            quantity: u32::MAX,
            ..shirt().into_line_item()
        };
        let mut cart = CartState::from_items(vec![line]).unwrap();
        let revision = cart.revision();

        assert_eq!(cart.add(shirt()), Transition::Unchanged);
        assert_eq!(cart.revision(), revision);
        assert_eq!(cart.items()[0].quantity, u32::MAX);
    }

    #[test]
    fn test_walkthrough_add_add_remove_remove() {
        let mut cart = CartState::new();
        cart.add(shirt());

        assert_eq!(cart.add(shirt()), Transition::Incremented { quantity: 2 });
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.total(), Price::from_cents(3998));

        assert_eq!(
            cart.remove(ProductId::new(1)),
            Transition::Decremented { quantity: 1 }
        );
        assert_eq!(cart.items()[0].quantity, 1);
        assert_eq!(cart.total(), Price::from_cents(1999));

        assert_eq!(cart.remove(ProductId::new(1)), Transition::Deleted);
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_repeat_add_keeps_first_fields() {
        let mut cart = CartState::new();
        cart.add(shirt());

        let mut repriced = shirt();
        repriced.title = "Shirt (sale)".to_string();
        repriced.price = Price::from_cents(999);
        repriced.image = "b.png".to_string();
        cart.add(repriced);

        let line = &cart.items()[0];
        assert_eq!(line.quantity, 2);
        assert_eq!(line.title, "Shirt");
        assert_eq!(line.price, Price::from_cents(1999));
        assert_eq!(line.image, "a.png");
    }

    #[test]
    fn test_two_distinct_items() {
        let mut cart = CartState::new();
        cart.add(product(1, "Mug", 1000));
        cart.add(product(2, "Pen", 500));

        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Price::from_cents(1500));
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut cart = CartState::new();
        cart.add(product(3, "C", 100));
        cart.add(product(1, "A", 300));
        cart.add(product(2, "B", 200));
        cart.add(product(1, "A", 300));

        let ids: Vec<u32> = cart.items().iter().map(|i| i.id.as_u32()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = CartState::new();
        assert_eq!(cart.remove(ProductId::new(9)), Transition::Unchanged);
        assert!(cart.is_empty());

        cart.add(shirt());
        let before = cart.clone();
        let revision = cart.revision();
        assert_eq!(cart.remove(ProductId::new(9)), Transition::Unchanged);
        assert_eq!(cart, before);
        assert_eq!(cart.revision(), revision);
    }

    #[test]
    fn test_remove_all_units() {
        let mut cart = CartState::new();
        for _ in 0..5 {
            cart.add(shirt());
        }
        cart.add(product(2, "Pen", 500));

        assert_eq!(cart.remove_all_units(ProductId::new(1)), Transition::Deleted);
        assert!(cart.get(ProductId::new(1)).is_none());
        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.remove_all_units(ProductId::new(1)),
            Transition::Unchanged
        );
    }

    #[test]
    fn test_clear() {
        let mut cart = CartState::new();
        assert_eq!(cart.clear(), Transition::Unchanged);
        cart.add(shirt());
        assert_eq!(cart.clear(), Transition::Cleared);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_revision_tracks_changes() {
        let mut cart = CartState::new();
        assert_eq!(cart.revision(), 0);
        cart.add(shirt());
        assert_eq!(cart.revision(), 1);
        cart.add(shirt());
        assert_eq!(cart.revision(), 2);
        cart.remove(ProductId::new(42));
        assert_eq!(cart.revision(), 2);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = CartState::new();
        cart.add(shirt());
        cart.add(shirt());

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "items": [{
                    "id": 1,
                    "title": "Shirt",
                    "price": 19.99,
                    "image": "a.png",
                    "quantity": 2
                }]
            })
        );
    }

    #[test]
    fn test_deserialize_round_trip() {
        let mut cart = CartState::new();
        cart.add(shirt());
        cart.add(product(2, "Pen", 500));
        cart.add(shirt());

        let json = serde_json::to_string(&cart).unwrap();
        let restored: CartState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.total(), cart.total());
    }

    #[test]
    fn test_deserialize_rejects_broken_invariants() {
        let duplicate = r#"{"items":[
            {"id":1,"title":"A","price":1,"image":"a","quantity":1},
            {"id":1,"title":"A","price":1,"image":"a","quantity":2}
        ]}"#;
        assert!(serde_json::from_str::<CartState>(duplicate).is_err());

        let zero = r#"{"items":[{"id":1,"title":"A","price":1,"image":"a","quantity":0}]}"#;
        assert!(serde_json::from_str::<CartState>(zero).is_err());
    }

    #[test]
    fn test_from_items_errors() {
        let line = shirt().into_line_item();
        assert_eq!(
            CartState::from_items(vec![line.clone(), line]),
            Err(CartStateError::DuplicateId(ProductId::new(1)))
        );
    }
}
