//! Derived cart aggregates.

use super::line_item::LineItem;
use crate::types::Price;

/// Item count and total price of a cart.
///
/// Always derived from the line items, never stored alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of quantities. 0 for an empty cart.
    pub item_count: u32,
    /// Sum of `price * quantity`, unrounded. 0 for an empty cart.
    pub total: Price,
}

impl CartTotals {
    /// Compute both aggregates in a single pass.
    #[must_use]
    pub fn compute(items: &[LineItem]) -> Self {
        items.iter().fold(Self::default(), |acc, item| Self {
            item_count: acc.item_count.saturating_add(item.quantity),
            total: acc.total + item.line_total(),
        })
    }

    #[must_use]
    pub fn item_count(items: &[LineItem]) -> u32 {
        items
            .iter()
            .fold(0, |count, item| count.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn total(items: &[LineItem]) -> Price {
        items.iter().map(LineItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn line(id: u32, cents: i64, quantity: u32) -> LineItem {
        LineItem {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents),
            image: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(CartTotals::compute(&[]), CartTotals::default());
        assert_eq!(CartTotals::item_count(&[]), 0);
        assert_eq!(CartTotals::total(&[]), Price::ZERO);
    }

    #[test]
    fn test_compute_matches_individual_selectors() {
        let items = vec![line(1, 1999, 2), line(2, 500, 3), line(3, 1, 1)];
        let totals = CartTotals::compute(&items);

        assert_eq!(totals.item_count, 6);
        assert_eq!(totals.total, Price::from_cents(3998 + 1500 + 1));
        assert_eq!(totals.item_count, CartTotals::item_count(&items));
        assert_eq!(totals.total, CartTotals::total(&items));
    }
}
