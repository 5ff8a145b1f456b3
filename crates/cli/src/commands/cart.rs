//! Cart commands.
//!
//! The only code paths in the binary that mutate the cart, and each goes
//! through one of the store's three verbs.

use tienda_core::{LineItemInput, ProductId};
use tienda_storefront::{AppError, AppState, Result, SessionCart};
use tracing::info;

use super::print_view;
use crate::views;

/// `tienda cart show`
pub fn show(cart: &SessionCart) {
    print_view(&views::cart(cart));
}

/// `tienda cart add <id>`
///
/// Looks the product up in the catalog and validates it before dispatching,
/// so the store never sees a malformed item.
pub async fn add(state: &AppState, cart: &mut SessionCart, id: ProductId) -> Result<()> {
    let product = state.catalog().get_product(id).await?;
    let item = LineItemInput::from(&product);
    item.validate()
        .map_err(|e| AppError::InvalidInput(format!("product {id}: {e}")))?;

    cart.add(item);
    info!(product_id = %id, "Added to cart");
    print_view(&views::cart_summary(&format!("Added {}", product.title), cart));
    Ok(())
}

/// `tienda cart remove <id>`
pub fn remove(cart: &mut SessionCart, id: ProductId) {
    let title = cart
        .state()
        .get(id)
        .map(|line| line.title.clone());
    cart.remove(id);

    let headline = title.map_or_else(
        || format!("Product {id} is not in the cart"),
        |title| format!("Removed one {title}"),
    );
    print_view(&views::cart_summary(&headline, cart));
}

/// `tienda cart remove-all <id>`
pub fn remove_all(cart: &mut SessionCart, id: ProductId) {
    let title = cart
        .state()
        .get(id)
        .map(|line| line.title.clone());
    cart.remove_all_units(id);

    let headline = title.map_or_else(
        || format!("Product {id} is not in the cart"),
        |title| format!("Removed all {title}"),
    );
    print_view(&views::cart_summary(&headline, cart));
}
