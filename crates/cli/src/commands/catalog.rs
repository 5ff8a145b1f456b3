//! Catalog browsing commands.

use tienda_core::Category;
use tienda_storefront::{AppState, Result};

use super::print_view;
use crate::views;

/// `tienda products [--category C]`
pub async fn products(state: &AppState, category: Option<&Category>) -> Result<()> {
    let products = state.catalog().list_products(category).await?;
    print_view(&views::product_list(&products));
    Ok(())
}

/// `tienda featured [--limit N]`
pub async fn featured(state: &AppState, limit: u32) -> Result<()> {
    let products = state.catalog().featured_products(limit).await?;
    print_view(&views::product_list(&products));
    Ok(())
}

/// `tienda categories`
pub async fn categories(state: &AppState) -> Result<()> {
    let categories = state.catalog().categories().await?;
    print_view(&views::category_list(&categories));
    Ok(())
}
