//! Cart line items and the `add` payload.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// One product entry in the cart plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    /// Unit price captured when the product was first added.
    pub price: Price,
    /// Opaque image reference, never interpreted by the cart.
    pub image: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Errors reported by [`LineItemInput::validate`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemInputError {
    /// Product ID 0 is never issued by the catalog.
    #[error("product id is missing")]
    MissingId,
    #[error("product title cannot be empty")]
    EmptyTitle,
    #[error("product price must be greater than zero")]
    NonPositivePrice,
    #[error("product image cannot be empty")]
    EmptyImage,
}

/// Product descriptor passed to [`CartState::add`](crate::CartState::add).
///
/// The cart owns quantities, so callers never supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemInput {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
}

impl LineItemInput {
    /// Check that the descriptor is well formed before dispatching it.
    ///
    /// The cart itself never calls this; views run it at the boundary.
    ///
    /// # Errors
    ///
    /// Returns the first missing or empty field.
    pub fn validate(&self) -> Result<(), LineItemInputError> {
        if self.id.as_u32() == 0 {
            return Err(LineItemInputError::MissingId);
        }
        if self.title.trim().is_empty() {
            return Err(LineItemInputError::EmptyTitle);
        }
        if !self.price.is_positive() {
            return Err(LineItemInputError::NonPositivePrice);
        }
        if self.image.trim().is_empty() {
            return Err(LineItemInputError::EmptyImage);
        }
        Ok(())
    }

    pub(crate) fn into_line_item(self) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            price: self.price,
            image: self.image,
            quantity: 1,
        }
    }
}
