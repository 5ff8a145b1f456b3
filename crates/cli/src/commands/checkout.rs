//! Checkout commands.

use std::path::PathBuf;

use tienda_storefront::checkout::{PaymentForm, ReceiptFile};
use tienda_storefront::{AppState, Result, SessionCart};

use super::print_view;
use crate::views;

/// Arguments of `tienda checkout pay`.
pub struct PayArgs {
    pub name: String,
    pub phone: String,
    pub reference: String,
    pub receipt: PathBuf,
}

/// `tienda checkout instructions`
pub fn instructions(state: &AppState, cart: &SessionCart) {
    print_view(&views::payment_instructions(
        &state.config().payment.instructions,
        cart.total(),
    ));
}

/// `tienda checkout pay ...`
pub async fn pay(state: &AppState, cart: &mut SessionCart, args: PayArgs) -> Result<()> {
    let receipt = ReceiptFile::load(&args.receipt).await?;
    let form = PaymentForm {
        name: args.name,
        phone: args.phone,
        reference: args.reference,
        receipt: Some(receipt),
    };

    let confirmation = state.checkout().pay(cart, &form).await?;
    print_view(&views::payment_confirmation(&confirmation, cart));
    Ok(())
}
