//! Text views.
//!
//! Views only read: they take the cart by shared reference and render a
//! string. Formatting to two decimals happens here and nowhere else.

use std::fmt::Write as _;

use tienda_core::{Category, Price};
use tienda_storefront::SessionCart;
use tienda_storefront::catalog::Product;
use tienda_storefront::checkout::PaymentConfirmation;
use tienda_storefront::config::PaymentInstructions;

/// Product table: id, price, category, title.
pub fn product_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found.".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "{:>4}  {:>10}  {:<18}  {}",
            product.id.as_u32(),
            product.price.display(),
            product.category.label(),
            product.title
        );
    }
    out.trim_end().to_string()
}

pub fn category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }
    categories
        .iter()
        .map(|c| format!("{}  ({})", c.label(), c.as_str()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full cart: one row per line, then the totals.
pub fn cart(cart: &SessionCart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.items() {
        let _ = writeln!(
            out,
            "{:>4}  {:<40}  {:>3} x {:>10}  = {:>10}",
            line.id.as_u32(),
            truncate(&line.title, 40),
            line.quantity,
            line.price.display(),
            line.line_total().display()
        );
    }
    let _ = write!(out, "{}", totals_line(cart));
    out
}

/// A one-line headline followed by the totals.
pub fn cart_summary(headline: &str, cart: &SessionCart) -> String {
    format!("{headline}\n{}", totals_line(cart))
}

fn totals_line(cart: &SessionCart) -> String {
    let totals = cart.totals();
    let unit = if totals.item_count == 1 { "item" } else { "items" };
    format!(
        "{} {unit} in cart, total {}",
        totals.item_count,
        totals.total.display()
    )
}

pub fn payment_instructions(instructions: &PaymentInstructions, total: Price) -> String {
    format!(
        "Transfer {} to:\n  Bank:            {}\n  Account type:    {}\n  Account number:  {}\n  Holder ID:       {}\n  Holder name:     {}\n\nThen run `tienda checkout pay` with your proof of payment.",
        total.display(),
        instructions.bank,
        instructions.account_type,
        instructions.account_number,
        instructions.holder_id,
        instructions.holder_name,
    )
}

pub fn payment_confirmation(confirmation: &PaymentConfirmation, cart: &SessionCart) -> String {
    let cart_note = if cart.is_empty() {
        "Your cart has been emptied.".to_string()
    } else {
        format!("Your cart still holds {} items.", cart.item_count())
    };
    format!(
        "Payment confirmation sent.\n  Amount:        {}\n  Items:         {}\n  Confirmation:  {}\n  Submitted:     {}\n{cart_note}",
        confirmation.amount.display(),
        confirmation.item_count,
        confirmation.confirmation_id,
        confirmation.submitted_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
