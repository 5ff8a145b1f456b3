//! Command implementations.
//!
//! Each command reads from or dispatches to the storefront, then prints a
//! view rendered by [`crate::views`].

pub mod cart;
pub mod catalog;
pub mod checkout;

/// Write a rendered view to stdout.
#[allow(clippy::print_stdout)]
fn print_view(view: &str) {
    println!("{view}");
}
