//! Shopping cart state.
//!
//! [`CartState`] is an insertion-ordered collection of [`LineItem`]s keyed by
//! [`ProductId`](crate::ProductId). It changes only through three verbs
//! (`add`, `remove`, `remove_all_units`), and every derived value
//! ([`CartTotals`]) is computed from it on demand.
//!
//! | Current              | Operation          | Result                  |
//! |----------------------|--------------------|-------------------------|
//! | id absent            | `add`              | insert with quantity 1  |
//! | id present, qty n    | `add`              | qty n+1, fields kept    |
//! | id absent            | `remove`           | no-op                   |
//! | id present, qty 1    | `remove`           | delete item             |
//! | id present, qty n>1  | `remove`           | qty n-1                 |
//! | id present, any qty  | `remove_all_units` | delete item             |

mod line_item;
mod state;
mod totals;

pub use line_item::{LineItem, LineItemInput, LineItemInputError};
pub use state::{CartState, CartStateError, Transition};
pub use totals::CartTotals;
