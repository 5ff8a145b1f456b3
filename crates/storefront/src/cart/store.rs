//! The cart store: sole owner of the session's [`CartState`].

use std::cell::Cell;

use tienda_core::{CartState, CartTotals, LineItem, LineItemInput, Price, ProductId, Transition};
use tracing::{debug, info, warn};

use super::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "cart_state";

/// Owns the cart for one session and mirrors it to durable storage.
///
/// Views read through [`items`](Self::items), [`item_count`](Self::item_count)
/// and [`total`](Self::total), and mutate only through [`add`](Self::add),
/// [`remove`](Self::remove) and [`remove_all_units`](Self::remove_all_units).
///
/// Every mutation that changes the cart writes the full state back to
/// storage. Write failures are logged and dropped: the in-memory mutation
/// always stands.
pub struct CartStore<S> {
    state: CartState,
    storage: S,
    /// Aggregates memoized against `CartState::revision`.
    totals: Cell<Option<(u64, CartTotals)>>,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Restore the cart from `storage`, or start empty.
    ///
    /// A missing key, an unreadable backend, malformed JSON, or a blob that
    /// breaks the cart invariants all yield an empty cart. This never fails.
    pub fn open(storage: S) -> Self {
        let state = restore(&storage);
        Self {
            state,
            storage,
            totals: Cell::new(None),
        }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.state.items()
    }

    /// Read-only view of the whole cart.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.totals().item_count
    }

    /// Sum of `price * quantity` over all lines, unrounded.
    #[must_use]
    pub fn total(&self) -> Price {
        self.totals().total
    }

    /// Both aggregates, recomputed only when the cart changed since the last
    /// read.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let revision = self.state.revision();
        if let Some((cached_at, totals)) = self.totals.get()
            && cached_at == revision
        {
            return totals;
        }
        let totals = self.state.totals();
        self.totals.set(Some((revision, totals)));
        totals
    }

    /// Add one unit of a product.
    pub fn add(&mut self, item: LineItemInput) {
        let id = item.id;
        let transition = self.state.add(item);
        self.commit("add", Some(id), transition);
    }

    /// Remove one unit of a product. Absent products are ignored.
    pub fn remove(&mut self, id: ProductId) {
        let transition = self.state.remove(id);
        self.commit("remove", Some(id), transition);
    }

    /// Remove a product entirely, whatever its quantity.
    pub fn remove_all_units(&mut self, id: ProductId) {
        let transition = self.state.remove_all_units(id);
        self.commit("remove_all_units", Some(id), transition);
    }

    /// Empty the cart. Only the checkout flow calls this, and only when the
    /// configured post-checkout policy asks for it.
    pub(crate) fn clear(&mut self) {
        let transition = self.state.clear();
        self.commit("clear", None, transition);
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn commit(&mut self, op: &'static str, id: Option<ProductId>, transition: Transition) {
        if !transition.changed() {
            debug!(op, product_id = ?id, "Cart unchanged");
            return;
        }
        debug!(op, product_id = ?id, ?transition, "Cart updated");

        if let Err(e) = self.persist() {
            warn!(op, error = %e, "Failed to persist cart, continuing in memory");
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.state)?;
        self.storage.set(CART_STORAGE_KEY, &blob)
    }
}

fn restore(storage: &impl KeyValueStorage) -> CartState {
    let blob = match storage.get(CART_STORAGE_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => return CartState::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read saved cart, starting empty");
            return CartState::new();
        }
    };

    match serde_json::from_str::<CartState>(&blob) {
        Ok(state) => {
            info!(lines = state.len(), "Restored saved cart");
            state
        }
        Err(e) => {
            warn!(error = %e, "Saved cart is corrupt, starting empty");
            CartState::new()
        }
    }
}
