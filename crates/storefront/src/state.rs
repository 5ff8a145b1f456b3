//! Storefront state shared across views.

use std::sync::Arc;

use tracing::info;

use crate::cart::{CartStore, FileStorage, KeyValueStorage, NoopStorage};
use crate::catalog::CatalogClient;
use crate::checkout::{Checkout, PaymentClient};
use crate::config::StorefrontConfig;

/// Cart store as opened by [`AppState::open_cart`].
pub type SessionCart = CartStore<Box<dyn KeyValueStorage>>;

/// Shared storefront state.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the remote collaborators. The cart is deliberately not
/// part of it: each session opens and owns its own [`CartStore`] and passes
/// it by reference to the views that need it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    payments: PaymentClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let payments = PaymentClient::new(&config.payment);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the payment client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Checkout flow using the configured post-checkout policy.
    #[must_use]
    pub fn checkout(&self) -> Checkout<'_> {
        Checkout::new(&self.inner.payments, self.inner.config.payment.post_checkout)
    }

    /// Open this session's cart, restoring it from the configured storage.
    #[must_use]
    pub fn open_cart(&self) -> SessionCart {
        let storage = &self.inner.config.storage;
        let backend: Box<dyn KeyValueStorage> = if storage.persist_cart {
            info!(dir = %storage.data_dir.display(), "Opening saved cart");
            Box::new(FileStorage::new(&storage.data_dir))
        } else {
            Box::new(NoopStorage)
        };
        CartStore::open(backend)
    }
}
