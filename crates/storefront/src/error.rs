//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for everything a view can run into.
//! Call [`AppError::report`] once at the top of a failed command to log it
//! and capture faults to Sentry.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog feed operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad input from the user.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether this is a fault on our side or a remote service's, as opposed
    /// to a user mistake.
    #[must_use]
    pub const fn is_fault(&self) -> bool {
        match self {
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Checkout(err) => matches!(
                err,
                CheckoutError::Http(_) | CheckoutError::Rejected { .. }
            ),
            Self::Io(_) => true,
            Self::Config(_) | Self::InvalidInput(_) => false,
        }
    }

    /// Message safe to show the customer.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(CatalogError::NotFound(what)) => format!("Not found: {what}"),
            Self::Catalog(CatalogError::RateLimited(secs)) => {
                format!("The catalog is busy, try again in {secs} seconds")
            }
            Self::Catalog(_) => "The product catalog is unavailable right now".to_string(),
            Self::Checkout(CheckoutError::InvalidForm(err)) => err.to_string(),
            Self::Checkout(CheckoutError::EmptyCart) => "Your cart is empty".to_string(),
            Self::Checkout(_) => "Could not send the payment confirmation".to_string(),
            _ => self.to_string(),
        }
    }

    /// Log the error, capturing faults to Sentry.
    pub fn report(&self) {
        if self.is_fault() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
