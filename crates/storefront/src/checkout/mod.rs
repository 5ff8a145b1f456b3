//! Checkout: mock payment confirmation against the cart total.
//!
//! Checkout only reads the cart. The single exception is the post-checkout
//! policy, which may empty the cart once the payment endpoint has accepted
//! a confirmation. Retaining the cart is the default.

mod client;
mod form;

pub use client::{PaymentClient, PaymentConfirmation};
pub use form::{PaymentForm, PaymentFormError, ReceiptFile};

use core::str::FromStr;

use thiserror::Error;
use tracing::info;

use crate::cart::{CartStore, KeyValueStorage};

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Form failed validation; nothing was sent.
    #[error("invalid payment form: {0}")]
    InvalidForm(#[from] PaymentFormError),

    /// Nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("payment endpoint returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// What happens to the cart after a payment confirmation is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostCheckoutPolicy {
    /// Keep the cart as it was, so the same order can be placed again.
    #[default]
    RetainCart,
    /// Empty the cart.
    ClearCart,
}

impl FromStr for PostCheckoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retain" | "keep" | "false" | "0" | "no" => Ok(Self::RetainCart),
            "clear" | "true" | "1" | "yes" => Ok(Self::ClearCart),
            other => Err(format!("expected retain or clear, got '{other}'")),
        }
    }
}

/// Checkout flow bound to a payment client and a post-checkout policy.
pub struct Checkout<'a> {
    payments: &'a PaymentClient,
    policy: PostCheckoutPolicy,
}

impl<'a> Checkout<'a> {
    #[must_use]
    pub const fn new(payments: &'a PaymentClient, policy: PostCheckoutPolicy) -> Self {
        Self { payments, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> PostCheckoutPolicy {
        self.policy
    }

    /// Submit `form` for the cart's current total and apply the policy.
    ///
    /// The cart is only touched after the endpoint accepts the confirmation;
    /// on any error it is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCart` for an empty cart, `InvalidForm` for a bad form
    /// (both before any network call), or the submission error.
    pub async fn pay<S: KeyValueStorage>(
        &self,
        cart: &mut CartStore<S>,
        form: &PaymentForm,
    ) -> Result<PaymentConfirmation, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        form.validate()?;

        let totals = cart.totals();
        let confirmation = self
            .payments
            .submit(form, totals.total, totals.item_count)
            .await?;

        if self.policy == PostCheckoutPolicy::ClearCart {
            info!(
                confirmation_id = %confirmation.confirmation_id,
                "Clearing cart after checkout"
            );
            cart.clear();
        }
        Ok(confirmation)
    }
}
