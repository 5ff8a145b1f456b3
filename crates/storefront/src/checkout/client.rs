//! Payment confirmation endpoint client.

use chrono::{DateTime, Utc};
use reqwest::multipart::{Form, Part};
use secrecy::{ExposeSecret, SecretString};
use tienda_core::Price;
use tracing::{info, instrument};
use url::Url;
use uuid::Uuid;

use super::CheckoutError;
use super::form::PaymentForm;
use crate::config::PaymentConfig;

/// Multipart field names expected by the payment endpoint.
mod fields {
    pub const AMOUNT: &str = "monto";
    pub const NAME: &str = "nombre";
    pub const PHONE: &str = "telefono";
    pub const REFERENCE: &str = "referencia";
    pub const RECEIPT: &str = "comprobante";
}

/// Receipt for an accepted payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// Locally generated, for support correspondence.
    pub confirmation_id: Uuid,
    /// Amount submitted, rounded to cents.
    pub amount: Price,
    /// Number of units in the cart at submission.
    pub item_count: u32,
    pub submitted_at: DateTime<Utc>,
}

/// Client for the payment confirmation endpoint.
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl PaymentClient {
    /// Create a new payment client.
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        }
    }

    /// Submit a validated form for `amount`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidForm` before any network call if the form does not
    /// validate, `Rejected` if the endpoint answers with a non-success
    /// status, or `Http` if the request fails.
    #[instrument(skip(self, form), fields(amount = %amount))]
    pub async fn submit(
        &self,
        form: &PaymentForm,
        amount: Price,
        item_count: u32,
    ) -> Result<PaymentConfirmation, CheckoutError> {
        form.validate()?;
        let receipt = form
            .receipt
            .as_ref()
            .ok_or(super::PaymentFormError::MissingReceipt)?;

        let amount = amount.to_cents();
        let receipt_part = Part::bytes(receipt.bytes.clone())
            .file_name(receipt.file_name.clone())
            .mime_str(&receipt.content_type)?;

        let payload = Form::new()
            .text(fields::AMOUNT, format!("{:.2}", amount.amount()))
            .text(fields::NAME, form.name.trim().to_string())
            .text(fields::PHONE, form.phone.clone())
            .text(fields::REFERENCE, form.reference.clone())
            .part(fields::RECEIPT, receipt_part);

        let mut request = self.client.post(self.endpoint.clone()).multipart(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Payment endpoint rejected confirmation"
            );
            return Err(CheckoutError::Rejected {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let confirmation = PaymentConfirmation {
            confirmation_id: Uuid::new_v4(),
            amount,
            item_count,
            submitted_at: Utc::now(),
        };
        info!(
            confirmation_id = %confirmation.confirmation_id,
            "Payment confirmation accepted"
        );
        Ok(confirmation)
    }
}
