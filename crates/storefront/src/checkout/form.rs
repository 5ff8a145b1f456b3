//! Payment confirmation form.
//!
//! The customer pays by bank transfer out of band, then submits this form
//! with a proof-of-payment file so the shop can reconcile the transfer.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Phone numbers are 10-15 ASCII digits, no separators.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("Invalid regex"));

/// Transfer reference: the last 4 digits of the bank's reference number.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("Invalid regex"));

/// Validation failures, reported one at a time in field order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentFormError {
    #[error("name is required")]
    MissingName,
    #[error("invalid phone number (10-15 digits)")]
    InvalidPhone,
    #[error("payment reference must be 4 digits")]
    InvalidReference,
    #[error("proof of payment must be attached")]
    MissingReceipt,
}

/// Proof-of-payment file attached to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ReceiptFile {
    /// Read a receipt from disk, guessing its content type from the
    /// extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "receipt".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Customer-supplied payment confirmation.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    /// Full name of the payer.
    pub name: String,
    /// Contact phone, digits only.
    pub phone: String,
    /// Last 4 digits of the transfer reference.
    pub reference: String,
    pub receipt: Option<ReceiptFile>,
}

impl PaymentForm {
    /// Check every field before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), PaymentFormError> {
        if self.name.trim().is_empty() {
            return Err(PaymentFormError::MissingName);
        }
        if !PHONE_RE.is_match(&self.phone) {
            return Err(PaymentFormError::InvalidPhone);
        }
        if !REFERENCE_RE.is_match(&self.reference) {
            return Err(PaymentFormError::InvalidReference);
        }
        match &self.receipt {
            Some(receipt) if !receipt.bytes.is_empty() => Ok(()),
            _ => Err(PaymentFormError::MissingReceipt),
        }
    }
}
