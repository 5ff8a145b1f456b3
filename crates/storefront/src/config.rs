//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! ## Catalog
//! - `TIENDA_CATALOG_URL` - Product feed base URL (default: `https://fakestoreapi.com`)
//! - `TIENDA_CATALOG_CACHE_TTL_SECS` - Response cache lifetime (default: 300)
//!
//! ## Payment
//! - `TIENDA_PAYMENT_URL` - Payment confirmation endpoint (default: `https://api.tienda.com/pagos`)
//! - `TIENDA_PAYMENT_TOKEN` - Bearer token for the payment endpoint
//! - `TIENDA_CLEAR_CART_AFTER_CHECKOUT` - `clear`/`true` to empty the cart after
//!   an accepted payment (default: retain)
//! - `TIENDA_BANK_NAME`, `TIENDA_BANK_ACCOUNT_TYPE`, `TIENDA_BANK_ACCOUNT_NUMBER`,
//!   `TIENDA_BANK_HOLDER_ID`, `TIENDA_BANK_HOLDER_NAME` - Transfer instructions
//!
//! ## Storage
//! - `TIENDA_DATA_DIR` - Directory for the saved cart (default: platform data dir + `/tienda`)
//! - `TIENDA_PERSIST_CART` - `false` to keep the cart in memory only (default: true)
//!
//! ## Error tracking
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::checkout::PostCheckoutPolicy;

const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_PAYMENT_URL: &str = "https://api.tienda.com/pagos";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_CACHE_CAPACITY: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog feed configuration
    pub catalog: CatalogConfig,
    /// Payment endpoint configuration
    pub payment: PaymentConfig,
    /// Cart persistence configuration
    pub storage: StorageConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Catalog feed configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Feed base URL
    pub base_url: Url,
    /// How long responses stay cached
    pub cache_ttl: Duration,
    /// Maximum cached responses
    pub cache_capacity: u64,
}

/// Payment endpoint configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct PaymentConfig {
    /// Multipart confirmation endpoint
    pub endpoint: Url,
    /// Optional bearer token
    pub token: Option<SecretString>,
    /// What to do with the cart after an accepted payment
    pub post_checkout: PostCheckoutPolicy,
    /// Bank transfer details shown to the customer
    pub instructions: PaymentInstructions,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("post_checkout", &self.post_checkout)
            .field("instructions", &self.instructions)
            .finish()
    }
}

/// Bank transfer details the customer pays into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentInstructions {
    pub bank: String,
    pub account_type: String,
    pub account_number: String,
    /// National ID of the account holder
    pub holder_id: String,
    pub holder_name: String,
}

impl Default for PaymentInstructions {
    fn default() -> Self {
        Self {
            bank: "Banco Nacional Ejemplo".to_string(),
            account_type: "Cuenta Corriente".to_string(),
            account_number: "0123-4567-8901-2345".to_string(),
            holder_id: "V-12345678".to_string(),
            holder_name: "Tienda Online S.A.".to_string(),
        }
    }
}

/// Cart persistence configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the saved cart
    pub data_dir: PathBuf,
    /// Whether the cart is saved at all
    pub persist_cart: bool,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            catalog: CatalogConfig::from_lookup(&lookup)?,
            payment: PaymentConfig::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup)?,
            sentry_dsn: lookup("SENTRY_DSN").filter(|v| !v.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT").filter(|v| !v.is_empty()),
        })
    }
}

impl CatalogConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = get_url(lookup, "TIENDA_CATALOG_URL", DEFAULT_CATALOG_URL)?;
        let ttl_secs = get_or_default(lookup, "TIENDA_CATALOG_CACHE_TTL_SECS", DEFAULT_CACHE_TTL_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDA_CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            cache_ttl: Duration::from_secs(ttl_secs),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        })
    }
}

impl PaymentConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = PaymentInstructions::default();
        let post_checkout = match lookup("TIENDA_CLEAR_CART_AFTER_CHECKOUT") {
            Some(value) => value.parse::<PostCheckoutPolicy>().map_err(|e| {
                ConfigError::InvalidEnvVar("TIENDA_CLEAR_CART_AFTER_CHECKOUT".to_string(), e)
            })?,
            None => PostCheckoutPolicy::default(),
        };

        Ok(Self {
            endpoint: get_url(lookup, "TIENDA_PAYMENT_URL", DEFAULT_PAYMENT_URL)?,
            token: lookup("TIENDA_PAYMENT_TOKEN")
                .filter(|v| !v.is_empty())
                .map(SecretString::from),
            post_checkout,
            instructions: PaymentInstructions {
                bank: lookup("TIENDA_BANK_NAME").unwrap_or(defaults.bank),
                account_type: lookup("TIENDA_BANK_ACCOUNT_TYPE").unwrap_or(defaults.account_type),
                account_number: lookup("TIENDA_BANK_ACCOUNT_NUMBER")
                    .unwrap_or(defaults.account_number),
                holder_id: lookup("TIENDA_BANK_HOLDER_ID").unwrap_or(defaults.holder_id),
                holder_name: lookup("TIENDA_BANK_HOLDER_NAME").unwrap_or(defaults.holder_name),
            },
        })
    }
}

impl StorageConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("TIENDA_DATA_DIR")
            .filter(|v| !v.is_empty())
            .map_or_else(default_data_dir, PathBuf::from);
        let persist_cart = match lookup("TIENDA_PERSIST_CART") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ConfigError::InvalidEnvVar(
                    "TIENDA_PERSIST_CART".to_string(),
                    format!("expected true or false, got '{value}'"),
                )
            })?,
            None => true,
        };

        Ok(Self {
            data_dir,
            persist_cart,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Get a variable as an absolute URL.
fn get_url(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<Url, ConfigError> {
    Url::parse(&get_or_default(lookup, key, default))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the usual spellings of a boolean flag.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Platform data directory, falling back to `.tienda` in the working
/// directory when the platform has none.
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".tienda"), |dir| dir.join("tienda"))
}
