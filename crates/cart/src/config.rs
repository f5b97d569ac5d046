//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_STORAGE_KEY` - Key the cart list is stored under (default: `@GoMarketplace:products`)
//! - `CART_STORAGE_DIR` - Directory used by the file-backed store (default: `.gm-cart`)
//! - `CART_ZERO_QUANTITY_POLICY` - `retain` or `remove` (default: `retain`)

use std::path::PathBuf;

use go_marketplace_core::ZeroQuantityPolicy;
use thiserror::Error;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Storage directory used when none is configured.
pub const DEFAULT_STORAGE_DIR: &str = ".gm-cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the serialized cart list is stored under
    pub storage_key: String,
    /// Directory for the file-backed persistence service
    pub storage_dir: PathBuf,
    /// What happens to a line whose quantity is decremented to zero
    pub zero_quantity_policy: ZeroQuantityPolicy,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            zero_quantity_policy: ZeroQuantityPolicy::default(),
        }
    }
}

impl CartConfig {
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

    /// Build configuration from an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let storage_key = lookup("CART_STORAGE_KEY").unwrap_or(defaults.storage_key);
        let storage_dir = lookup("CART_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let zero_quantity_policy = match lookup("CART_ZERO_QUANTITY_POLICY") {
            Some(value) => value.parse::<ZeroQuantityPolicy>().map_err(|e| {
                ConfigError::InvalidEnvVar("CART_ZERO_QUANTITY_POLICY".to_string(), e.to_string())
            })?,
            None => defaults.zero_quantity_policy,
        };

        Ok(Self {
            storage_key,
            storage_dir,
            zero_quantity_policy,
        })
    }

    /// Override the storage directory.
    #[must_use]
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Override the zero quantity policy.
    #[must_use]
    pub const fn with_zero_quantity_policy(mut self, policy: ZeroQuantityPolicy) -> Self {
        self.zero_quantity_policy = policy;
        self
    }
}
