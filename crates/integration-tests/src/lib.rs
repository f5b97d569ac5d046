//! Integration tests for the Go Marketplace cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_lifecycle` - Load, mutate, persist and reload against each backend
//! - `cart_context` - Consumer access and usage errors

use std::path::Path;
use std::sync::Arc;

use go_marketplace_cart::{CartConfig, CartStore, FileStore};
use go_marketplace_core::{NewLineItem, Price};

/// The sneaker used throughout the lifecycle tests.
#[must_use]
pub fn shoe() -> NewLineItem {
    NewLineItem::new("a", "Shoe", "u", Price::from_cents(1000))
}

/// A second, cheaper product.
#[must_use]
pub fn hat() -> NewLineItem {
    NewLineItem::new("b", "Hat", "h", Price::from_cents(500))
}

/// Open a file-backed cart rooted at `dir`.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub async fn open_file_cart(
    dir: &Path,
    config: &CartConfig,
) -> Result<CartStore, go_marketplace_cart::CartError> {
    let config = config.clone().with_storage_dir(dir);
    CartStore::load(Arc::new(FileStore::new(dir)), &config).await
}
