//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! gm-cart --storage-dir ./cart add --id a --title Shoe --image-url u --price 10
//! gm-cart --storage-dir ./cart list
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_KEY` - Key the cart is stored under
//! - `CART_STORAGE_DIR` - Directory holding the stored cart
//! - `CART_ZERO_QUANTITY_POLICY` - `retain` or `remove`

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use go_marketplace_cart::config::ConfigError;
use go_marketplace_cart::{CartConfig, CartError, CartStore, FileStore, MutationOutcome};
use go_marketplace_core::{NewLineItem, Price};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Price argument is not a decimal number.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Load configuration and open the file-backed cart.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the stored cart cannot be read.
pub async fn open(storage_dir: Option<PathBuf>) -> Result<CartStore, CartCommandError> {
    let mut config = CartConfig::from_env()?;
    if let Some(dir) = storage_dir {
        config = config.with_storage_dir(dir);
    }

    info!(
        dir = %config.storage_dir.display(),
        key = %config.storage_key,
        policy = %config.zero_quantity_policy,
        "Opening cart"
    );

    let storage = Arc::new(FileStore::new(config.storage_dir.clone()));
    Ok(CartStore::load(storage, &config).await?)
}

/// Print every line and the cart totals.
///
/// # Errors
///
/// Returns an error if the store is closed.
pub fn list(store: &CartStore) -> Result<(), CartCommandError> {
    let products = store.products()?;
    if products.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    for item in products.iter() {
        info!(
            "  {} x {} ({}) @ {} = {}",
            item.quantity,
            item.title,
            item.id,
            item.price,
            item.line_total()
        );
    }

    let summary = store.summary()?;
    info!(
        "{} item(s) in {} line(s), subtotal {}",
        summary.item_count, summary.line_count, summary.subtotal
    );
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the price is not a decimal number or the store is closed.
pub fn add(
    store: &CartStore,
    id: String,
    title: String,
    image_url: String,
    price: &str,
) -> Result<(), CartCommandError> {
    let price = parse_price(price)?;
    let outcome = store.add_to_cart(NewLineItem::new(id.clone(), title, image_url, price))?;
    report(&id, outcome);
    Ok(())
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the store is closed.
pub fn increment(store: &CartStore, id: &str) -> Result<(), CartCommandError> {
    report(id, store.increment(id)?);
    Ok(())
}

/// Decrease a line's quantity by one.
///
/// # Errors
///
/// Returns an error if the store is closed.
pub fn decrement(store: &CartStore, id: &str) -> Result<(), CartCommandError> {
    report(id, store.decrement(id)?);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the store is closed.
pub fn remove(store: &CartStore, id: &str) -> Result<(), CartCommandError> {
    report(id, store.remove(id)?);
    Ok(())
}

/// Remove every line.
///
/// # Errors
///
/// Returns an error if the store is closed.
pub fn clear(store: &CartStore) -> Result<(), CartCommandError> {
    match store.clear()? {
        MutationOutcome::Unchanged => info!("Cart already empty"),
        _ => info!("Cart cleared"),
    }
    Ok(())
}

fn parse_price(raw: &str) -> Result<Price, CartCommandError> {
    Decimal::from_str(raw.trim())
        .map(Price::new)
        .map_err(|_| CartCommandError::InvalidPrice(raw.to_owned()))
}

fn report(id: &str, outcome: MutationOutcome) {
    match outcome {
        MutationOutcome::Appended => info!(id, "Added to cart"),
        MutationOutcome::Updated => info!(id, "Quantity updated"),
        MutationOutcome::Removed => info!(id, "Removed from cart"),
        MutationOutcome::Cleared => info!("Cart cleared"),
        MutationOutcome::Unchanged => info!(id, "Cart unchanged"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use go_marketplace_cart::MemoryStore;

    use super::*;

    async fn memory_store() -> CartStore {
        CartStore::load(Arc::new(MemoryStore::new()), &CartConfig::default())
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("19.99").unwrap(), Price::from_cents(1999));
        assert_eq!(parse_price(" 10 ").unwrap().to_string(), "$10.00");
        assert!(matches!(
            parse_price("ten"),
            Err(CartCommandError::InvalidPrice(ref raw)) if raw == "ten"
        ));
    }

    #[tokio::test]
    async fn test_add_then_adjust() {
        let store = memory_store().await;

        add(&store, "a".into(), "Shoe".into(), "u".into(), "10").unwrap();
        increment(&store, "a").unwrap();
        decrement(&store, "a").unwrap();
        increment(&store, "missing").unwrap();
        list(&store).unwrap();

        let products = store.products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_invalid_price_leaves_cart_untouched() {
        let store = memory_store().await;
        assert!(add(&store, "a".into(), "Shoe".into(), "u".into(), "abc").is_err());
        assert!(store.products().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let store = memory_store().await;
        add(&store, "a".into(), "Shoe".into(), "u".into(), "10").unwrap();
        add(&store, "b".into(), "Hat".into(), "h".into(), "5").unwrap();

        remove(&store, "a").unwrap();
        assert_eq!(store.products().unwrap().len(), 1);

        clear(&store).unwrap();
        clear(&store).unwrap();
        assert!(store.products().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commands_fail_on_closed_store() {
        let store = memory_store().await;
        store.close().await.unwrap();

        assert!(matches!(
            list(&store),
            Err(CartCommandError::Cart(CartError::NotActive { .. }))
        ));
        assert!(matches!(
            increment(&store, "a"),
            Err(CartCommandError::Cart(CartError::NotActive { .. }))
        ));
    }
}
