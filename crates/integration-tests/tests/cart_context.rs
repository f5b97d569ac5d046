//! Integration tests for consumer access to the cart.
//!
//! These tests verify that consumers sharing one store see each other's
//! changes and that use outside an active store fails without side effects.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use go_marketplace_cart::{
    CartConfig, CartContext, CartError, CartStore, KeyValueStore, MemoryStore,
};
use go_marketplace_integration_tests::{hat, shoe};

const KEY: &str = "@GoMarketplace:products";

#[tokio::test]
async fn test_views_share_changes() {
    let store = CartStore::load(Arc::new(MemoryStore::new()), &CartConfig::default())
        .await
        .unwrap();
    let catalog_view = CartContext::provide(store.clone());
    let cart_view = CartContext::provide(store);

    catalog_view.use_cart().unwrap().add_to_cart(shoe()).unwrap();
    catalog_view.use_cart().unwrap().add_to_cart(hat()).unwrap();
    cart_view.use_cart().unwrap().increment("a").unwrap();

    let summary = catalog_view.use_cart().unwrap().summary().unwrap();
    assert_eq!(summary.item_count, 3);
    assert_eq!(summary.subtotal.to_string(), "$25.00");
}

#[test]
fn test_use_without_store_fails_loudly() {
    let view = CartContext::empty();
    let err = view.use_cart().unwrap_err();
    assert!(matches!(err, CartError::NotActive { .. }));
    assert!(err.to_string().contains("must be used within an active cart store"));
}

#[tokio::test]
async fn test_closed_store_applies_no_partial_mutation() {
    let storage = Arc::new(MemoryStore::new());
    let store = CartStore::load(storage.clone(), &CartConfig::default())
        .await
        .unwrap();
    store.add_to_cart(shoe()).unwrap();
    let view = CartContext::provide(store.clone());
    store.close().await.unwrap();
    let persisted_before = storage.get(KEY).await.unwrap();

    assert!(view.use_cart().is_err());
    assert!(matches!(
        store.add_to_cart(hat()),
        Err(CartError::NotActive { operation: "add_to_cart" })
    ));
    assert!(matches!(
        store.clear(),
        Err(CartError::NotActive { operation: "clear" })
    ));
    assert!(store.flush().await.is_ok());

    assert_eq!(storage.get(KEY).await.unwrap(), persisted_before);
}
