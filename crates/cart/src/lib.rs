//! Go Marketplace Cart - persistent shopping-cart store.
//!
//! The cart is an ordered list of [`LineItem`]s owned by a [`CartStore`].
//! Consumers share the store by handle and read immutable snapshots; every
//! change is handed to a background writer that persists the list, in
//! mutation order, under one key of a [`KeyValueStore`].
//!
//! # Lifecycle
//!
//! 1. [`CartStore::load`] reads the stored list once.
//! 2. Mutators (`add_to_cart`, `increment`, `decrement`, `remove`, `clear`)
//!    update the list synchronously and queue a save.
//! 3. [`CartStore::close`] flushes pending saves and deactivates the store.
//!
//! [`LineItem`]: go_marketplace_core::LineItem

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod storage;
pub mod store;
pub mod summary;

pub use config::CartConfig;
pub use context::CartContext;
pub use error::{CartError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CartStore, CartSnapshot, MutationOutcome};
pub use summary::CartSummary;
