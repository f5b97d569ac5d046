//! Go Marketplace Core - Shared cart domain types.
//!
//! This crate provides the types shared by every Go Marketplace component:
//! - `cart` - Cart store, persistence service and consumer context
//! - `cli` - Command-line driver for the cart store
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, line items and cart policies

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
