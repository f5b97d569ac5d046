//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod policy;
pub mod price;

pub use id::ProductId;
pub use line_item::{LineItem, NewLineItem};
pub use policy::{ParsePolicyError, ZeroQuantityPolicy};
pub use price::Price;
