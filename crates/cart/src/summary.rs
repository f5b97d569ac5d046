//! Cart totals for display.

use go_marketplace_core::{LineItem, Price};
use serde::Serialize;

/// Totals derived from a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of all line quantities.
    pub item_count: u64,
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Price,
}

impl CartSummary {
    /// Summary of an empty cart.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            line_count: 0,
            item_count: 0,
            subtotal: Price::ZERO,
        }
    }

    /// Compute the summary of a list of lines.
    #[must_use]
    pub fn from_items(items: &[LineItem]) -> Self {
        Self {
            line_count: items.len(),
            item_count: items.iter().map(|item| u64::from(item.quantity)).sum(),
            subtotal: items.iter().map(LineItem::line_total).sum(),
        }
    }
}

impl From<&[LineItem]> for CartSummary {
    fn from(items: &[LineItem]) -> Self {
        Self::from_items(items)
    }
}
