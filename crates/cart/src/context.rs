//! Consumer-side access to the cart.
//!
//! A view tree receives a `CartContext` from its parent. Views that need the
//! cart call [`CartContext::use_cart`]; a context built without a store, or
//! whose store has been closed, fails with `CartError::NotActive` instead of
//! handing out an empty cart.

use crate::error::{CartError, Result};
use crate::store::CartStore;

/// The cart as seen by a tree of consumers.
#[derive(Debug, Clone, Default)]
pub struct CartContext {
    store: Option<CartStore>,
}

impl CartContext {
    /// A context with no cart store.
    #[must_use]
    pub const fn empty() -> Self {
        Self { store: None }
    }

    /// A context providing `store` to its consumers.
    #[must_use]
    pub const fn provide(store: CartStore) -> Self {
        Self { store: Some(store) }
    }

    /// The active cart store.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if no store was provided or the
    /// provided store has been closed.
    pub fn use_cart(&self) -> Result<&CartStore> {
        self.store
            .as_ref()
            .filter(|store| store.is_active())
            .ok_or(CartError::NotActive {
                operation: "use_cart",
            })
    }
}

impl From<CartStore> for CartContext {
    fn from(store: CartStore) -> Self {
        Self::provide(store)
    }
}
