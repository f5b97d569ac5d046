//! The cart store.
//!
//! `CartStore` owns the cart list. The list is an immutable snapshot that is
//! replaced wholesale on every change, so readers holding an older snapshot
//! are never affected by later mutations.
//!
//! Persistence is fire-and-forget: a mutator swaps in the new snapshot and
//! queues it for the background writer while still holding the state lock.
//! The writer stores snapshots strictly in mutation order, so a slow write can
//! never overwrite a newer one.

use std::sync::{Arc, PoisonError, RwLock};

use go_marketplace_core::{LineItem, NewLineItem, ZeroQuantityPolicy};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument, warn};

use crate::codec;
use crate::config::CartConfig;
use crate::error::{CartError, Result};
use crate::storage::KeyValueStore;
use crate::summary::CartSummary;

/// Read-only view of the cart list at one point in time.
pub type CartSnapshot = Arc<[LineItem]>;

/// What a mutator did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// A new line was appended.
    Appended,
    /// An existing line's quantity changed.
    Updated,
    /// A line was removed.
    Removed,
    /// All lines were removed.
    Cleared,
    /// Nothing changed and nothing was persisted.
    Unchanged,
}

impl MutationOutcome {
    /// Whether the cart list changed.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

enum WriterCommand {
    Save(CartSnapshot),
    Flush(oneshot::Sender<()>),
}

/// Shared handle to the cart.
///
/// Cheaply cloneable; every clone refers to the same cart. Hand it to each
/// consumer that needs to read or change the cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    policy: ZeroQuantityPolicy,
    state: RwLock<CartState>,
    writer: mpsc::UnboundedSender<WriterCommand>,
}

struct CartState {
    products: CartSnapshot,
    active: bool,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("CartStore")
            .field("policy", &self.inner.policy)
            .field("lines", &state.products.len())
            .field("active", &state.active)
            .finish()
    }
}

impl CartStore {
    /// Load the cart from storage and start the persistence writer.
    ///
    /// An absent key yields an empty cart. Stored content that cannot be
    /// decoded is logged and ignored; it stays in storage until the first
    /// change overwrites it. Nothing is written by loading alone.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the persistence service fails to read.
    #[instrument(skip(storage, config), fields(key = %config.storage_key))]
    pub async fn load(storage: Arc<dyn KeyValueStore>, config: &CartConfig) -> Result<Self> {
        let key = config.storage_key.clone();

        let products = match storage.get(&key).await? {
            Some(raw) => match codec::decode(&raw) {
                Ok(items) => {
                    info!(lines = items.len(), "Loaded cart from storage");
                    items
                }
                Err(e) => {
                    warn!(error = %e, "Stored cart is malformed, starting with an empty cart");
                    Vec::new()
                }
            },
            None => {
                info!("No stored cart, starting with an empty cart");
                Vec::new()
            }
        };

        let (writer, commands) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key, commands));

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                policy: config.zero_quantity_policy,
                state: RwLock::new(CartState {
                    products: products.into(),
                    active: true,
                }),
                writer,
            }),
        })
    }

    /// Whether the store still accepts reads and mutations.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .active
    }

    /// Policy applied when a decrement reaches zero.
    #[must_use]
    pub fn zero_quantity_policy(&self) -> ZeroQuantityPolicy {
        self.inner.policy
    }

    /// Current cart list.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    pub fn products(&self) -> Result<CartSnapshot> {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        if !state.active {
            return Err(CartError::NotActive {
                operation: "products",
            });
        }
        Ok(Arc::clone(&state.products))
    }

    /// Totals for the current cart list.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    pub fn summary(&self) -> Result<CartSummary> {
        let state = self.inner.state.read().unwrap_or_else(PoisonError::into_inner);
        if !state.active {
            return Err(CartError::NotActive {
                operation: "summary",
            });
        }
        Ok(CartSummary::from_items(&state.products))
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with a quantity of one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn add_to_cart(&self, item: NewLineItem) -> Result<MutationOutcome> {
        self.mutate("add_to_cart", |items| add_line(items, item))
    }

    /// Increase a line's quantity by one. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    #[instrument(skip(self))]
    pub fn increment(&self, id: &str) -> Result<MutationOutcome> {
        self.mutate("increment", |items| increment_line(items, id))
    }

    /// Decrease a line's quantity by one. Unknown ids are ignored.
    ///
    /// What happens at zero depends on the store's [`ZeroQuantityPolicy`].
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    #[instrument(skip(self))]
    pub fn decrement(&self, id: &str) -> Result<MutationOutcome> {
        let policy = self.inner.policy;
        self.mutate("decrement", |items| decrement_line(items, id, policy))
    }

    /// Remove a line entirely. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Result<MutationOutcome> {
        self.mutate("remove", |items| remove_line(items, id))
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotActive` if the store has been closed.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<MutationOutcome> {
        self.mutate("clear", |items| {
            (!items.is_empty()).then(|| (Vec::new(), MutationOutcome::Cleared))
        })
    }

    /// Wait until every change made so far has been handed to storage.
    ///
    /// # Errors
    ///
    /// Returns `CartError::WriterStopped` if the persistence writer is gone.
    pub async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.inner
            .writer
            .send(WriterCommand::Flush(ack))
            .map_err(|_| CartError::WriterStopped)?;
        done.await.map_err(|_| CartError::WriterStopped)
    }

    /// Deactivate the store and flush pending writes.
    ///
    /// Every handle observes the closed state; later reads and mutations
    /// fail with `CartError::NotActive`. Closing twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns `CartError::WriterStopped` if the persistence writer is gone.
    pub async fn close(&self) -> Result<()> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .active = false;
        self.flush().await
    }

    fn mutate(
        &self,
        operation: &'static str,
        apply: impl FnOnce(&[LineItem]) -> Option<(Vec<LineItem>, MutationOutcome)>,
    ) -> Result<MutationOutcome> {
        let mut state = self.inner.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.active {
            return Err(CartError::NotActive { operation });
        }

        let Some((next, outcome)) = apply(state.products.as_ref()) else {
            debug!(operation, "Cart unchanged");
            return Ok(MutationOutcome::Unchanged);
        };

        let snapshot: CartSnapshot = next.into();
        state.products = Arc::clone(&snapshot);

        // Queued while the lock is held so save order matches mutation order
        if self.inner.writer.send(WriterCommand::Save(snapshot)).is_err() {
            error!(operation, "Persistence writer stopped, cart change not saved");
        }

        debug!(operation, ?outcome, lines = state.products.len(), "Cart updated");
        Ok(outcome)
    }
}

// =============================================================================
// List Transformations
// =============================================================================

/// Build the list after adding one unit of `item`.
///
/// An existing line is incremented like [`increment_line`], so a line already
/// at `u32::MAX` is left unchanged.
fn add_line(items: &[LineItem], item: NewLineItem) -> Option<(Vec<LineItem>, MutationOutcome)> {
    if items.iter().any(|line| line.id == item.id) {
        return increment_line(items, item.id.as_str());
    }
    let mut next = items.to_vec();
    next.push(item.into_line_item());
    Some((next, MutationOutcome::Appended))
}

fn increment_line(items: &[LineItem], id: &str) -> Option<(Vec<LineItem>, MutationOutcome)> {
    let line = items.iter().find(|line| line.id == *id)?;
    let quantity = line.quantity.checked_add(1)?;
    Some((replace_quantity(items, id, quantity), MutationOutcome::Updated))
}

fn decrement_line(
    items: &[LineItem],
    id: &str,
    policy: ZeroQuantityPolicy,
) -> Option<(Vec<LineItem>, MutationOutcome)> {
    let line = items.iter().find(|line| line.id == *id)?;
    let quantity = line.quantity.saturating_sub(1);

    match policy {
        ZeroQuantityPolicy::Remove if quantity == 0 => remove_line(items, id),
        ZeroQuantityPolicy::Retain | ZeroQuantityPolicy::Remove => {
            (quantity != line.quantity)
                .then(|| (replace_quantity(items, id, quantity), MutationOutcome::Updated))
        }
    }
}

fn remove_line(items: &[LineItem], id: &str) -> Option<(Vec<LineItem>, MutationOutcome)> {
    if !items.iter().any(|line| line.id == *id) {
        return None;
    }
    let next = items.iter().filter(|line| line.id != *id).cloned().collect();
    Some((next, MutationOutcome::Removed))
}

fn replace_quantity(items: &[LineItem], id: &str, quantity: u32) -> Vec<LineItem> {
    items
        .iter()
        .map(|line| {
            if line.id == *id {
                with_quantity(line, quantity)
            } else {
                line.clone()
            }
        })
        .collect()
}

fn with_quantity(line: &LineItem, quantity: u32) -> LineItem {
    LineItem {
        quantity,
        ..line.clone()
    }
}

// =============================================================================
// Persistence Writer
// =============================================================================

/// Apply queued commands in order until every store handle is dropped.
async fn run_writer(
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut commands: mpsc::UnboundedReceiver<WriterCommand>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            WriterCommand::Save(snapshot) => persist(storage.as_ref(), &key, &snapshot).await,
            WriterCommand::Flush(ack) => {
                // The flusher may have stopped waiting
                let _ = ack.send(());
            }
        }
    }
    debug!(key = %key, "Persistence writer stopped");
}

async fn persist(storage: &dyn KeyValueStore, key: &str, items: &[LineItem]) {
    let encoded = match codec::encode(items) {
        Ok(encoded) => encoded,
        Err(e) => {
            error!(key, error = %e, "Failed to encode cart");
            return;
        }
    };

    match storage.set(key, &encoded).await {
        Ok(()) => debug!(key, lines = items.len(), "Cart persisted"),
        Err(e) => error!(key, error = %e, "Failed to persist cart"),
    }
}
