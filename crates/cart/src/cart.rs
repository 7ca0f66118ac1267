use serde::{Deserialize, Serialize};

use simshop_core::ProductId;
use simshop_storage::KeyValueStore;

/// Storage key for the persisted cart state.
pub const CART_KEY: &str = "sim_cart_v1";

/// One product-id/quantity pairing in the cart.
///
/// Serializes as `{"id": .., "qty": ..}`, the persisted wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// The session cart: an ordered list of lines, at most one per product id.
///
/// Invariants held across every operation:
/// - no two lines share a product id
/// - every stored quantity is >= 1
/// - insertion order is first-add order; later updates do not reorder
///
/// Every mutation persists the whole state. Persist failures are logged and
/// swallowed; the in-memory state stays the source of truth for the session.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
    store: S,
    lines: Vec<CartLine>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open the cart, restoring any persisted state.
    ///
    /// An absent, corrupt, or unparsable stored value degrades to an empty
    /// cart; that is never surfaced as an error.
    pub fn open(store: S) -> Self {
        let lines = match store.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => Self::sanitize(lines),
                Err(err) => {
                    tracing::warn!(%err, "persisted cart unparsable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(%err, "persisted cart unreadable, starting empty");
                Vec::new()
            }
        };

        Self { store, lines }
    }

    /// Drop persisted lines that violate the invariants (zero quantities,
    /// duplicate ids keep their first occurrence).
    fn sanitize(lines: Vec<CartLine>) -> Vec<CartLine> {
        let mut kept: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines {
            if line.quantity == 0 {
                tracing::warn!(product_id = %line.product_id, "dropping persisted zero-quantity line");
                continue;
            }
            if kept.iter().any(|l| l.product_id == line.product_id) {
                tracing::warn!(product_id = %line.product_id, "dropping persisted duplicate line");
                continue;
            }
            kept.push(line);
        }
        kept
    }

    fn persist(&self) {
        let encoded = match serde_json::to_string(&self.lines) {
            Ok(encoded) => encoded,
            Err(err) => {
                tracing::warn!(%err, "cart state could not be encoded");
                return;
            }
        };
        if let Err(err) = self.store.set(CART_KEY, &encoded) {
            tracing::warn!(%err, "cart state could not be persisted");
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// Merges into the existing line if one exists, otherwise appends a new
    /// line. A zero quantity is normalized to 1.
    pub fn add(&mut self, product_id: ProductId, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product_id,
                quantity,
            }),
        }
        tracing::debug!(%product_id, quantity, "cart add");
        self.persist();
    }

    /// Add a single unit of a product (the common storefront path).
    pub fn add_one(&mut self, product_id: ProductId) {
        self.add(product_id, 1);
    }

    /// Remove a product's line. Silently a no-op if it is not in the cart.
    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
        tracing::debug!(%product_id, "cart remove");
        self.persist();
    }

    /// Replace a line's quantity.
    ///
    /// No-op for a product that is not in the cart; a quantity <= 0 removes
    /// the line instead of storing it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if !self.lines.iter().any(|l| l.product_id == product_id) {
            return;
        }
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.persist();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
    }

    /// Read-only view for rendering and pricing.
    pub fn snapshot(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line quantities (the UI badge count).
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
