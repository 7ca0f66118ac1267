use std::time::Duration;

use thiserror::Error;

use simshop_cart::CartStore;
use simshop_catalog::ProductLookup;
use simshop_core::Clock;
use simshop_pricing::PricingEngine;
use simshop_storage::{KeyValueStore, StorageError};

use crate::log::OrderLog;
use crate::order::{CustomerInfo, Order, OrderIds, OrderLineItem};

/// Checkout failure.
///
/// All variants are recoverable: the cart and the order log are left exactly
/// as they were.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Order builder: turns a validated cart + customer into a logged order.
#[derive(Debug)]
pub struct Checkout<S: KeyValueStore, C: Clock> {
    engine: PricingEngine,
    log: OrderLog<S>,
    ids: OrderIds,
    clock: C,
    latency: Duration,
}

impl<S: KeyValueStore, C: Clock> Checkout<S, C> {
    /// Default simulated round-trip latency.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(700);

    pub fn new(engine: PricingEngine, store: S, clock: C) -> Self {
        Self {
            engine,
            log: OrderLog::new(store),
            ids: OrderIds::new(),
            clock,
            latency: Self::DEFAULT_LATENCY,
        }
    }

    /// Override the simulated latency (tests run with zero).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn order_log(&self) -> &OrderLog<S> {
        &self.log
    }

    /// Finalize the purchase.
    ///
    /// Preconditions (checked before any suspension or mutation): non-empty
    /// cart, all customer fields non-empty after trimming. On success the
    /// order is appended to the log, the cart is cleared, and the completed
    /// order is returned for display.
    ///
    /// There is no cancellation path once invoked and no timeout on the
    /// simulated latency; a real payment backend would need both.
    pub async fn finalize<CS: KeyValueStore>(
        &self,
        customer: &CustomerInfo,
        cart: &mut CartStore<CS>,
        catalog: &impl ProductLookup,
    ) -> Result<Order, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let missing = customer.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::Validation { missing });
        }

        let summary = self.engine.summarize(cart.snapshot(), catalog);

        // Snapshot line items now; later catalog changes must not alter the
        // order. Unresolvable products snapshot as title "" / price 0, the
        // same tolerance the pricing engine applies.
        let line_items: Vec<OrderLineItem> = cart
            .snapshot()
            .iter()
            .map(|line| {
                let product = catalog.find(line.product_id);
                OrderLineItem {
                    product_id: line.product_id,
                    title: product.map(|p| p.title.clone()).unwrap_or_default(),
                    quantity: line.quantity,
                    unit_price: product.map(|p| p.price).unwrap_or(0.0),
                }
            })
            .collect();

        // Simulated backend round-trip.
        tokio::time::sleep(self.latency).await;

        let created_at = self.clock.now();
        let order = Order {
            order_id: self.ids.next(created_at),
            customer: customer.trimmed(),
            line_items,
            summary,
            created_at,
        };

        self.log.append(&order)?;
        cart.clear();

        tracing::info!(
            order_id = %order.order_id,
            total = order.summary.total,
            "checkout completed"
        );
        Ok(order)
    }
}
