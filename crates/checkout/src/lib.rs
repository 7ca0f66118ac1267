//! `simshop-checkout` — order finalization.
//!
//! Validates the checkout input, snapshots cart lines against the catalog at
//! the instant of purchase, appends the immutable order to the persisted
//! order log, and clears the cart. The round-trip to the simulated backend is
//! async with configurable latency.

pub mod log;
pub mod order;
pub mod service;

pub use log::{ORDERS_KEY, OrderLog};
pub use order::{CustomerInfo, Order, OrderIds, OrderLineItem};
pub use service::{Checkout, CheckoutError};
