//! `simshop-storefront` — the surface the view layer talks to.
//!
//! The UI (rendering, event wiring, confirmation dialogs) lives outside this
//! workspace; it invokes the commands here and polls the read-model. Nothing
//! in this crate renders anything.

pub mod storefront;
pub mod telemetry;

pub use storefront::Storefront;

pub use simshop_cart::CartLine;
pub use simshop_catalog::{LoadError, Product};
pub use simshop_checkout::{CheckoutError, CustomerInfo, Order};
pub use simshop_core::ProductId;
pub use simshop_pricing::{OrderSummary, PricingConfig};
