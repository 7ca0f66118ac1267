//! `simshop-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the storefront
//! modules (no storage or rendering concerns).

pub mod clock;
pub mod id;

pub use clock::{Clock, FixedClock, SystemClock};
pub use id::{OrderId, ProductId};
