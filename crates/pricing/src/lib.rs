//! `simshop-pricing` — order total computation.
//!
//! Pure functions of cart state and catalog lookup; no IO, no side effects.
//! Recomputing a summary from unchanged inputs always yields identical fields.

pub mod engine;

pub use engine::{OrderSummary, PricingConfig, PricingEngine, RoundedSummary};
