//! `simshop-catalog` — read-only product catalog for the session.
//!
//! The catalog is loaded once from a JSON document (how that document was
//! fetched is the caller's concern) and never mutated afterwards. A successful
//! reload replaces the whole product list; a failed one leaves it untouched.

pub mod product;
pub mod store;

pub use product::{Product, ProductLookup};
pub use store::{CatalogStore, LoadError};
