//! `simshop-cart` — the session shopping cart.
//!
//! Mutable line entries (product id, quantity) with persist-on-write through
//! the storage adapter. All mutations are synchronous and run to completion,
//! so each read-modify-persist sequence is atomic per call.

pub mod cart;

pub use cart::{CART_KEY, CartLine, CartStore};
