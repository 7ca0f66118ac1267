//! `simshop-storage` — durable key-value persistence adapter.
//!
//! The cart and the order log both persist through this seam. The contract is
//! deliberately narrow (string values, synchronous get/set) so the consumers
//! own their serialization formats and their corruption-recovery policies.

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StorageError};
