//! Strongly-typed identifiers used across the storefront domain.

use serde::{Deserialize, Serialize};

/// Identifier of a catalog product.
///
/// Catalog documents use small integer ids; the newtype keeps them from being
/// confused with quantities or line numbers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl ProductId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ProductId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Identifier of a finalized order.
///
/// Time-derived (`ORD-<millis>-<counter>`); unique within a session. Opaque to
/// everything except the generator that mints it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for OrderId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
