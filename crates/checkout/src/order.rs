use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use simshop_core::{OrderId, ProductId};
use simshop_pricing::OrderSummary;

/// Checkout input: who the order is for.
///
/// All three fields are required non-empty after trimming. No format
/// validation beyond that (the backend is simulated).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub address: String,
}

impl CustomerInfo {
    /// Names of the required fields that are empty after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.address.trim().is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Whitespace-trimmed copy, as stored on the order.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

/// One line of a finalized order: a snapshot, decoupled from the live
/// catalog and cart so later catalog changes never alter history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub unit_price: f64,
}

/// A completed checkout. Immutable once created; lives in the order log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub customer: CustomerInfo,
    pub line_items: Vec<OrderLineItem>,
    pub summary: OrderSummary,
    pub created_at: DateTime<Utc>,
}

/// Order-id mint: `ORD-<millis>-<counter>`.
///
/// The timestamp suffix comes from the caller's clock and the counter makes
/// ids collision-free within a session even under a frozen test clock.
#[derive(Debug, Default)]
pub struct OrderIds {
    counter: AtomicU64,
}

impl OrderIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&self, at: DateTime<Utc>) -> OrderId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        OrderId::new(format!("ORD-{}-{}", at.timestamp_millis(), n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn customer(name: &str, email: &str, address: &str) -> CustomerInfo {
        CustomerInfo {
            name: name.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        }
    }

    #[test]
    fn complete_customer_info_has_no_missing_fields() {
        let info = customer("Juan Pérez", "juan.perez@example.com", "Córdoba 123");
        assert!(info.missing_fields().is_empty());
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let info = customer("  ", "juan.perez@example.com", "");
        assert_eq!(info.missing_fields(), vec!["name", "address"]);
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let info = customer("  Juan  ", " j@example.com ", " Córdoba 123 ");
        let trimmed = info.trimmed();
        assert_eq!(trimmed.name, "Juan");
        assert_eq!(trimmed.email, "j@example.com");
        assert_eq!(trimmed.address, "Córdoba 123");
    }

    #[test]
    fn order_ids_are_unique_under_a_frozen_clock() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let ids = OrderIds::new();
        let a = ids.next(at);
        let b = ids.next(at);
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("ORD-"));
    }
}
