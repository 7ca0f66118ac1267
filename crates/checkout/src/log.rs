use simshop_storage::{KeyValueStore, StorageError};

use crate::order::Order;

/// Storage key for the persisted order log.
pub const ORDERS_KEY: &str = "sim_orders_v1";

/// Durable, append-only record of completed checkouts.
///
/// Appending is a read-modify-write of the full log under the single key.
/// That sequence is not protected against concurrent appends from independent
/// contexts; this system is single-user/single-context by design.
#[derive(Debug)]
pub struct OrderLog<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> OrderLog<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All recorded orders, oldest first.
    ///
    /// A corrupt or unreadable stored log degrades to empty, same policy as
    /// the cart key.
    pub fn all(&self) -> Vec<Order> {
        match self.store.get(ORDERS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(orders) => orders,
                Err(err) => {
                    tracing::warn!(%err, "persisted order log unparsable, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(%err, "persisted order log unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Append one order to the log.
    pub fn append(&self, order: &Order) -> Result<(), StorageError> {
        let mut orders = self.all();
        orders.push(order.clone());
        let encoded = serde_json::to_string(&orders)?;
        self.store.set(ORDERS_KEY, &encoded)?;
        tracing::info!(order_id = %order.order_id, count = orders.len(), "order appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use simshop_core::OrderId;
    use simshop_pricing::OrderSummary;
    use simshop_storage::MemoryStore;

    use crate::order::CustomerInfo;

    fn sample_order(id: &str) -> Order {
        Order {
            order_id: OrderId::new(id),
            customer: CustomerInfo {
                name: "Juan Pérez".to_string(),
                email: "juan.perez@example.com".to_string(),
                address: "Córdoba 123".to_string(),
            },
            line_items: Vec::new(),
            summary: OrderSummary::zero(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn append_then_all_round_trips() {
        let log = OrderLog::new(Arc::new(MemoryStore::new()));
        log.append(&sample_order("ORD-1-1")).unwrap();
        log.append(&sample_order("ORD-1-2")).unwrap();

        let orders = log.all();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].order_id.as_str(), "ORD-1-1");
        assert_eq!(orders[1].order_id.as_str(), "ORD-1-2");
    }

    #[test]
    fn empty_store_reads_as_empty_log() {
        let log = OrderLog::new(Arc::new(MemoryStore::new()));
        assert!(log.all().is_empty());
    }

    #[test]
    fn corrupt_stored_log_reads_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.set(ORDERS_KEY, "][").unwrap();
        let log = OrderLog::new(Arc::clone(&store));
        assert!(log.all().is_empty());
    }

    #[test]
    fn persisted_records_use_the_documented_field_names() {
        let store = Arc::new(MemoryStore::new());
        let log = OrderLog::new(Arc::clone(&store));
        log.append(&sample_order("ORD-1-1")).unwrap();

        let raw = store.get(ORDERS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"orderId\""));
        assert!(raw.contains("\"lineItems\""));
        assert!(raw.contains("\"createdAt\""));
    }
}
