use std::time::Duration;

use simshop_cart::{CartLine, CartStore};
use simshop_catalog::{CatalogStore, LoadError, Product};
use simshop_checkout::{Checkout, CheckoutError, CustomerInfo, Order};
use simshop_core::{Clock, ProductId, SystemClock};
use simshop_pricing::{OrderSummary, PricingConfig, PricingEngine};
use simshop_storage::KeyValueStore;

/// Command interface and read-model over the storefront core.
///
/// Owns the catalog, the cart, and the checkout wiring over one shared
/// persistence adapter. The view layer calls the commands (`add_to_cart`,
/// `remove_from_cart`, `set_quantity`, `clear_cart`, `finalize`) and polls
/// the read-model (`cart_snapshot`, `summary`, `total_units`, `orders`).
///
/// Policy decisions like "confirm before removing" belong to the view; the
/// commands here are unconditional and idempotent.
#[derive(Debug)]
pub struct Storefront<S: KeyValueStore + Clone, C: Clock> {
    catalog: CatalogStore,
    cart: CartStore<S>,
    engine: PricingEngine,
    checkout: Checkout<S, C>,
}

impl<S: KeyValueStore + Clone> Storefront<S, SystemClock> {
    /// Storefront over a shared adapter with default pricing and clock.
    pub fn open(store: S) -> Self {
        Self::new(store, PricingConfig::default(), SystemClock)
    }
}

impl<S: KeyValueStore + Clone, C: Clock> Storefront<S, C> {
    pub fn new(store: S, config: PricingConfig, clock: C) -> Self {
        let engine = PricingEngine::new(config);
        Self {
            catalog: CatalogStore::new(),
            cart: CartStore::open(store.clone()),
            engine,
            checkout: Checkout::new(engine, store, clock),
        }
    }

    /// Override the simulated checkout latency (tests run with zero).
    pub fn with_checkout_latency(mut self, latency: Duration) -> Self {
        self.checkout = self.checkout.with_latency(latency);
        self
    }

    // --- catalog ---

    /// Load (or replace) the session catalog from a fetched document.
    pub fn load_catalog(&mut self, raw: &str) -> Result<(), LoadError> {
        self.catalog.load_json(raw)
    }

    pub fn products(&self) -> &[Product] {
        self.catalog.products()
    }

    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.find_by_id(id)
    }

    // --- cart commands ---

    pub fn add_to_cart(&mut self, id: ProductId) {
        self.cart.add_one(id);
    }

    pub fn add_units(&mut self, id: ProductId, quantity: u32) {
        self.cart.add(id, quantity);
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.remove(id);
    }

    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        self.cart.set_quantity(id, quantity);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    // --- read-model ---

    pub fn cart_snapshot(&self) -> &[CartLine] {
        self.cart.snapshot()
    }

    pub fn total_units(&self) -> u64 {
        self.cart.total_units()
    }

    pub fn summary(&self) -> OrderSummary {
        self.engine.summarize(self.cart.snapshot(), &self.catalog)
    }

    pub fn orders(&self) -> Vec<Order> {
        self.checkout.order_log().all()
    }

    // --- checkout ---

    /// Finalize the purchase: validates, logs the order, clears the cart.
    pub async fn finalize(&mut self, customer: &CustomerInfo) -> Result<Order, CheckoutError> {
        self.checkout
            .finalize(customer, &mut self.cart, &self.catalog)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use simshop_storage::MemoryStore;

    const CATALOG: &str = r#"{"products": [
        {"id": 1, "title": "Mate Imperial", "desc": "Calabaza curada", "img": "mate.jpg", "price": 1000},
        {"id": 2, "title": "Bombilla Pico", "desc": "Acero", "img": "bombilla.jpg", "price": 450}
    ]}"#;

    fn storefront() -> Storefront<Arc<MemoryStore>, SystemClock> {
        let mut shop = Storefront::open(Arc::new(MemoryStore::new()))
            .with_checkout_latency(Duration::ZERO);
        shop.load_catalog(CATALOG).unwrap();
        shop
    }

    #[test]
    fn commands_drive_the_cart_read_model() {
        let mut shop = storefront();
        shop.add_to_cart(ProductId::new(1));
        shop.add_units(ProductId::new(2), 3);
        shop.set_quantity(ProductId::new(2), 2);

        assert_eq!(shop.total_units(), 3);
        assert_eq!(shop.cart_snapshot().len(), 2);

        shop.remove_from_cart(ProductId::new(1));
        assert_eq!(shop.cart_snapshot().len(), 1);

        shop.clear_cart();
        assert!(shop.cart_snapshot().is_empty());
    }

    #[test]
    fn summary_reflects_the_current_cart() {
        let mut shop = storefront();
        shop.add_units(ProductId::new(1), 2);

        let summary = shop.summary();
        assert_eq!(summary.subtotal, 2000.0);
        assert_eq!(summary.total, 2000.0 + 420.0 + 800.0);
    }

    #[test]
    fn bad_catalog_load_reports_and_keeps_prior_state() {
        let mut shop = storefront();
        assert!(shop.load_catalog("oops").is_err());
        assert_eq!(shop.products().len(), 2);
    }

    #[tokio::test]
    async fn finalize_flows_through_to_the_order_log() {
        let mut shop = storefront();
        shop.add_to_cart(ProductId::new(1));

        let customer = CustomerInfo {
            name: "Juan Pérez".to_string(),
            email: "juan.perez@example.com".to_string(),
            address: "Córdoba 123".to_string(),
        };
        let order = shop.finalize(&customer).await.unwrap();

        assert!(shop.cart_snapshot().is_empty());
        assert_eq!(shop.orders(), vec![order]);
    }
}
