use serde::{Deserialize, Serialize};

use simshop_cart::CartLine;
use simshop_catalog::ProductLookup;

/// Recognized pricing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fraction of the subtotal charged as tax.
    pub tax_rate: f64,
    /// Flat fee applied whenever the cart is non-empty.
    pub shipping_fee: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: 0.21,
            shipping_fee: 800.0,
        }
    }
}

/// Derived totals for one cart state.
///
/// Full precision; rounding to the settlement unit happens only through
/// [`OrderSummary::rounded`], never compounded back into these fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: f64,
    pub tax: f64,
    pub shipping: f64,
    pub total: f64,
}

impl OrderSummary {
    /// Zero summary for an empty cart.
    pub fn zero() -> Self {
        Self {
            subtotal: 0.0,
            tax: 0.0,
            shipping: 0.0,
            total: 0.0,
        }
    }

    /// Settlement-unit view (nearest integer), for display and receipts.
    pub fn rounded(&self) -> RoundedSummary {
        RoundedSummary {
            subtotal: self.subtotal.round() as i64,
            tax: self.tax.round() as i64,
            shipping: self.shipping.round() as i64,
            total: self.total.round() as i64,
        }
    }
}

/// Summary rounded to whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedSummary {
    pub subtotal: i64,
    pub tax: i64,
    pub shipping: i64,
    pub total: i64,
}

/// Pure pricing computation over cart lines and a catalog lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Compute the summary for one cart state.
    ///
    /// Lines whose product does not resolve contribute zero to the subtotal
    /// (stale-cart tolerance); they still count toward the cart being
    /// non-empty for the shipping fee.
    pub fn summarize(&self, lines: &[CartLine], catalog: &impl ProductLookup) -> OrderSummary {
        let subtotal: f64 = lines
            .iter()
            .filter_map(|line| {
                catalog
                    .find(line.product_id)
                    .map(|p| p.price * f64::from(line.quantity))
            })
            .sum();

        let tax = subtotal * self.config.tax_rate;
        let shipping = if lines.is_empty() {
            0.0
        } else {
            self.config.shipping_fee
        };

        OrderSummary {
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use simshop_cart::CartStore;
    use simshop_catalog::CatalogStore;
    use simshop_core::ProductId;
    use simshop_storage::MemoryStore;

    fn catalog_with(entries: &[(u32, f64)]) -> CatalogStore {
        let products: Vec<String> = entries
            .iter()
            .map(|(id, price)| {
                format!(
                    r#"{{"id": {id}, "title": "P{id}", "desc": "", "img": "", "price": {price}}}"#
                )
            })
            .collect();
        let doc = format!(r#"{{"products": [{}]}}"#, products.join(","));

        let mut catalog = CatalogStore::new();
        catalog.load_json(&doc).unwrap();
        catalog
    }

    fn cart_with(entries: &[(u32, u32)]) -> CartStore<Arc<MemoryStore>> {
        let mut cart = CartStore::open(Arc::new(MemoryStore::new()));
        for &(id, qty) in entries {
            cart.add(ProductId::new(id), qty);
        }
        cart
    }

    #[test]
    fn two_units_at_1000_with_default_rates_totals_3220() {
        let catalog = catalog_with(&[(1, 1000.0)]);
        let cart = cart_with(&[(1, 2)]);
        let engine = PricingEngine::new(PricingConfig {
            tax_rate: 0.21,
            shipping_fee: 800.0,
        });

        let summary = engine.summarize(cart.snapshot(), &catalog);
        assert_eq!(summary.subtotal, 2000.0);
        assert_eq!(summary.tax, 420.0);
        assert_eq!(summary.shipping, 800.0);
        assert_eq!(summary.total, 3220.0);
    }

    #[test]
    fn empty_cart_prices_to_zero_regardless_of_catalog() {
        let catalog = catalog_with(&[(1, 1000.0), (2, 250.0)]);
        let engine = PricingEngine::default();

        let summary = engine.summarize(&[], &catalog);
        assert_eq!(summary, OrderSummary::zero());
    }

    #[test]
    fn unresolvable_lines_contribute_zero_to_subtotal() {
        let catalog = catalog_with(&[(1, 100.0)]);
        let cart = cart_with(&[(1, 1), (99, 5)]);
        let engine = PricingEngine::new(PricingConfig {
            tax_rate: 0.0,
            shipping_fee: 0.0,
        });

        let summary = engine.summarize(cart.snapshot(), &catalog);
        assert_eq!(summary.subtotal, 100.0);
    }

    #[test]
    fn cart_of_only_stale_lines_still_pays_shipping() {
        let catalog = catalog_with(&[]);
        let cart = cart_with(&[(42, 1)]);
        let engine = PricingEngine::default();

        let summary = engine.summarize(cart.snapshot(), &catalog);
        assert_eq!(summary.subtotal, 0.0);
        assert_eq!(summary.shipping, 800.0);
    }

    #[test]
    fn summarize_is_deterministic_and_idempotent() {
        let catalog = catalog_with(&[(1, 333.33), (2, 0.07)]);
        let cart = cart_with(&[(1, 3), (2, 7)]);
        let engine = PricingEngine::default();

        let first = engine.summarize(cart.snapshot(), &catalog);
        let second = engine.summarize(cart.snapshot(), &catalog);
        assert_eq!(first, second);
        assert_eq!(first.rounded(), second.rounded());
    }

    #[test]
    fn rounding_happens_only_at_the_boundary() {
        let catalog = catalog_with(&[(1, 10.4)]);
        let cart = cart_with(&[(1, 1)]);
        let engine = PricingEngine::new(PricingConfig {
            tax_rate: 0.0,
            shipping_fee: 0.0,
        });

        let summary = engine.summarize(cart.snapshot(), &catalog);
        assert_eq!(summary.subtotal, 10.4);
        assert_eq!(summary.rounded().subtotal, 10);
        // the full-precision fields are untouched by rounding
        assert_eq!(summary.total, 10.4);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: totals are non-negative and internally consistent
            /// for any cart over a small catalog.
            #[test]
            fn totals_are_consistent(
                entries in proptest::collection::vec((0u32..6, 1u32..10), 0..6)
            ) {
                let catalog = catalog_with(&[(0, 10.0), (1, 99.9), (2, 0.0), (3, 1250.0)]);
                let cart = cart_with(&entries);
                let engine = PricingEngine::default();

                let summary = engine.summarize(cart.snapshot(), &catalog);
                prop_assert!(summary.subtotal >= 0.0);
                prop_assert!(summary.tax >= 0.0);
                prop_assert!(summary.shipping >= 0.0);
                prop_assert_eq!(summary.total, summary.subtotal + summary.tax + summary.shipping);

                let again = engine.summarize(cart.snapshot(), &catalog);
                prop_assert_eq!(summary, again);
            }
        }
    }
}
