use serde::{Deserialize, Serialize};

use simshop_core::ProductId;

/// A purchasable product.
///
/// Immutable after catalog load. `price` is in minor-agnostic currency units;
/// it is validated non-negative at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub price: f64,
}

/// Lookup seam between the catalog and the pricing/checkout modules.
///
/// A miss is not an error here: cart lines may reference products that a later
/// catalog load no longer carries, and the consumers price those as zero.
pub trait ProductLookup {
    fn find(&self, id: ProductId) -> Option<&Product>;
}

impl<T> ProductLookup for &T
where
    T: ProductLookup + ?Sized,
{
    fn find(&self, id: ProductId) -> Option<&Product> {
        (**self).find(id)
    }
}
