use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use simshop_core::ProductId;

use crate::product::{Product, ProductLookup};

/// Catalog load/parse failure.
///
/// Recoverable: the store keeps whatever catalog it had before the failed
/// load (empty if it never loaded), and the caller decides how to report it.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog document could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog document is invalid: {0}")]
    Invalid(String),
}

impl LoadError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Wire shape of the catalog source document.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    products: Vec<ProductRecord>,
}

#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: u32,
    title: String,
    desc: String,
    img: String,
    price: f64,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId::new(record.id),
            title: record.title,
            description: record.desc,
            image_url: record.img,
            price: record.price,
        }
    }
}

/// Read-only product catalog for the session.
#[derive(Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog document and replace the in-memory catalog.
    ///
    /// The replacement is all-or-nothing: any parse or validation failure
    /// leaves the prior catalog untouched.
    pub fn load_json(&mut self, raw: &str) -> Result<(), LoadError> {
        let document: CatalogDocument = serde_json::from_str(raw)?;

        let mut seen = HashSet::new();
        for record in &document.products {
            if !record.price.is_finite() || record.price < 0.0 {
                return Err(LoadError::invalid(format!(
                    "product {} has invalid price {}",
                    record.id, record.price
                )));
            }
            if !seen.insert(record.id) {
                return Err(LoadError::invalid(format!(
                    "duplicate product id {}",
                    record.id
                )));
            }
        }

        self.products = document.products.into_iter().map(Product::from).collect();
        tracing::info!(count = self.products.len(), "catalog loaded");
        Ok(())
    }

    pub fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductLookup for CatalogStore {
    fn find(&self, id: ProductId) -> Option<&Product> {
        self.find_by_id(id)
    }
}
