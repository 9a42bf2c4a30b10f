//! # Product Catalog
//!
//! The fixed product table plus the `custom` price sentinel.
//!
//! The original form kept product prices in `data-price` attributes on the
//! `<select>` options; here the catalog is an explicit value constructed once
//! at startup, and `custom` is the one id whose unit price comes from user
//! input instead (floor: [`crate::MIN_CUSTOM_PRICE`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Sentinel product id for user-priced purchases.
pub const CUSTOM_PRODUCT_ID: &str = "custom";

/// Display name recorded for custom-priced purchases.
pub const CUSTOM_PRODUCT_NAME: &str = "Custom Package";

// =============================================================================
// Product
// =============================================================================

/// A product available for purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Form value / catalog key.
    pub id: String,

    /// Display name shown in the form and on receipts.
    pub name: String,

    /// Catalog price in whole rupiah.
    pub price: Money,
}

// =============================================================================
// Product Catalog
// =============================================================================

/// Immutable product table, constructed once at startup.
#[derive(Debug, Clone)]
pub struct ProductCatalog {
    products: HashMap<String, Product>,
}

impl ProductCatalog {
    /// Builds a catalog from a list of products.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        ProductCatalog {
            products: products
                .into_iter()
                .map(|p| (p.id.clone(), p))
                .collect(),
        }
    }

    /// Looks up a product by id. The `custom` sentinel is not a catalog
    /// entry; resolve it with [`ProductCatalog::resolve`] instead.
    pub fn lookup(&self, product_id: &str) -> Option<&Product> {
        self.products.get(product_id)
    }

    /// Resolves a product id to `(display_name, unit_price)`.
    ///
    /// For catalog products the price comes from the table (never from the
    /// caller). For `custom` the caller-supplied price is used as-is; the
    /// Rp 1.000 floor is the validator's job at the form boundary.
    pub fn resolve(
        &self,
        product_id: &str,
        custom_price: Money,
    ) -> CoreResult<(String, Money)> {
        if product_id == CUSTOM_PRODUCT_ID {
            return Ok((CUSTOM_PRODUCT_NAME.to_string(), custom_price));
        }

        self.products
            .get(product_id)
            .map(|p| (p.name.clone(), p.price))
            .ok_or_else(|| CoreError::UnknownProduct(product_id.to_string()))
    }

    /// Number of catalog entries (excluding the `custom` sentinel).
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for ProductCatalog {
    /// The packages offered by the payment form.
    fn default() -> Self {
        let product = |id: &str, name: &str, price: i64| Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Money::new(price),
        };

        ProductCatalog::new([
            product("basic", "Paket Basic", 150_000),
            product("standard", "Paket Standard", 300_000),
            product("premium", "Paket Premium", 500_000),
            product("enterprise", "Paket Enterprise", 1_000_000),
        ])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_product() {
        let catalog = ProductCatalog::default();
        let premium = catalog.lookup("premium").unwrap();
        assert_eq!(premium.name, "Paket Premium");
        assert_eq!(premium.price, Money::new(500_000));
    }

    #[test]
    fn test_resolve_catalog_price_wins_over_caller_price() {
        let catalog = ProductCatalog::default();
        // Caller-supplied price is ignored for catalog products
        let (name, price) = catalog.resolve("basic", Money::new(1)).unwrap();
        assert_eq!(name, "Paket Basic");
        assert_eq!(price, Money::new(150_000));
    }

    #[test]
    fn test_resolve_custom_uses_caller_price() {
        let catalog = ProductCatalog::default();
        let (name, price) = catalog
            .resolve(CUSTOM_PRODUCT_ID, Money::new(75_000))
            .unwrap();
        assert_eq!(name, CUSTOM_PRODUCT_NAME);
        assert_eq!(price, Money::new(75_000));
    }

    #[test]
    fn test_resolve_unknown_product_errors() {
        let catalog = ProductCatalog::default();
        let err = catalog.resolve("gold", Money::zero()).unwrap_err();
        assert!(matches!(err, CoreError::UnknownProduct(id) if id == "gold"));
    }
}
