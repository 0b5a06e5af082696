//! Products

use std::fmt;

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Stable product identifier assigned by the catalog backend.
///
/// Display names are not unique enough to key a cart line; two products can
/// legitimately share a name.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Create an identifier from its backend string form.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A product as fetched from the catalog backend at a point in time.
///
/// The cart never mutates a snapshot; it only reads `stock` when deciding an
/// add or increment. A snapshot may go stale relative to live backend stock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, unique within the catalog.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price, non-negative.
    pub price: Decimal,

    /// Units available when the snapshot was taken.
    pub stock: u32,

    /// Ordered image references; the first one is the thumbnail.
    #[serde(default)]
    pub images: SmallVec<[String; 4]>,

    /// Catalog category, when the backend provides one.
    #[serde(default)]
    pub category: Option<String>,

    /// Short description for product cards.
    #[serde(default)]
    pub description: Option<String>,
}

/// The full product list fetched at page load, indexed by id for the stock
/// re-checks the cart performs.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a product list. When two products share an id,
    /// the first one wins.
    pub fn new(products: impl Into<Vec<Product>>) -> Self {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (position, product) in products.iter().enumerate() {
            index.entry(product.id.clone()).or_insert(position);
        }

        Catalog { products, index }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
    }

    /// Iterate over all products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Iterate over the purchasable subset (`stock > 0`).
    pub fn in_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.stock > 0)
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn product(id: &str, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: id.to_owned(),
            price: Decimal::from(100),
            stock,
            images: smallvec![format!("{id}.webp")],
            category: None,
            description: None,
        }
    }

    #[test]
    fn find_returns_product_by_id() {
        let catalog = Catalog::new([product("bowie-10", 2), product("verijero-12", 0)]);

        let found = catalog.find(&ProductId::from("verijero-12"));

        assert_eq!(found.map(|p| p.stock), Some(0));
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let catalog = Catalog::new([product("bowie-10", 2)]);

        assert!(catalog.find(&ProductId::from("facon-20")).is_none());
    }

    #[test]
    fn duplicate_ids_first_wins() {
        let mut second = product("bowie-10", 7);
        second.name = "Bowie-10 (restock)".to_owned();

        let catalog = Catalog::new([product("bowie-10", 2), second]);

        let found = catalog.find(&ProductId::from("bowie-10"));

        assert_eq!(found.map(|p| p.stock), Some(2));
    }

    #[test]
    fn in_stock_skips_unavailable_products() {
        let catalog = Catalog::new([
            product("bowie-10", 2),
            product("verijero-12", 0),
            product("facon-20", 1),
        ]);

        let ids: Vec<&str> = catalog.in_stock().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, vec!["bowie-10", "facon-20"]);
    }

    #[test]
    fn len_and_is_empty() {
        let empty = Catalog::default();
        let catalog = Catalog::new([product("bowie-10", 2)]);

        assert!(empty.is_empty());
        assert_eq!(catalog.len(), 1);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn product_deserializes_without_optional_fields() {
        let raw = r#"{"id":"bowie-10","name":"Bowie-10","price":1000.0,"stock":2}"#;

        let parsed: Product = serde_json::from_str(raw).unwrap_or_else(|err| {
            panic!("product should deserialize: {err}");
        });

        assert_eq!(parsed.id, ProductId::from("bowie-10"));
        assert_eq!(parsed.price, Decimal::from(1000));
        assert!(parsed.images.is_empty());
        assert!(parsed.category.is_none());
    }
}
