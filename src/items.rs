//! Line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::catalog::{Product, ProductId};

/// One cart entry: the product display fields captured at add time plus a
/// quantity.
///
/// Invariant: `quantity >= 1` while the line exists. The store enforces the
/// upper stock bound at mutation time; the `stock` field records what was
/// seen when the line was created and may have diverged from the live
/// catalog since.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: ProductId,
    name: String,
    price: Decimal,
    stock: u32,
    #[serde(default)]
    images: SmallVec<[String; 4]>,
    quantity: u32,
}

impl LineItem {
    /// Create the first unit of a product.
    #[must_use]
    pub fn first_of(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            images: product.images.clone(),
            quantity: 1,
        }
    }

    /// Id of the product this line refers to.
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name copied from the snapshot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price copied from the snapshot.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Stock seen when the line was created.
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Image references copied from the snapshot.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Units of this product in the cart.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Per-line subtotal: `price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    pub(crate) fn increment(&mut self) {
        self.quantity += 1;
    }

    /// Callers remove the line instead of lowering quantity 1 to 0.
    pub(crate) fn decrement(&mut self) {
        self.quantity -= 1;
    }
}
