//! Cart line items

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    prices::Paise,
    variants::{LineKey, Variant},
};

/// One (product, variant, quantity) entry in a cart.
///
/// Name and unit price are frozen at the moment the product is added, so the
/// cart keeps showing what the customer agreed to even if the catalogue
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier.
    pub product_id: Uuid,

    /// Seller the product belongs to.
    pub seller_id: Uuid,

    /// Product name at the time of adding.
    pub name: String,

    /// Unit price at the time of adding.
    pub unit_price: Paise,

    /// Product image URL, if any.
    pub image: Option<String>,

    /// Selected variant.
    pub variant: Variant,

    /// Quantity, always at least 1.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item, clamping the quantity to a minimum of 1.
    #[must_use]
    pub fn new(
        product_id: Uuid,
        seller_id: Uuid,
        name: impl Into<String>,
        unit_price: Paise,
        variant: Variant,
        quantity: u32,
    ) -> Self {
        Self {
            product_id,
            seller_id,
            name: name.into(),
            unit_price,
            image: None,
            variant,
            quantity: quantity.max(1),
        }
    }

    /// Attaches a product image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The compound identity of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id, self.variant.clone())
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Paise {
        Paise::new(self.unit_price.value().saturating_mul(u64::from(self.quantity)))
    }
}
