//! Wishlist Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront::{items::LineItem, prices::Paise, variants::Variant};

/// A saved-for-later product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub product_id: Uuid,
    pub seller_id: Uuid,
    pub name: String,
    pub unit_price: Paise,
    pub image: Option<String>,
}

impl WishlistEntry {
    /// Turns the entry into a cart line with quantity 1 and the default
    /// variant; size and colour are chosen at the product page, not here.
    #[must_use]
    pub fn into_line_item(self) -> LineItem {
        let mut item = LineItem::new(
            self.product_id,
            self.seller_id,
            self.name,
            self.unit_price,
            Variant::default(),
            1,
        );

        item.image = self.image;
        item
    }
}
