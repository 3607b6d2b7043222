//! Cart store
//!
//! Sole owner of the client-local cart collection. Every mutating call
//! persists the full collection, so the cart survives restarts the same way
//! the web storefront's cart survives page reloads.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront::{
    cart::Cart,
    items::LineItem,
    prices::Paise,
    variants::LineKey,
};

use crate::{
    domain::cart::errors::CartStoreError,
    store::{CART_KEY, ClientStateStore},
};

const CART_SCHEMA_VERSION: u32 = 1;

/// Versioned persisted form of the cart.
#[derive(Debug, Serialize, Deserialize)]
struct CartRecord {
    version: u32,
    items: Vec<LineItem>,
}

/// Durable cart store.
pub struct CartStore {
    store: Arc<dyn ClientStateStore>,
    cart: Cart,
}

impl CartStore {
    /// Open the cart persisted in `store`, starting empty when nothing is
    /// stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored record is corrupt, carries an
    /// unsupported schema version, or the store itself fails.
    pub fn open(store: Arc<dyn ClientStateStore>) -> Result<Self, CartStoreError> {
        let cart = match store.load(CART_KEY)? {
            None => Cart::new(),
            Some(raw) => {
                let record: CartRecord =
                    serde_json::from_str(&raw).map_err(CartStoreError::Corrupt)?;

                if record.version != CART_SCHEMA_VERSION {
                    return Err(CartStoreError::UnsupportedVersion(record.version));
                }

                Cart::with_items(record.items)
            }
        };

        Ok(Self { store, cart })
    }

    /// Add an item, merging with an existing line of the same key.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated collection fails.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartStoreError> {
        debug!(product_id = %item.product_id, quantity = item.quantity, "adding to cart");

        self.cart.add(item);
        self.persist()
    }

    /// Apply a quantity delta to the line matching `key`, clamped at 1.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated collection fails.
    pub fn update_quantity(&mut self, key: &LineKey, delta: i32) -> Result<(), CartStoreError> {
        self.cart.update_quantity(key, delta);
        self.persist()
    }

    /// Remove exactly the line matching `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated collection fails.
    pub fn remove(&mut self, key: &LineKey) -> Result<(), CartStoreError> {
        self.cart.remove(key);
        self.persist()
    }

    /// Empty the cart. Called by checkout once an order is placed.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting the updated collection fails.
    pub fn clear(&mut self) -> Result<(), CartStoreError> {
        self.cart.clear();
        self.persist()
    }

    /// The lines currently in the cart.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Current subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Paise {
        self.cart.subtotal()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    fn persist(&self) -> Result<(), CartStoreError> {
        let record = CartRecord {
            version: CART_SCHEMA_VERSION,
            items: self.cart.items().to_vec(),
        };

        let raw = serde_json::to_string(&record).map_err(CartStoreError::Corrupt)?;

        Ok(self.store.save(CART_KEY, &raw)?)
    }
}
