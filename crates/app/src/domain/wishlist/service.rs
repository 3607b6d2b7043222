//! Wishlist store
//!
//! Client-local saved-for-later list, persisted the same way as the cart.
//! Entries are keyed by product id alone; wishlists carry no variant.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{cart::CartStore, wishlist::errors::WishlistStoreError, wishlist::models::WishlistEntry},
    store::{ClientStateStore, WISHLIST_KEY},
};

const WISHLIST_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WishlistRecord {
    version: u32,
    entries: Vec<WishlistEntry>,
}

/// Durable wishlist store.
pub struct WishlistStore {
    store: Arc<dyn ClientStateStore>,
    entries: Vec<WishlistEntry>,
}

impl WishlistStore {
    /// Open the wishlist persisted in `store`, starting empty when nothing
    /// is stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the stored record is corrupt, carries an
    /// unsupported schema version, or the store itself fails.
    pub fn open(store: Arc<dyn ClientStateStore>) -> Result<Self, WishlistStoreError> {
        let entries = match store.load(WISHLIST_KEY)? {
            None => Vec::new(),
            Some(raw) => {
                let record: WishlistRecord =
                    serde_json::from_str(&raw).map_err(WishlistStoreError::Corrupt)?;

                if record.version != WISHLIST_SCHEMA_VERSION {
                    return Err(WishlistStoreError::UnsupportedVersion(record.version));
                }

                record.entries
            }
        };

        Ok(Self { store, entries })
    }

    /// Add the product if absent, remove it if present. Returns whether the
    /// product is on the wishlist afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails.
    pub fn toggle(&mut self, entry: WishlistEntry) -> Result<bool, WishlistStoreError> {
        let product_id = entry.product_id;

        if self.contains(product_id) {
            self.entries.retain(|e| e.product_id != product_id);
            self.persist()?;

            return Ok(false);
        }

        self.entries.push(entry);
        self.persist()?;

        Ok(true)
    }

    /// Remove the product, if present.
    ///
    /// # Errors
    ///
    /// Returns an error when persisting fails.
    pub fn remove(&mut self, product_id: Uuid) -> Result<(), WishlistStoreError> {
        self.entries.retain(|e| e.product_id != product_id);
        self.persist()
    }

    /// Move an entry into the cart with quantity 1 and remove it from the
    /// wishlist. A missing product is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when either store fails to persist.
    pub fn move_to_cart(
        &mut self,
        product_id: Uuid,
        cart: &mut CartStore,
    ) -> Result<(), WishlistStoreError> {
        let Some(position) = self.entries.iter().position(|e| e.product_id == product_id)
        else {
            return Ok(());
        };

        let entry = self.entries.remove(position);

        cart.add(entry.into_line_item())?;
        self.persist()
    }

    /// The saved entries.
    #[must_use]
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Whether the product is on the wishlist.
    #[must_use]
    pub fn contains(&self, product_id: Uuid) -> bool {
        self.entries.iter().any(|e| e.product_id == product_id)
    }

    fn persist(&self) -> Result<(), WishlistStoreError> {
        let record = WishlistRecord {
            version: WISHLIST_SCHEMA_VERSION,
            entries: self.entries.clone(),
        };

        let raw = serde_json::to_string(&record).map_err(WishlistStoreError::Corrupt)?;

        Ok(self.store.save(WISHLIST_KEY, &raw)?)
    }
}
