//! Wishlist store errors.

use thiserror::Error;

use crate::{domain::cart::CartStoreError, store::StateStoreError};

#[derive(Debug, Error)]
pub enum WishlistStoreError {
    #[error("unsupported wishlist schema version {0}")]
    UnsupportedVersion(u32),

    #[error("stored wishlist is corrupt")]
    Corrupt(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StateStoreError),

    #[error("failed to move entry into the cart")]
    Cart(#[from] CartStoreError),
}
