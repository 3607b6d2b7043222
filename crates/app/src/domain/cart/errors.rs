//! Cart store errors.

use thiserror::Error;

use crate::store::StateStoreError;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("unsupported cart schema version {0}")]
    UnsupportedVersion(u32),

    #[error("stored cart is corrupt")]
    Corrupt(#[source] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StateStoreError),
}
